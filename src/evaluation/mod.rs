//! Route evaluation: distance, load, and constraint checks.

mod evaluator;

pub use evaluator::{RouteEvaluator, Violation, ViolationType};
