//! Great-circle distances.
//!
//! Provides the haversine distance, a geographic point type, and a dense
//! distance matrix over a depot plus its points of sale.

mod geo;
mod matrix;

pub use geo::{haversine_km, GeoPoint, EARTH_RADIUS_KM};
pub use matrix::DistanceMatrix;
