//! Facility positioning: clustering points of sale into DC catchments and
//! sizing each DC.
//!
//! - [`kmeans`]: Seeded k-means on raw latitude/longitude
//! - [`position_facilities`]: DC locations, tiers, and point assignment

mod facility;
mod kmeans;

pub use facility::{position_facilities, DcSiting, DcSizing, FacilityLayout};
pub use kmeans::{distinct_locations, kmeans, Clustering};
