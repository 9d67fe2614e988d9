//! Distribution center placement and sizing.

use tracing::{debug, warn};

use super::kmeans;
use crate::config::OptimizerConfig;
use crate::distance::GeoPoint;
use crate::error::{ConfigError, NetworkError, Result};
use crate::models::{DcSizeTable, DistributionCenter, PointOfSale, SizeTier};

/// Where distribution centers go.
#[derive(Debug, Clone, PartialEq)]
pub enum DcSiting {
    /// Cluster the points into `count` groups; each centroid hosts a DC.
    Clustered {
        /// Number of DCs.
        count: usize,
    },
    /// DCs at the given locations; each point joins the nearest one.
    Fixed(Vec<GeoPoint>),
}

impl DcSiting {
    /// Number of DCs this siting produces.
    pub fn dc_count(&self) -> usize {
        match self {
            DcSiting::Clustered { count } => *count,
            DcSiting::Fixed(locations) => locations.len(),
        }
    }
}

/// How distribution centers are sized.
#[derive(Debug, Clone, PartialEq)]
pub enum DcSizing {
    /// Smallest tier covering the cluster demand, capped at the largest tier.
    ByDemand,
    /// Tiers given per DC index, used as-is.
    Fixed(Vec<SizeTier>),
}

/// DCs and the DC index of every input point.
#[derive(Debug, Clone, PartialEq)]
pub struct FacilityLayout {
    centers: Vec<DistributionCenter>,
    assignment: Vec<usize>,
}

impl FacilityLayout {
    /// Distribution centers in index order.
    pub fn centers(&self) -> &[DistributionCenter] {
        &self.centers
    }

    /// DC index per input point, in input order.
    pub fn assignment(&self) -> &[usize] {
        &self.assignment
    }

    /// Input points assigned to DC `dc`.
    pub fn members(&self, points: &[PointOfSale], dc: usize) -> Vec<PointOfSale> {
        points
            .iter()
            .zip(&self.assignment)
            .filter(|&(_, &a)| a == dc)
            .map(|(p, _)| *p)
            .collect()
    }

    /// Splits into centers and assignment.
    pub fn into_parts(self) -> (Vec<DistributionCenter>, Vec<usize>) {
        (self.centers, self.assignment)
    }
}

/// Places and sizes the distribution centers for `points`.
///
/// # Errors
///
/// - Configuration error when the DC count cannot be formed from the data or a
///   fixed tier list has the wrong length.
/// - Numerical error on non-finite coordinates.
pub fn position_facilities(
    points: &[PointOfSale],
    siting: &DcSiting,
    sizing: &DcSizing,
    table: &DcSizeTable,
    config: &OptimizerConfig,
) -> Result<FacilityLayout> {
    let dc_count = siting.dc_count();
    if let DcSizing::Fixed(tiers) = sizing {
        if tiers.len() != dc_count {
            return Err(ConfigError::TierCountMismatch {
                expected: dc_count,
                actual: tiers.len(),
            }
            .into());
        }
    }

    let locations: Vec<GeoPoint> = points.iter().map(|p| p.location()).collect();
    let (sites, assignment) = match siting {
        DcSiting::Clustered { count } => {
            let clustering = kmeans(
                &locations,
                *count,
                config.max_kmeans_iterations,
                config.seed,
            )?;
            debug!(
                clusters = count,
                iterations = clustering.iterations(),
                "k-means converged"
            );
            (clustering.centroids().to_vec(), clustering.labels().to_vec())
        }
        DcSiting::Fixed(sites) => (sites.clone(), assign_to_sites(&locations, sites)?),
    };

    let mut demand = vec![0.0; dc_count];
    for (p, &dc) in points.iter().zip(&assignment) {
        demand[dc] += p.demand_kg();
    }

    let centers: Vec<DistributionCenter> = sites
        .iter()
        .enumerate()
        .map(|(i, &location)| match sizing {
            DcSizing::ByDemand => {
                DistributionCenter::sized_for_demand(i, location, table, demand[i])
            }
            DcSizing::Fixed(tiers) => {
                DistributionCenter::new(i, location, tiers[i], table, demand[i])
            }
        })
        .collect();

    for dc in &centers {
        if dc.is_over_capacity() {
            warn!(
                dc = dc.index(),
                tier = %dc.tier(),
                demand_kg = dc.assigned_demand_kg(),
                capacity_kg = dc.capacity_kg(),
                "distribution center demand exceeds capacity"
            );
        }
    }

    Ok(FacilityLayout {
        centers,
        assignment,
    })
}

fn assign_to_sites(locations: &[GeoPoint], sites: &[GeoPoint]) -> Result<Vec<usize>> {
    if sites.is_empty() {
        return Err(ConfigError::InvalidDcCount {
            requested: 0,
            distinct_locations: super::distinct_locations(locations),
        }
        .into());
    }
    for (i, site) in sites.iter().enumerate() {
        if !site.is_finite() {
            return Err(NetworkError::numerical(format!(
                "distribution center {i} has non-finite coordinates"
            )));
        }
        if !site.in_range() {
            return Err(ConfigError::CoordinateOutOfRange {
                id: i,
                latitude: site.latitude,
                longitude: site.longitude,
            }
            .into());
        }
    }

    let mut assignment = Vec::with_capacity(locations.len());
    for (i, p) in locations.iter().enumerate() {
        if !p.is_finite() {
            return Err(NetworkError::numerical(format!(
                "point {i} has non-finite coordinates"
            )));
        }
        let mut best = 0;
        let mut best_d = f64::INFINITY;
        for (s, site) in sites.iter().enumerate() {
            let d = p.distance_to(site);
            if d < best_d {
                best = s;
                best_d = d;
            }
        }
        assignment.push(best);
    }
    Ok(assignment)
}
