//! Seeded k-means clustering on raw latitude/longitude.
//!
//! # Algorithm
//!
//! k-means++ seeding (Arthur & Vassilvitskii, 2007) followed by Lloyd
//! iterations until the labels stop changing or the iteration cap is hit.
//! An empty cluster takes over the point lying farthest from its own centroid
//! among clusters that have more than one member.
//!
//! Coordinates are treated as planar, which distorts distances away from the
//! equator. This is an accepted approximation for DC placement.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::distance::GeoPoint;
use crate::error::{ConfigError, NetworkError, Result};

/// Cluster centroids and per-point labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Clustering {
    centroids: Vec<GeoPoint>,
    labels: Vec<usize>,
    iterations: usize,
}

impl Clustering {
    /// Cluster means, one per cluster.
    pub fn centroids(&self) -> &[GeoPoint] {
        &self.centroids
    }

    /// Cluster index per input point.
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Lloyd iterations performed.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Number of points per cluster.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.centroids.len()];
        for &l in &self.labels {
            sizes[l] += 1;
        }
        sizes
    }
}

/// Number of distinct locations among `points`.
pub fn distinct_locations(points: &[GeoPoint]) -> usize {
    points
        .iter()
        .map(|p| ((p.latitude + 0.0).to_bits(), (p.longitude + 0.0).to_bits()))
        .collect::<HashSet<_>>()
        .len()
}

/// Partitions `points` into `k` non-empty clusters.
///
/// Deterministic for a given `seed`.
///
/// # Errors
///
/// - [`NetworkError::Numerical`] if a coordinate is not finite.
/// - [`ConfigError::InvalidDcCount`] if `k` is zero or exceeds the number of
///   distinct locations.
///
/// # Examples
///
/// ```
/// use u_distribution::distance::GeoPoint;
/// use u_distribution::positioning::kmeans;
///
/// let points = vec![
///     GeoPoint::new(0.0, 0.0),
///     GeoPoint::new(0.1, 0.0),
///     GeoPoint::new(10.0, 10.0),
///     GeoPoint::new(10.1, 10.0),
/// ];
/// let c = kmeans(&points, 2, 100, 42).unwrap();
/// assert_eq!(c.labels()[0], c.labels()[1]);
/// assert_eq!(c.labels()[2], c.labels()[3]);
/// assert_ne!(c.labels()[0], c.labels()[2]);
/// ```
pub fn kmeans(
    points: &[GeoPoint],
    k: usize,
    max_iterations: usize,
    seed: u64,
) -> Result<Clustering> {
    if let Some(i) = points.iter().position(|p| !p.is_finite()) {
        return Err(NetworkError::numerical(format!(
            "point {i} has non-finite coordinates"
        )));
    }
    let distinct = distinct_locations(points);
    if k == 0 || k > distinct {
        return Err(ConfigError::InvalidDcCount {
            requested: k,
            distinct_locations: distinct,
        }
        .into());
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut centroids = seed_centroids(points, k, &mut rng)?;
    let mut labels = assign(points, &centroids);
    repair_empty(points, &mut labels, &mut centroids)?;

    let mut iterations = 0;
    while iterations < max_iterations {
        iterations += 1;
        centroids = update(points, &labels, &centroids);
        let mut next = assign(points, &centroids);
        repair_empty(points, &mut next, &mut centroids)?;
        if next == labels {
            break;
        }
        labels = next;
    }
    centroids = update(points, &labels, &centroids);

    Ok(Clustering {
        centroids,
        labels,
        iterations,
    })
}

fn sq_dist(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let dy = a.latitude - b.latitude;
    let dx = a.longitude - b.longitude;
    dx * dx + dy * dy
}

fn seed_centroids(points: &[GeoPoint], k: usize, rng: &mut StdRng) -> Result<Vec<GeoPoint>> {
    let mut centroids = Vec::with_capacity(k);
    centroids.push(points[rng.random_range(0..points.len())]);
    let mut d2: Vec<f64> = points.iter().map(|p| sq_dist(p, &centroids[0])).collect();

    while centroids.len() < k {
        let total: f64 = d2.iter().sum();
        if !total.is_finite() || total <= 0.0 {
            return Err(NetworkError::numerical(
                "k-means++ ran out of distinct seed points",
            ));
        }
        let target = rng.random::<f64>() * total;
        let mut acc = 0.0;
        let mut chosen = None;
        for (i, &d) in d2.iter().enumerate() {
            if d <= 0.0 {
                continue;
            }
            acc += d;
            chosen = Some(i);
            if acc >= target {
                break;
            }
        }
        let idx = chosen.ok_or_else(|| NetworkError::numerical("k-means++ found no seed point"))?;
        let c = points[idx];
        centroids.push(c);
        for (d, p) in d2.iter_mut().zip(points) {
            *d = d.min(sq_dist(p, &c));
        }
    }
    Ok(centroids)
}

fn assign(points: &[GeoPoint], centroids: &[GeoPoint]) -> Vec<usize> {
    points
        .iter()
        .map(|p| {
            let mut best = 0;
            let mut best_d = f64::INFINITY;
            for (c, centroid) in centroids.iter().enumerate() {
                let d = sq_dist(p, centroid);
                if d < best_d {
                    best = c;
                    best_d = d;
                }
            }
            best
        })
        .collect()
}

fn update(points: &[GeoPoint], labels: &[usize], previous: &[GeoPoint]) -> Vec<GeoPoint> {
    let k = previous.len();
    let mut sums = vec![(0.0, 0.0); k];
    let mut counts = vec![0usize; k];
    for (p, &l) in points.iter().zip(labels) {
        sums[l].0 += p.latitude;
        sums[l].1 += p.longitude;
        counts[l] += 1;
    }
    (0..k)
        .map(|c| {
            if counts[c] == 0 {
                previous[c]
            } else {
                let n = counts[c] as f64;
                GeoPoint::new(sums[c].0 / n, sums[c].1 / n)
            }
        })
        .collect()
}

fn repair_empty(
    points: &[GeoPoint],
    labels: &mut [usize],
    centroids: &mut [GeoPoint],
) -> Result<()> {
    let mut sizes = vec![0usize; centroids.len()];
    for &l in labels.iter() {
        sizes[l] += 1;
    }

    for c in 0..centroids.len() {
        if sizes[c] > 0 {
            continue;
        }
        let mut donor: Option<(usize, f64)> = None;
        for (i, p) in points.iter().enumerate() {
            let l = labels[i];
            if sizes[l] < 2 {
                continue;
            }
            let d = sq_dist(p, &centroids[l]);
            if donor.map_or(true, |(_, bd)| d > bd) {
                donor = Some((i, d));
            }
        }
        let (i, _) = donor.ok_or_else(|| {
            NetworkError::numerical(format!("cluster {c} is empty and cannot be refilled"))
        })?;
        sizes[labels[i]] -= 1;
        labels[i] = c;
        sizes[c] = 1;
        centroids[c] = points[i];
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_blobs() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(-15.0, -47.0),
            GeoPoint::new(-15.1, -47.1),
            GeoPoint::new(-15.05, -47.05),
            GeoPoint::new(-23.0, -46.0),
            GeoPoint::new(-23.1, -46.1),
            GeoPoint::new(-23.05, -46.05),
        ]
    }

    #[test]
    fn test_separates_blobs() {
        let c = kmeans(&two_blobs(), 2, 100, 1).expect("valid");
        let l = c.labels();
        assert_eq!(l[0], l[1]);
        assert_eq!(l[1], l[2]);
        assert_eq!(l[3], l[4]);
        assert_eq!(l[4], l[5]);
        assert_ne!(l[0], l[3]);
        assert_eq!(c.cluster_sizes(), vec![3, 3]);
    }

    #[test]
    fn test_centroid_is_mean() {
        let c = kmeans(&two_blobs(), 2, 100, 1).expect("valid");
        let blob = c.labels()[0];
        let centroid = c.centroids()[blob];
        assert!((centroid.latitude - (-15.05)).abs() < 1e-9);
        assert!((centroid.longitude - (-47.05)).abs() < 1e-9);
    }

    #[test]
    fn test_deterministic_for_seed() {
        let points: Vec<GeoPoint> = (0..30)
            .map(|i| GeoPoint::new((i * 7 % 13) as f64, (i * 5 % 11) as f64))
            .collect();
        let a = kmeans(&points, 4, 100, 9).expect("valid");
        let b = kmeans(&points, 4, 100, 9).expect("valid");
        assert_eq!(a, b);
    }

    #[test]
    fn test_every_cluster_non_empty() {
        let points: Vec<GeoPoint> = (0..20)
            .map(|i| GeoPoint::new((i % 5) as f64, (i / 5) as f64))
            .collect();
        for seed in 0..10 {
            let c = kmeans(&points, 6, 100, seed).expect("valid");
            assert!(c.cluster_sizes().iter().all(|&s| s > 0));
        }
    }

    #[test]
    fn test_k_equals_distinct_locations() {
        let points = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(1.0, 1.0),
        ];
        let c = kmeans(&points, 2, 100, 3).expect("valid");
        assert_eq!(c.labels()[0], c.labels()[1]);
        assert_ne!(c.labels()[0], c.labels()[2]);
    }

    #[test]
    fn test_too_many_clusters() {
        let points = vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.0)];
        assert!(matches!(
            kmeans(&points, 2, 100, 0),
            Err(NetworkError::Configuration(ConfigError::InvalidDcCount {
                requested: 2,
                distinct_locations: 1
            }))
        ));
        assert!(matches!(
            kmeans(&points, 0, 100, 0),
            Err(NetworkError::Configuration(ConfigError::InvalidDcCount { .. }))
        ));
    }

    #[test]
    fn test_non_finite_is_numerical() {
        let points = vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(f64::NAN, 0.0)];
        assert!(matches!(
            kmeans(&points, 1, 100, 0),
            Err(NetworkError::Numerical { .. })
        ));
    }

    #[test]
    fn test_distinct_locations_ignores_sign_of_zero() {
        let points = vec![GeoPoint::new(0.0, -0.0), GeoPoint::new(-0.0, 0.0)];
        assert_eq!(distinct_locations(&points), 1);
    }
}
