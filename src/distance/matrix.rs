//! Dense distance matrix.

use super::GeoPoint;

/// A dense n×n great-circle distance matrix stored in row-major order.
///
/// Routing code places the distribution center at index 0 and the points of
/// sale at `1..=n`.
///
/// # Examples
///
/// ```
/// use u_distribution::distance::{DistanceMatrix, GeoPoint};
///
/// let points = vec![
///     GeoPoint::new(0.0, 0.0),
///     GeoPoint::new(0.0, 1.0),
///     GeoPoint::new(0.0, 3.0),
/// ];
/// let dm = DistanceMatrix::from_points(&points);
/// assert_eq!(dm.size(), 3);
/// assert_eq!(dm.farthest(0, &[1, 2]), Some(2));
/// assert_eq!(dm.nearest_neighbor(0, &[1, 2]), Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes the haversine distance matrix of the given points.
    pub fn from_points(points: &[GeoPoint]) -> Self {
        let n = points.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = points[i].distance_to(&points[j]);
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Returns the nearest candidate to `from`; the earliest candidate wins ties.
    ///
    /// Returns `None` if `candidates` is empty.
    pub fn nearest_neighbor(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for &c in candidates {
            let d = self.get(from, c);
            if best.map_or(true, |(_, bd)| d < bd) {
                best = Some((c, d));
            }
        }
        best.map(|(c, _)| c)
    }

    /// Returns the farthest candidate from `from`; the earliest candidate wins ties.
    ///
    /// Returns `None` if `candidates` is empty.
    pub fn farthest(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for &c in candidates {
            let d = self.get(from, c);
            if best.map_or(true, |(_, bd)| d > bd) {
                best = Some((c, d));
            }
        }
        best.map(|(c, _)| c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_points() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 1.0),
            GeoPoint::new(2.0, 0.0),
        ]
    }

    #[test]
    fn test_from_points() {
        let dm = DistanceMatrix::from_points(&sample_points());
        assert_eq!(dm.size(), 3);
        assert!(dm.get(0, 0).abs() < 1e-12);
        assert!(dm.get(0, 1) > 110.0 && dm.get(0, 1) < 112.0);
        assert!(dm.get(0, 2) > 221.0 && dm.get(0, 2) < 223.0);
    }

    #[test]
    fn test_symmetric() {
        let dm = DistanceMatrix::from_points(&sample_points());
        assert!(dm.is_symmetric(1e-10));
    }

    #[test]
    fn test_set_get() {
        let mut dm = DistanceMatrix::new(3);
        dm.set(0, 1, 42.0);
        assert_eq!(dm.get(0, 1), 42.0);
        assert_eq!(dm.get(1, 0), 0.0);
        assert!(!dm.is_symmetric(1e-10));
    }

    #[test]
    fn test_nearest_and_farthest() {
        let dm = DistanceMatrix::from_points(&sample_points());
        assert_eq!(dm.nearest_neighbor(0, &[1, 2]), Some(1));
        assert_eq!(dm.farthest(0, &[1, 2]), Some(2));
        assert_eq!(dm.nearest_neighbor(0, &[]), None);
        assert_eq!(dm.farthest(0, &[]), None);
    }

    #[test]
    fn test_ties_pick_first_candidate() {
        let points = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 0.0),
        ];
        let dm = DistanceMatrix::from_points(&points);
        assert_eq!(dm.farthest(0, &[2, 1]), Some(2));
        assert_eq!(dm.nearest_neighbor(0, &[1, 2]), Some(1));
    }
}
