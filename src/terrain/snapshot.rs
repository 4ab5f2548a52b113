//! Immutable elevation snapshots stored in the edit history.
//!
//! A snapshot only records elevations; sample x/z positions are implied by
//! the index and the triangulation is recomputed from the dimensions.

use std::sync::Arc;

use crate::core::error::Error;
use crate::core::types::Result;
use super::triangulation::{checked_sample_count, sample_count};

/// Captured state of the whole height grid at one point in history.
///
/// Elevations live behind an `Arc`, so cloning a snapshot (for example when
/// linearising the history for saving) is a reference count bump.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainSnapshot {
    width: u32,
    height: u32,
    elevations: Arc<[f32]>,
}

impl TerrainSnapshot {
    /// Create a snapshot, checking that the array matches the dimensions.
    pub fn new(width: u32, height: u32, elevations: impl Into<Arc<[f32]>>) -> Result<Self> {
        let elevations = elevations.into();
        if width == 0 || height == 0 {
            return Err(Error::SnapshotMismatch(format!(
                "dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        let Some(expected) = checked_sample_count(width, height) else {
            return Err(Error::SnapshotMismatch(format!(
                "{}x{} grid is too large to index",
                width, height
            )));
        };
        if elevations.len() != expected {
            return Err(Error::SnapshotMismatch(format!(
                "{}x{} grid needs {} elevations, got {}",
                width,
                height,
                expected,
                elevations.len()
            )));
        }
        Ok(Self { width, height, elevations })
    }

    /// Build from parts already known to agree, such as a live grid.
    pub(crate) fn from_parts(width: u32, height: u32, elevations: Arc<[f32]>) -> Self {
        debug_assert_eq!(elevations.len(), sample_count(width, height));
        Self { width, height, elevations }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major elevations, index `x + y * (width + 1)`.
    pub fn elevations(&self) -> &[f32] {
        &self.elevations
    }

    /// Lowest and highest elevation in the snapshot.
    pub fn elevation_range(&self) -> (f32, f32) {
        self.elevations
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &e| (lo.min(e), hi.max(e)))
    }

    /// Arithmetic mean elevation.
    pub fn mean_elevation(&self) -> f32 {
        let sum: f64 = self.elevations.iter().map(|&e| e as f64).sum();
        (sum / self.elevations.len() as f64) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_checks_length() {
        assert!(TerrainSnapshot::new(2, 2, vec![0.0; 9]).is_ok());
        assert!(matches!(
            TerrainSnapshot::new(2, 2, vec![0.0; 8]),
            Err(Error::SnapshotMismatch(_))
        ));
        assert!(TerrainSnapshot::new(0, 2, Vec::<f32>::new()).is_err());
    }

    #[test]
    fn test_new_rejects_unindexable_size() {
        assert!(matches!(
            TerrainSnapshot::new(u32::MAX, u32::MAX, Vec::<f32>::new()),
            Err(Error::SnapshotMismatch(_))
        ));
    }

    #[test]
    fn test_clone_shares_elevations() {
        let a = TerrainSnapshot::new(1, 1, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let b = a.clone();
        assert!(std::ptr::eq(a.elevations().as_ptr(), b.elevations().as_ptr()));
    }

    #[test]
    fn test_stats() {
        let s = TerrainSnapshot::new(1, 1, vec![-2.0, 0.0, 2.0, 4.0]).unwrap();
        assert_eq!(s.elevation_range(), (-2.0, 4.0));
        assert_eq!(s.mean_elevation(), 1.0);
    }
}
