//! Deformable height grid.
//!
//! A fixed regular lattice of `(width + 1) * (height + 1)` elevation samples
//! laid out row-major. Every write is clamped into the grid's elevation
//! limits and raises the dirty flag the stroke atomizer consumes.

use std::sync::Arc;

use crate::core::config::GridConfig;
use crate::core::error::Error;
use crate::core::types::{Result, Vec3};
use super::snapshot::TerrainSnapshot;
use super::triangulation::{row_len, sample_count, triangulate};

/// Elevation samples plus the derived triangulation.
#[derive(Debug, Clone)]
pub struct HeightGrid {
    width: u32,
    height: u32,
    min_elevation: f32,
    max_elevation: f32,
    samples: Vec<f32>,
    /// Derived from width/height only; shared with every mesh view
    triangles: Arc<[u32]>,
    /// Set by any write that changed a sample
    dirty: bool,
}

impl HeightGrid {
    /// Create a flat grid at elevation 0.
    pub fn new(width: u32, height: u32, min_elevation: f32, max_elevation: f32) -> Self {
        Self {
            width,
            height,
            min_elevation,
            max_elevation,
            samples: vec![0.0f32.clamp(min_elevation, max_elevation); sample_count(width, height)],
            triangles: triangulate(width, height).into(),
            dirty: false,
        }
    }

    /// Create a flat grid from configuration.
    pub fn from_config(config: &GridConfig) -> Self {
        Self::new(config.width, config.height, config.min_elevation, config.max_elevation)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn min_elevation(&self) -> f32 {
        self.min_elevation
    }

    pub fn max_elevation(&self) -> f32 {
        self.max_elevation
    }

    /// Check whether `(x, y)` addresses a sample.
    #[inline]
    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x <= self.width as i64 && y <= self.height as i64
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Result<usize> {
        if x > self.width || y > self.height {
            return Err(self.out_of_bounds(x as i64, y as i64));
        }
        Ok(x as usize + y as usize * row_len(self.width))
    }

    fn out_of_bounds(&self, x: i64, y: i64) -> Error {
        Error::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }

    /// Elevation at `(x, y)`. Fails for samples outside the grid.
    pub fn get(&self, x: u32, y: u32) -> Result<f32> {
        let index = self.index(x, y)?;
        Ok(self.samples[index])
    }

    /// Elevation at `(x, y)`, or `default` if the sample does not exist.
    pub fn get_or_default(&self, x: i64, y: i64, default: f32) -> f32 {
        if !self.in_bounds(x, y) {
            return default;
        }
        self.samples[x as usize + y as usize * row_len(self.width)]
    }

    /// Write a clamped elevation at `(x, y)`.
    pub fn set(&mut self, x: u32, y: u32, elevation: f32) -> Result<()> {
        let index = self.index(x, y)?;
        self.write(index, elevation);
        Ok(())
    }

    /// Add `delta` to the elevation at `(x, y)`, clamping the result.
    /// A zero delta is a no-op and leaves the dirty flag alone.
    pub fn offset(&mut self, x: u32, y: u32, delta: f32) -> Result<()> {
        let index = self.index(x, y)?;
        if delta == 0.0 {
            return Ok(());
        }
        self.write(index, self.samples[index] + delta);
        Ok(())
    }

    fn write(&mut self, index: usize, elevation: f32) {
        let clamped = elevation.clamp(self.min_elevation, self.max_elevation);
        if self.samples[index] != clamped {
            self.samples[index] = clamped;
            self.dirty = true;
        }
    }

    /// Flatten every sample to elevation 0 and rebuild the triangulation.
    pub fn generate_default(&mut self) {
        let flat = 0.0f32.clamp(self.min_elevation, self.max_elevation);
        if self.samples.iter().any(|&e| e != flat) {
            self.dirty = true;
        }
        self.samples.clear();
        self.samples.resize(sample_count(self.width, self.height), flat);
        self.regenerate_triangulation();
    }

    /// Recompute the triangle indices from the current dimensions.
    pub fn regenerate_triangulation(&mut self) {
        self.triangles = triangulate(self.width, self.height).into();
    }

    /// Row-major elevations.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Triangle indices, three per triangle.
    pub fn triangles(&self) -> &[u32] {
        &self.triangles
    }

    pub(crate) fn shared_triangles(&self) -> Arc<[u32]> {
        Arc::clone(&self.triangles)
    }

    /// World-space position of a sample; the grid spans x/z with elevation on y.
    #[inline]
    pub fn position(&self, index: usize) -> Vec3 {
        let row = row_len(self.width);
        Vec3::new((index % row) as f32, self.samples[index], (index / row) as f32)
    }

    /// Whether a sample changed since the flag was last cleared.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Capture the current elevations.
    pub fn snapshot(&self) -> TerrainSnapshot {
        TerrainSnapshot::from_parts(self.width, self.height, self.samples.as_slice().into())
    }

    /// Replace every elevation with the contents of `snapshot`.
    ///
    /// The snapshot must have been taken from a grid of the same size. The
    /// dirty flag is cleared because the grid now matches a recorded state.
    pub fn load_snapshot(&mut self, snapshot: &TerrainSnapshot) -> Result<()> {
        if snapshot.width() != self.width || snapshot.height() != self.height {
            return Err(Error::SnapshotMismatch(format!(
                "snapshot is {}x{}, grid is {}x{}",
                snapshot.width(),
                snapshot.height(),
                self.width,
                self.height
            )));
        }

        for (sample, &elevation) in self.samples.iter_mut().zip(snapshot.elevations()) {
            *sample = elevation.clamp(self.min_elevation, self.max_elevation);
        }
        self.regenerate_triangulation();
        self.dirty = false;
        Ok(())
    }
}
