//! Brush algorithms.
//!
//! Every brush scans only the cursor bounds and then filters samples by their
//! planar distance to the cursor, so one application costs O(r²) regardless
//! of grid size.

use glam::{FloatExt, Vec3};

use crate::core::types::Result;
use crate::terrain::HeightGrid;
use super::bounds::CursorBounds;
use super::kind::BrushKind;
use super::params::BrushParams;

/// Strength of the raise/lower bump at normalized distance `d` in `[0, 1]`.
///
/// 1 at the centre, 0 at the rim, 0.5 halfway.
#[inline]
pub fn falloff(d: f32) -> f32 {
    (1.0 - d) * (d + 1.0) * (1.0 - d) + d * (d - 1.0) * (d - 1.0)
}

/// Upper bound of the weight scale the average brush maps onto `[0, 1]`.
const AVERAGE_WEIGHT_SCALE: f32 = 50.0;

/// Blend rate of the average brush per second at full weight.
const AVERAGE_RATE: f32 = 10.0;

impl BrushKind {
    /// Apply one frame of this brush at the cursor.
    ///
    /// `target` is only read by [`BrushKind::SetHeight`]; `dt` is the frame
    /// time in seconds and scales the time-based brushes. Returns the number
    /// of samples inside the brush disc.
    pub fn draw(self, grid: &mut HeightGrid, params: &BrushParams, target: f32, dt: f32) -> Result<usize> {
        let touched = match self {
            BrushKind::Raise => offset_falloff(grid, params, params.weight() * dt),
            BrushKind::Lower => offset_falloff(grid, params, -params.weight() * dt),
            BrushKind::SetHeight => set_height(grid, params, target),
            BrushKind::Average => average(grid, params, dt),
        }?;

        log::trace!(
            "{} at ({:.2}, {:.2}) r={:.2}: {} samples",
            self,
            params.position().x,
            params.position().y,
            params.size(),
            touched
        );
        Ok(touched)
    }
}

/// Samples inside the brush disc with their distance to the cursor.
fn disc(grid: &HeightGrid, params: &BrushParams) -> impl Iterator<Item = (u32, u32, f32)> {
    let radius = params.size();
    let cursor = params.position_3d();
    let bounds = CursorBounds::new(params.position(), radius, grid.width(), grid.height());

    bounds
        .samples()
        .filter(move |_| radius > 0.0)
        .filter_map(move |(x, y)| {
            let distance = Vec3::new(x as f32, 0.0, y as f32).distance(cursor);
            (distance <= radius).then_some((x, y, distance))
        })
}

/// Raise (positive `amount`) or lower (negative) with the bump falloff.
fn offset_falloff(grid: &mut HeightGrid, params: &BrushParams, amount: f32) -> Result<usize> {
    let radius = params.size();
    let cells: Vec<_> = disc(grid, params).collect();

    for &(x, y, distance) in &cells {
        let d = distance / radius;
        grid.offset(x, y, amount * falloff(d))?;
    }

    Ok(cells.len())
}

/// Snap every sample in the disc to `target`. No falloff, no time scaling.
fn set_height(grid: &mut HeightGrid, params: &BrushParams, target: f32) -> Result<usize> {
    let cells: Vec<_> = disc(grid, params).collect();

    for &(x, y, _) in &cells {
        grid.set(x, y, target)?;
    }

    Ok(cells.len())
}

/// Pull every sample in the disc toward the disc's mean elevation.
///
/// The blend factor falls off linearly toward the rim and is clamped to
/// `[0, 1]`, so a sample never passes the mean.
fn average(grid: &mut HeightGrid, params: &BrushParams, dt: f32) -> Result<usize> {
    let radius = params.size();
    let cells: Vec<_> = disc(grid, params).collect();
    if cells.is_empty() {
        return Ok(0);
    }

    let mut sum = 0.0f64;
    for &(x, y, _) in &cells {
        sum += grid.get(x, y)? as f64;
    }
    let mean = (sum / cells.len() as f64) as f32;

    let strength = params.weight().remap(0.0, AVERAGE_WEIGHT_SCALE, 0.0, 1.0);
    for &(x, y, distance) in &cells {
        let t = (AVERAGE_RATE * dt * (1.0 - distance / radius) * strength).clamp(0.0, 1.0);
        let current = grid.get(x, y)?;
        grid.set(x, y, current.lerp(mean, t))?;
    }

    Ok(cells.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn params_at(x: f32, y: f32, size: f32, weight: f32) -> BrushParams {
        let mut params = BrushParams::default();
        params.set_position(Vec2::new(x, y));
        params.set_size(size);
        params.set_weight(weight);
        params
    }

    #[test]
    fn test_falloff_shape() {
        assert_eq!(falloff(0.0), 1.0);
        assert_eq!(falloff(1.0), 0.0);
        assert_eq!(falloff(0.5), 0.5);
        let mut last = falloff(0.0);
        for i in 1..=10 {
            let f = falloff(i as f32 / 10.0);
            assert!(f <= last);
            last = f;
        }
    }

    #[test]
    fn test_raise_peaks_at_centre() {
        let mut grid = HeightGrid::new(10, 10, -10.0, 10.0);
        let params = params_at(5.0, 5.0, 3.0, 2.0);

        let touched = BrushKind::Raise.draw(&mut grid, &params, 0.0, 0.5).unwrap();
        assert!(touched > 0);

        assert_eq!(grid.get(5, 5).unwrap(), 1.0);
        let near = grid.get(6, 5).unwrap();
        assert!(near > 0.0 && near < 1.0);
        // On the rim
        assert_eq!(grid.get(8, 5).unwrap(), 0.0);
        // Outside the disc
        assert_eq!(grid.get(0, 0).unwrap(), 0.0);
        assert!(grid.is_dirty());
    }

    #[test]
    fn test_lower_mirrors_raise() {
        let mut up = HeightGrid::new(10, 10, -10.0, 10.0);
        let mut down = HeightGrid::new(10, 10, -10.0, 10.0);
        let params = params_at(4.3, 6.1, 4.0, 3.0);

        BrushKind::Raise.draw(&mut up, &params, 0.0, 0.1).unwrap();
        BrushKind::Lower.draw(&mut down, &params, 0.0, 0.1).unwrap();

        for (a, b) in up.samples().iter().zip(down.samples()) {
            assert_eq!(*a, -*b);
        }
    }

    #[test]
    fn test_zero_dt_leaves_grid_clean() {
        let mut grid = HeightGrid::new(6, 6, -10.0, 10.0);
        let params = params_at(3.0, 3.0, 2.0, 5.0);
        BrushKind::Raise.draw(&mut grid, &params, 0.0, 0.0).unwrap();
        assert!(!grid.is_dirty());
    }

    #[test]
    fn test_set_height_fills_disc_only() {
        let mut grid = HeightGrid::new(10, 10, -10.0, 10.0);
        let params = params_at(5.0, 5.0, 2.5, 1.0);

        let touched = BrushKind::SetHeight.draw(&mut grid, &params, 4.0, 123.0).unwrap();
        assert_eq!(touched, 21);

        assert_eq!(grid.get(5, 5).unwrap(), 4.0);
        assert_eq!(grid.get(7, 6).unwrap(), 4.0);
        assert_eq!(grid.get(3, 5).unwrap(), 4.0);
        assert_eq!(grid.get(7, 7).unwrap(), 0.0);
        assert_eq!(grid.samples().iter().filter(|&&e| e == 4.0).count(), 21);
    }

    #[test]
    fn test_set_height_clamps_target() {
        let mut grid = HeightGrid::new(4, 4, -10.0, 10.0);
        let params = params_at(2.0, 2.0, 1.0, 1.0);
        BrushKind::SetHeight.draw(&mut grid, &params, 99.0, 0.0).unwrap();
        assert_eq!(grid.get(2, 2).unwrap(), 10.0);
    }

    #[test]
    fn test_average_stays_within_range() {
        let mut grid = HeightGrid::new(8, 8, -10.0, 10.0);
        for y in 0..=8 {
            for x in 0..=8 {
                let e = if (x + y) % 2 == 0 { -2.0 } else { 6.0 };
                grid.set(x, y, e).unwrap();
            }
        }

        // Large dt and weight push t well past 1 before clamping.
        let params = params_at(4.0, 4.0, 3.0, 50.0);
        BrushKind::Average.draw(&mut grid, &params, 0.0, 5.0).unwrap();

        for &e in grid.samples() {
            assert!((-2.0..=6.0).contains(&e), "overshoot: {}", e);
        }
    }

    #[test]
    fn test_average_converges_at_centre() {
        let mut grid = HeightGrid::new(8, 8, -10.0, 10.0);
        grid.set(4, 4, 8.0).unwrap();
        let params = params_at(4.0, 4.0, 2.5, 50.0);

        let touched = BrushKind::Average.draw(&mut grid, &params, 0.0, 1.0).unwrap();
        assert_eq!(touched, 21);

        // One sample at 8.0 among 21: the centre has t = 1 and lands on the mean.
        let mean = 8.0 / 21.0;
        assert!((grid.get(4, 4).unwrap() - mean).abs() < 1e-5);
        // Outside the disc
        assert_eq!(grid.get(7, 4).unwrap(), 0.0);
    }

    #[test]
    fn test_average_partial_blend() {
        let mut grid = HeightGrid::new(8, 8, -10.0, 10.0);
        grid.set(4, 4, 8.0).unwrap();
        let params = params_at(4.0, 4.0, 2.5, 5.0);

        // t at the centre = 10 * 0.01 * 1 * 0.1 = 0.01
        BrushKind::Average.draw(&mut grid, &params, 0.0, 0.01).unwrap();
        let centre = grid.get(4, 4).unwrap();
        let mean = 8.0 / 21.0;
        assert!((centre - (8.0 + (mean - 8.0) * 0.01)).abs() < 1e-4);
    }

    #[test]
    fn test_empty_disc_is_noop() {
        let mut grid = HeightGrid::new(4, 4, -10.0, 10.0);
        let params = params_at(-100.0, -100.0, 1.0, 1.0);

        for kind in BrushKind::all() {
            assert_eq!(kind.draw(&mut grid, &params, 3.0, 1.0).unwrap(), 0);
        }
        assert!(!grid.is_dirty());
    }

    #[test]
    fn test_bounds_reach_far_edge() {
        let mut grid = HeightGrid::new(4, 4, -10.0, 10.0);
        let params = params_at(4.0, 4.0, 1.0, 1.0);
        BrushKind::SetHeight.draw(&mut grid, &params, 2.0, 0.0).unwrap();
        assert_eq!(grid.get(4, 4).unwrap(), 2.0);
        assert_eq!(grid.get(3, 4).unwrap(), 2.0);
        assert_eq!(grid.get(4, 3).unwrap(), 2.0);
    }
}
