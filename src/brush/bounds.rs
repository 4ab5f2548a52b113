//! Cursor bounds: the grid rectangle a brush can reach

use glam::Vec2;

/// Half-open sample rectangle `[x_min, x_max) x [y_min, y_max)`.
///
/// Empty when the cursor disc lies entirely off the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorBounds {
    pub x_min: i64,
    pub x_max: i64,
    pub y_min: i64,
    pub y_max: i64,
}

impl CursorBounds {
    /// Bounds of a disc of `radius` around `center` on a `width` x `height` grid.
    pub fn new(center: Vec2, radius: f32, width: u32, height: u32) -> Self {
        Self {
            x_min: 0.max((center.x - radius).floor() as i64),
            x_max: (width as i64 + 1).min((center.x + radius).ceil() as i64),
            y_min: 0.max((center.y - radius).floor() as i64),
            y_max: (height as i64 + 1).min((center.y + radius).ceil() as i64),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x_min >= self.x_max || self.y_min >= self.y_max
    }

    /// Number of samples inside the rectangle.
    pub fn area(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        ((self.x_max - self.x_min) * (self.y_max - self.y_min)) as usize
    }

    /// Every sample in the rectangle, x-major like the brush loops.
    pub fn samples(self) -> impl Iterator<Item = (u32, u32)> {
        let Self { x_min, x_max, y_min, y_max } = self;
        (x_min..x_max).flat_map(move |x| (y_min..y_max).map(move |y| (x as u32, y as u32)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inside_grid() {
        let b = CursorBounds::new(Vec2::new(5.5, 5.5), 2.0, 20, 20);
        assert_eq!(b, CursorBounds { x_min: 3, x_max: 8, y_min: 3, y_max: 8 });
        assert_eq!(b.area(), 25);
        assert_eq!(b.samples().count(), 25);
    }

    #[test]
    fn test_clipped_to_grid() {
        let b = CursorBounds::new(Vec2::new(0.0, 4.0), 10.0, 4, 4);
        assert_eq!(b, CursorBounds { x_min: 0, x_max: 5, y_min: 0, y_max: 5 });
    }

    #[test]
    fn test_far_outside_is_empty() {
        let b = CursorBounds::new(Vec2::new(-100.0, 500.0), 3.0, 4, 4);
        assert!(b.is_empty());
        assert_eq!(b.area(), 0);
        assert_eq!(b.samples().count(), 0);
    }

    #[test]
    fn test_zero_radius_on_lattice_point() {
        let b = CursorBounds::new(Vec2::new(2.0, 2.0), 0.0, 4, 4);
        // floor == ceil, so the half-open range is empty
        assert!(b.is_empty());
    }
}
