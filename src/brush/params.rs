//! Brush parameters set by the UI and input side

use glam::{Vec2, Vec3};

use crate::core::config::BrushConfig;

/// Cursor radius, strength and position shared by every brush.
///
/// Size and weight are always kept inside their configured ranges.
#[derive(Debug, Clone, PartialEq)]
pub struct BrushParams {
    size: f32,
    weight: f32,
    /// Cursor on the grid plane: x along grid x, y along grid z
    position: Vec2,
    size_range: [f32; 2],
    weight_range: [f32; 2],
}

impl BrushParams {
    /// Create parameters from configuration, starting at the defaults.
    pub fn new(config: &BrushConfig) -> Self {
        let mut params = Self {
            size: 0.0,
            weight: 0.0,
            position: Vec2::ZERO,
            size_range: config.size_range,
            weight_range: config.weight_range,
        };
        params.set_size(config.default_size);
        params.set_weight(config.default_weight);
        params
    }

    /// Brush radius in grid cells.
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Brush strength.
    pub fn weight(&self) -> f32 {
        self.weight
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Cursor as a point on the base plane.
    pub fn position_3d(&self) -> Vec3 {
        Vec3::new(self.position.x, 0.0, self.position.y)
    }

    pub fn size_range(&self) -> [f32; 2] {
        self.size_range
    }

    pub fn weight_range(&self) -> [f32; 2] {
        self.weight_range
    }

    pub fn set_size(&mut self, value: f32) {
        self.size = clamp_to(value, self.size_range);
    }

    pub fn set_weight(&mut self, value: f32) {
        self.weight = clamp_to(value, self.weight_range);
    }

    pub fn change_size(&mut self, delta: f32) {
        self.set_size(self.size + delta);
    }

    pub fn change_weight(&mut self, delta: f32) {
        self.set_weight(self.weight + delta);
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }
}

impl Default for BrushParams {
    fn default() -> Self {
        Self::new(&BrushConfig::default())
    }
}

fn clamp_to(value: f32, [min, max]: [f32; 2]) -> f32 {
    if value.is_nan() {
        return min;
    }
    value.clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = BrushParams::default();
        assert_eq!(params.size(), 5.0);
        assert_eq!(params.weight(), 1.0);
        assert_eq!(params.position(), Vec2::ZERO);
    }

    #[test]
    fn test_setters_clamp() {
        let mut params = BrushParams::default();
        params.set_size(100.0);
        assert_eq!(params.size(), 50.0);
        params.set_size(0.0);
        assert_eq!(params.size(), 1.0);
        params.set_weight(f32::NAN);
        assert_eq!(params.weight(), 1.0);
    }

    #[test]
    fn test_change_steps_and_clamps() {
        let mut params = BrushParams::default();
        params.change_size(1.0);
        assert_eq!(params.size(), 6.0);

        for _ in 0..10 {
            params.change_weight(-1.0);
        }
        assert_eq!(params.weight(), 1.0);

        params.change_weight(100.0);
        assert_eq!(params.weight(), 50.0);
    }

    #[test]
    fn test_position_on_plane() {
        let mut params = BrushParams::default();
        params.set_position(Vec2::new(3.0, 7.5));
        assert_eq!(params.position_3d(), Vec3::new(3.0, 0.0, 7.5));
    }
}
