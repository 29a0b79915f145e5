//! Viewport geometry and resize remapping

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Size of the display area in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    #[inline]
    pub fn min_side(&self) -> f32 {
        self.width.min(self.height)
    }

    /// Zero, negative or non-finite sides (hidden or collapsed host)
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
    }

    /// Map a point so it keeps its center-relative place when the viewport
    /// changes from `self` to `to`. Each axis scales independently.
    pub fn remap(&self, point: Vec2, to: &Viewport) -> Vec2 {
        let scale = Vec2::new(to.width / self.width, to.height / self.height);
        to.center() + (point - self.center()) * scale
    }

    /// Center-relative position normalized by viewport size
    pub fn relative(&self, point: Vec2) -> Vec2 {
        (point - self.center()) / Vec2::new(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remap_center_stays_center() {
        let from = Viewport::new(1000.0, 800.0);
        let to = Viewport::new(400.0, 900.0);
        let mapped = from.remap(from.center(), &to);
        assert!((mapped - to.center()).length() < 1e-4);
    }

    #[test]
    fn test_remap_scales_axes_independently() {
        let from = Viewport::new(1000.0, 800.0);
        let to = Viewport::new(500.0, 1600.0);
        // 100 px right and 100 px below center
        let mapped = from.remap(Vec2::new(600.0, 500.0), &to);
        assert!((mapped - Vec2::new(300.0, 1000.0)).length() < 1e-4);
    }

    #[test]
    fn test_degenerate() {
        assert!(Viewport::new(0.0, 600.0).is_degenerate());
        assert!(Viewport::new(800.0, -1.0).is_degenerate());
        assert!(Viewport::new(f32::NAN, 600.0).is_degenerate());
        assert!(!Viewport::new(800.0, 600.0).is_degenerate());
    }
}
