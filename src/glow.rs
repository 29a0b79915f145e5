//! Sign-up modal glows
//!
//! When the modal opens it places one soft glow per orb at the orb's current
//! screen position, staggering their entrance so glows near the center appear
//! first.

use glam::Vec2;

use crate::consts::ORB_COUNT;
use crate::sim::{ORB_CLASSES, OrbClass, Viewport};

/// Entrance delay of the glow farthest from the center (seconds)
pub const GLOW_MAX_DELAY_S: f32 = 0.20;

/// Where and when one glow appears
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowPlacement {
    pub class: OrbClass,
    /// Horizontal position as a percentage of viewport width
    pub left_pct: f32,
    /// Vertical position as a percentage of viewport height
    pub top_pct: f32,
    /// Entrance delay (seconds)
    pub delay_s: f32,
}

impl GlowPlacement {
    pub fn left_css(&self) -> String {
        format!("{}%", self.left_pct)
    }

    pub fn top_css(&self) -> String {
        format!("{}%", self.top_pct)
    }

    pub fn delay_css(&self) -> String {
        format!("{:.2}s", self.delay_s)
    }
}

/// Glow placements for the given orb positions; `None` for a collapsed viewport
pub fn place_glows(positions: &[Vec2; ORB_COUNT], viewport: &Viewport) -> Option<[GlowPlacement; ORB_COUNT]> {
    if viewport.is_degenerate() {
        return None;
    }
    let center = viewport.center();
    let dists = positions.map(|p| p.distance(center));
    let max_dist = dists.iter().copied().fold(1.0f32, f32::max);

    Some(std::array::from_fn(|i| GlowPlacement {
        class: ORB_CLASSES[i],
        left_pct: positions[i].x / viewport.width * 100.0,
        top_pct: positions[i].y / viewport.height * 100.0,
        delay_s: dists[i] / max_dist * GLOW_MAX_DELAY_S,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_glows() {
        let viewport = Viewport::new(1000.0, 800.0);
        let positions = [Vec2::new(500.0, 400.0), Vec2::new(750.0, 400.0), Vec2::new(0.0, 400.0)];
        let glows = place_glows(&positions, &viewport).unwrap();

        assert!((glows[0].left_pct - 50.0).abs() < 1e-4);
        assert!((glows[0].top_pct - 50.0).abs() < 1e-4);
        assert_eq!(glows[0].delay_s, 0.0);
        assert!((glows[1].delay_s - 0.10).abs() < 1e-6);
        assert!((glows[2].delay_s - 0.20).abs() < 1e-6);
        assert_eq!(glows[2].left_css(), "0%");
        assert_eq!(glows[1].delay_css(), "0.10s");
        assert_eq!(glows[1].class, OrbClass::Gold);
    }

    #[test]
    fn test_all_centered_has_no_delay() {
        let viewport = Viewport::new(1000.0, 800.0);
        let glows = place_glows(&[viewport.center(); ORB_COUNT], &viewport).unwrap();
        assert!(glows.iter().all(|g| g.delay_s == 0.0));
    }

    #[test]
    fn test_collapsed_viewport() {
        assert!(place_glows(&[Vec2::ZERO; ORB_COUNT], &Viewport::new(0.0, 0.0)).is_none());
    }
}
