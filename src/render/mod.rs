//! Visual layer
//!
//! Orbs are three fixed-size colored circles moved with a CSS transform.
//! `OrbSurface` is the seam between the animator's output and whatever shows
//! it; the browser implementation lives in `dom`.

#[cfg(target_arch = "wasm32")]
pub mod dom;

#[cfg(target_arch = "wasm32")]
pub use dom::DomSurface;

use crate::animator::{FrameOutput, OrbVisual};

/// Something that can show a frame of orbs
pub trait OrbSurface {
    fn apply(&mut self, frame: &FrameOutput);
}

/// CSS transform placing an orb element (anchored at its top-left corner)
pub fn transform_css(orb: &OrbVisual) -> String {
    let origin = orb.origin();
    format!("translate({:.2}px, {:.2}px) scale({:.4})", origin.x, origin.y, orb.scale)
}

/// CSS opacity value
pub fn opacity_css(orb: &OrbVisual) -> String {
    format!("{:.4}", orb.opacity.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::OrbClass;
    use glam::Vec2;

    #[test]
    fn test_transform_css() {
        let orb = OrbVisual {
            class: OrbClass::Pale,
            center: Vec2::new(500.0, 400.0),
            scale: 0.08,
            opacity: 0.5,
        };
        assert_eq!(transform_css(&orb), "translate(308.00px, 208.00px) scale(0.0800)");
        assert_eq!(opacity_css(&orb), "0.5000");
    }

    #[test]
    fn test_opacity_clamped() {
        let orb = OrbVisual {
            class: OrbClass::Coral,
            center: Vec2::ZERO,
            scale: 1.0,
            opacity: 1.2,
        };
        assert_eq!(opacity_css(&orb), "1.0000");
    }
}
