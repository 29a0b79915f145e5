//! Bodies and their display classes

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::ORB_COUNT;

/// Display class of an orb (size and tint), fixed by index for the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrbClass {
    Pale,
    Gold,
    Coral,
}

/// Class assigned to each body index
pub const ORB_CLASSES: [OrbClass; ORB_COUNT] = [OrbClass::Pale, OrbClass::Gold, OrbClass::Coral];

impl OrbClass {
    /// Orb diameter (px)
    pub fn size(&self) -> f32 {
        match self {
            OrbClass::Pale => 384.0,
            OrbClass::Gold => 320.0,
            OrbClass::Coral => 288.0,
        }
    }

    /// CSS background color
    pub fn color(&self) -> &'static str {
        match self {
            OrbClass::Pale => "rgba(229, 214, 148, 0.4)",
            OrbClass::Gold => "rgba(203, 174, 44, 0.4)",
            OrbClass::Coral => "rgba(255, 138, 94, 0.4)",
        }
    }

    /// Diameter of the matching glow inside the sign-up modal (px)
    pub fn glow_size(&self) -> f32 {
        match self {
            OrbClass::Pale => 300.0,
            OrbClass::Gold => 260.0,
            OrbClass::Coral => 240.0,
        }
    }

    /// CSS gradient of the matching modal glow
    pub fn glow_gradient(&self) -> &'static str {
        match self {
            OrbClass::Pale => {
                "radial-gradient(circle, rgba(229,214,148,0.92) 0%, rgba(229,214,148,0) 70%)"
            }
            OrbClass::Gold => {
                "radial-gradient(circle, rgba(203,174,44,0.92) 0%, rgba(203,174,44,0) 70%)"
            }
            OrbClass::Coral => {
                "radial-gradient(circle, rgba(255,138,94,0.92) 0%, rgba(255,138,94,0) 70%)"
            }
        }
    }
}

/// A simulated point mass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub class: OrbClass,
}

impl Body {
    pub fn new(pos: Vec2, vel: Vec2, class: OrbClass) -> Self {
        Self { pos, vel, class }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    pub fn is_finite(&self) -> bool {
        self.pos.is_finite() && self.vel.is_finite()
    }
}
