//! Animator modes, intents and the transition snapshot

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::ORB_COUNT;
use crate::sim::{Body, OrbSystem, Viewport};

/// Requests from the page shell, sampled once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Intents {
    /// A modal wants the orbs gathered (and hidden) at the center
    pub condensing: bool,
    /// A full-screen view wants the orbs pushed off-screen
    pub dispersing: bool,
}

impl Intents {
    pub fn new(condensing: bool, dispersing: bool) -> Self {
        Self { condensing, dispersing }
    }
}

/// Which mode is active, without per-mode data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeKind {
    Physics,
    Condensing,
    Condensed,
    Expanding,
    Dispersing,
    Dispersed,
    Reconverging,
}

impl ModeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModeKind::Physics => "physics",
            ModeKind::Condensing => "condensing",
            ModeKind::Condensed => "condensed",
            ModeKind::Expanding => "expanding",
            ModeKind::Dispersing => "dispersing",
            ModeKind::Dispersed => "dispersed",
            ModeKind::Reconverging => "reconverging",
        }
    }

    /// Orbs sit on top of page content (modal focus)
    pub fn wants_elevation(&self) -> bool {
        matches!(self, ModeKind::Condensing | ModeKind::Condensed | ModeKind::Expanding)
    }
}

/// Active mode with the timers it needs
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    /// Free integration
    Physics,
    /// Moving toward the center, each orb on its own timer
    Condensing {
        started_ms: f64,
        durations_ms: [f64; ORB_COUNT],
        elevate_at_ms: f64,
    },
    /// Held at the center
    Condensed { elevate_at_ms: f64 },
    /// Returning from the center to the snapshot
    Expanding { started_ms: f64 },
    /// Flying out past the snapshot
    Dispersing { started_ms: f64 },
    /// Invisible, parked at the overshoot position
    Dispersed,
    /// Flying back in from the overshoot position
    Reconverging { started_ms: f64 },
}

impl Mode {
    pub fn kind(&self) -> ModeKind {
        match self {
            Mode::Physics => ModeKind::Physics,
            Mode::Condensing { .. } => ModeKind::Condensing,
            Mode::Condensed { .. } => ModeKind::Condensed,
            Mode::Expanding { .. } => ModeKind::Expanding,
            Mode::Dispersing { .. } => ModeKind::Dispersing,
            Mode::Dispersed => ModeKind::Dispersed,
            Mode::Reconverging { .. } => ModeKind::Reconverging,
        }
    }
}

/// Captured state of one body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapturedOrb {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Display diameter (px)
    pub size: f32,
}

/// Immutable capture of all bodies when free physics is left
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub orbs: [CapturedOrb; ORB_COUNT],
}

impl Snapshot {
    pub fn capture(system: &OrbSystem) -> Self {
        Self {
            orbs: system.bodies.map(|b| CapturedOrb {
                pos: b.pos,
                vel: b.vel,
                size: b.class.size(),
            }),
        }
    }

    /// Copy with positions moved to the new viewport
    pub fn remapped(&self, from: &Viewport, to: &Viewport) -> Self {
        Self {
            orbs: self.orbs.map(|o| CapturedOrb {
                pos: from.remap(o.pos, to),
                ..o
            }),
        }
    }

    /// Put every body back where (and how fast) it was at capture
    pub fn restore_into(&self, system: &mut OrbSystem) {
        for (body, orb) in system.bodies.iter_mut().zip(self.orbs.iter()) {
            restore_body(body, orb);
        }
    }
}

#[inline]
fn restore_body(body: &mut Body, orb: &CapturedOrb) {
    body.pos = orb.pos;
    body.vel = orb.vel;
}
