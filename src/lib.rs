//! Floating Orbs - three-body gravitational backdrop for the landing page
//!
//! Core modules:
//! - `sim`: Body simulator (seeding, softened gravity, Verlet integration, resize remap)
//! - `motion`: Mode controller (condense/expand/disperse/reconverge state machine)
//! - `animator`: Per-frame driver tying the simulator and controller together
//! - `render`: Visual surface abstraction (DOM on web)
//! - `frame_loop`: Redraw scheduling with guaranteed cancellation
//! - `feed`: Live position feed for other page components
//! - `profile`: Tunable physics/animation constants

pub mod animator;
pub mod error;
pub mod feed;
pub mod frame_loop;
pub mod gate;
pub mod glow;
pub mod motion;
pub mod profile;
pub mod render;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use animator::{Animator, FrameOutput};
pub use error::{GateError, OrbError};
pub use feed::{FeedReader, LiveFeed, PositionSink};
pub use motion::{Intents, ModeKind};
pub use profile::{AnimationProfile, ProfilePreset};
pub use sim::Viewport;

/// Animator configuration constants
pub mod consts {
    /// Number of simulated bodies (and rendered orbs)
    pub const ORB_COUNT: usize = 3;
    /// Maximum physics substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Frame delta cap (ms); longer gaps (background tabs) are truncated
    pub const MAX_FRAME_DELTA_MS: f64 = 100.0;
    /// Container stacking order while orbs sit behind page content
    pub const Z_BASE: i32 = 0;
    /// Container stacking order while orbs front the modal backdrop
    pub const Z_ELEVATED: i32 = 95;
}
