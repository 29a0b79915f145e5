//! Mode controller
//!
//! Decides each frame whether orbs follow free physics or a scripted
//! transition (condense, expand, disperse, reconverge). Transition rules are
//! pure functions in `transition`; `ModeController` holds the state.

pub mod controller;
pub mod ease;
pub mod mode;
pub mod transition;

pub use controller::ModeController;
pub use ease::ease_out_cubic;
pub use mode::{CapturedOrb, Intents, Mode, ModeKind, Snapshot};
pub use transition::{OrbPose, PoseFrame, Trigger, pose, resolve};
