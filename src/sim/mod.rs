//! Body simulator
//!
//! Pure and deterministic given a seeded RNG:
//! - Fixed step size from the physics profile
//! - Stable body order (by index; index also picks the orb class)
//! - No rendering or platform dependencies

pub mod body;
pub mod gravity;
pub mod system;
pub mod viewport;

pub use body::{Body, ORB_CLASSES, OrbClass};
pub use gravity::accelerations;
pub use system::{OrbSystem, clamp_speed};
pub use viewport::Viewport;
