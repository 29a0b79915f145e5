//! Mode controller: owns the active mode and snapshot, applies intent edges
//! and timer completions.

use super::mode::{Intents, Mode, ModeKind, Snapshot};
use super::transition::{OrbPose, Trigger, condense_durations, pose, resolve};
use crate::consts::{ORB_COUNT, Z_BASE, Z_ELEVATED};
use crate::profile::MotionProfile;
use crate::sim::{OrbSystem, Viewport};

#[derive(Debug, Clone)]
pub struct ModeController {
    mode: Mode,
    snapshot: Option<Snapshot>,
    motion: MotionProfile,
}

impl ModeController {
    pub fn new(motion: MotionProfile) -> Self {
        Self {
            mode: Mode::Physics,
            snapshot: None,
            motion,
        }
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn kind(&self) -> ModeKind {
        self.mode.kind()
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// Apply the edge the current intents fire, if any. Raising an intent
    /// that is already honored, or clearing one that is not, changes nothing.
    /// Returns the new mode on a change.
    pub fn sample(
        &mut self,
        intents: Intents,
        now_ms: f64,
        system: &OrbSystem,
        viewport: &Viewport,
    ) -> Option<ModeKind> {
        let trigger = resolve(self.kind(), intents)?;
        let from = self.kind();

        self.mode = match trigger {
            Trigger::Condense => {
                let snapshot = Snapshot::capture(system);
                let durations_ms = condense_durations(&snapshot, viewport, &self.motion);
                self.snapshot = Some(snapshot);
                Mode::Condensing {
                    started_ms: now_ms,
                    durations_ms,
                    elevate_at_ms: now_ms + self.motion.elevate_delay_ms,
                }
            }
            Trigger::Expand => Mode::Expanding { started_ms: now_ms },
            Trigger::Disperse => {
                // Coming out of a condense the bodies never moved, so the
                // existing snapshot is still current
                if from == ModeKind::Physics || self.snapshot.is_none() {
                    self.snapshot = Some(Snapshot::capture(system));
                }
                Mode::Dispersing { started_ms: now_ms }
            }
            Trigger::Reconverge => Mode::Reconverging { started_ms: now_ms },
        };

        log::debug!("orbs: {} -> {}", from.as_str(), self.kind().as_str());
        Some(self.kind())
    }

    /// Scripted poses for this frame, advancing timed modes on completion.
    /// Returning to physics restores the snapshot into `system`.
    /// `None` while under free physics.
    pub fn animate(
        &mut self,
        now_ms: f64,
        viewport: &Viewport,
        system: &mut OrbSystem,
    ) -> Option<[OrbPose; ORB_COUNT]> {
        if self.mode == Mode::Physics {
            return None;
        }
        if self.snapshot.is_none() {
            self.snapshot = Some(Snapshot::capture(system));
        }
        let snapshot = self.snapshot?;
        let frame = pose(&self.mode, &snapshot, now_ms, viewport, &self.motion)?;

        if frame.finished {
            let from = self.kind();
            self.mode = match self.mode {
                Mode::Condensing { elevate_at_ms, .. } => Mode::Condensed { elevate_at_ms },
                Mode::Dispersing { .. } => Mode::Dispersed,
                Mode::Expanding { .. } | Mode::Reconverging { .. } => {
                    snapshot.restore_into(system);
                    Mode::Physics
                }
                held => held,
            };
            log::debug!("orbs: {} -> {}", from.as_str(), self.kind().as_str());
        }

        Some(frame.poses)
    }

    /// Container stacking order for this frame
    pub fn z_index(&self, now_ms: f64) -> i32 {
        match self.mode {
            Mode::Condensing { elevate_at_ms, .. } | Mode::Condensed { elevate_at_ms } => {
                if now_ms >= elevate_at_ms {
                    Z_ELEVATED
                } else {
                    Z_BASE
                }
            }
            Mode::Expanding { .. } => Z_ELEVATED,
            _ => Z_BASE,
        }
    }

    /// Move the snapshot along with a viewport resize
    pub fn remap(&mut self, from: &Viewport, to: &Viewport) {
        if let Some(snapshot) = self.snapshot.as_mut() {
            *snapshot = snapshot.remapped(from, to);
        }
    }
}
