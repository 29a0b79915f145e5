//! Per-frame driver
//!
//! One `Animator` per mounted backdrop. Each call to `advance` reads the
//! viewport and intents, remaps on resize, runs either the scripted transition
//! or fixed-rate physics, publishes body positions and returns what the visual
//! layer should show. Nothing here blocks or touches the platform.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::{MAX_FRAME_DELTA_MS, MAX_SUBSTEPS, ORB_COUNT};
use crate::feed::PositionSink;
use crate::motion::{Intents, ModeController, ModeKind, OrbPose, pose};
use crate::profile::AnimationProfile;
use crate::sim::{OrbClass, OrbSystem, Viewport};

/// Visual state of one orb for a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbVisual {
    pub class: OrbClass,
    /// Orb center in viewport pixels
    pub center: Vec2,
    pub scale: f32,
    pub opacity: f32,
}

impl OrbVisual {
    fn from_pose(class: OrbClass, pose: OrbPose) -> Self {
        Self {
            class,
            center: pose.center,
            scale: pose.scale,
            opacity: pose.opacity,
        }
    }

    /// Top-left corner of the unscaled orb element
    pub fn origin(&self) -> Vec2 {
        self.center - Vec2::splat(self.class.size() / 2.0)
    }
}

/// Everything the visual layer needs for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutput {
    pub orbs: [OrbVisual; ORB_COUNT],
    /// Container stacking order
    pub z_index: i32,
    pub mode: ModeKind,
}

pub struct Animator {
    profile: AnimationProfile,
    rng: Pcg32,
    system: OrbSystem,
    controller: ModeController,
    viewport: Viewport,
    accumulator_ms: f64,
    last_frame_ms: Option<f64>,
    sink: Option<Box<dyn PositionSink>>,
}

impl Animator {
    /// Seed a new animator for `viewport`
    pub fn new(viewport: Viewport, profile: AnimationProfile, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let system = OrbSystem::seeded(&viewport, &profile.physics, &mut rng);
        log::info!(
            "Orbs seeded ({}x{}, seed {}, {} profile)",
            viewport.width,
            viewport.height,
            seed,
            profile.preset.as_str()
        );
        Self {
            profile,
            rng,
            system,
            controller: ModeController::new(profile.motion),
            viewport,
            accumulator_ms: 0.0,
            last_frame_ms: None,
            sink: None,
        }
    }

    /// Publish positions to `sink` every frame
    pub fn with_sink(mut self, sink: impl PositionSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn mode(&self) -> ModeKind {
        self.controller.kind()
    }

    pub fn system(&self) -> &OrbSystem {
        &self.system
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn profile(&self) -> &AnimationProfile {
        &self.profile
    }

    /// Advance one display frame
    pub fn advance(&mut self, now_ms: f64, viewport: Viewport, intents: Intents) -> FrameOutput {
        if viewport.is_degenerate() {
            // Hidden host: freeze, and don't bank the gap as physics time
            self.last_frame_ms = Some(now_ms);
            let output = self.hold(now_ms);
            self.publish();
            return output;
        }

        if viewport != self.viewport {
            self.resize(viewport);
        }

        self.controller.sample(intents, now_ms, &self.system, &self.viewport);

        let poses = match self.controller.animate(now_ms, &self.viewport, &mut self.system) {
            Some(poses) => {
                self.accumulator_ms = 0.0;
                poses
            }
            None => {
                self.run_physics(now_ms);
                self.system.bodies.map(|b| OrbPose::free(b.pos))
            }
        };
        self.last_frame_ms = Some(now_ms);
        self.publish();

        self.compose(poses, now_ms)
    }

    fn resize(&mut self, to: Viewport) {
        let from = self.viewport;
        if from.is_degenerate() {
            // Seeded against nothing; start over on the first real viewport
            self.system = OrbSystem::seeded(&to, &self.profile.physics, &mut self.rng);
            log::debug!("Orbs reseeded for {}x{}", to.width, to.height);
        } else {
            self.system.remap(&from, &to);
            self.controller.remap(&from, &to);
            log::debug!(
                "Orbs remapped {}x{} -> {}x{}",
                from.width,
                from.height,
                to.width,
                to.height
            );
        }
        self.viewport = to;
    }

    /// Fixed-rate physics with an accumulator; the first frame takes one step
    fn run_physics(&mut self, now_ms: f64) {
        let physics = self.profile.physics;
        let step_ms = physics.step_ms();
        let delta = match self.last_frame_ms {
            Some(last) => (now_ms - last).clamp(0.0, MAX_FRAME_DELTA_MS),
            None => step_ms,
        };
        self.accumulator_ms += delta;

        let mut substeps = 0;
        while self.accumulator_ms >= step_ms && substeps < MAX_SUBSTEPS {
            self.system.step(&self.viewport, &physics);
            self.accumulator_ms -= step_ms;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            self.accumulator_ms = self.accumulator_ms.min(step_ms);
        }
    }

    /// Current poses without advancing anything
    fn hold(&self, now_ms: f64) -> FrameOutput {
        let scripted = self.controller.snapshot().and_then(|snapshot| {
            pose(
                self.controller.mode(),
                snapshot,
                now_ms,
                &self.viewport,
                &self.profile.motion,
            )
        });
        let poses = match scripted {
            Some(frame) => frame.poses,
            None => self.system.bodies.map(|b| OrbPose::free(b.pos)),
        };
        self.compose(poses, now_ms)
    }

    fn compose(&self, poses: [OrbPose; ORB_COUNT], now_ms: f64) -> FrameOutput {
        FrameOutput {
            orbs: std::array::from_fn(|i| OrbVisual::from_pose(self.system.bodies[i].class, poses[i])),
            z_index: self.controller.z_index(now_ms),
            mode: self.controller.kind(),
        }
    }

    fn publish(&self) {
        if let Some(sink) = &self.sink {
            sink.publish(self.system.positions());
        }
    }
}
