//! Pure transition rules
//!
//! `resolve` maps (mode, intents) to an intent-driven edge; `pose` maps
//! (mode, snapshot, time, viewport) to each orb's on-screen pose and whether
//! the scripted transition has run its course. Neither touches any state.

use glam::Vec2;

use super::ease::{ease_out_cubic, fade_in, fade_out, flash, lerp, progress};
use super::mode::{Intents, Mode, ModeKind, Snapshot};
use crate::consts::ORB_COUNT;
use crate::profile::MotionProfile;
use crate::sim::Viewport;

/// Intent-driven edge out of the current mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// physics -> condensing
    Condense,
    /// condensing/condensed -> expanding
    Expand,
    /// physics or condensing/condensed -> dispersing
    Disperse,
    /// dispersed -> reconverging
    Reconverge,
}

/// Which edge, if any, the current intents fire. Dispersal wins whenever
/// both intents are up.
pub fn resolve(mode: ModeKind, intents: Intents) -> Option<Trigger> {
    match mode {
        ModeKind::Physics if intents.dispersing => Some(Trigger::Disperse),
        ModeKind::Physics if intents.condensing => Some(Trigger::Condense),
        ModeKind::Condensing | ModeKind::Condensed if !intents.condensing => {
            if intents.dispersing {
                Some(Trigger::Disperse)
            } else {
                Some(Trigger::Expand)
            }
        }
        ModeKind::Dispersed if !intents.dispersing => Some(Trigger::Reconverge),
        _ => None,
    }
}

/// One orb's visual state for a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbPose {
    /// Orb center in viewport pixels
    pub center: Vec2,
    pub scale: f32,
    pub opacity: f32,
}

impl OrbPose {
    /// Pose of an orb under free physics
    pub fn free(center: Vec2) -> Self {
        Self { center, scale: 1.0, opacity: 1.0 }
    }
}

/// Poses for a scripted frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseFrame {
    pub poses: [OrbPose; ORB_COUNT],
    /// The timed part of the transition is complete
    pub finished: bool,
}

/// Per-orb condense duration: orbs nearer the center arrive sooner
pub fn condense_durations(
    snapshot: &Snapshot,
    viewport: &Viewport,
    motion: &MotionProfile,
) -> [f64; ORB_COUNT] {
    let center = viewport.center();
    let dists = snapshot.orbs.map(|o| o.pos.distance(center));
    let max_dist = dists.iter().copied().fold(1.0f32, f32::max);
    dists.map(|d| motion.condense_base_ms + (d / max_dist) as f64 * motion.condense_extra_ms)
}

/// Scripted poses for `mode`. Free physics has no scripted pose.
pub fn pose(
    mode: &Mode,
    snapshot: &Snapshot,
    now_ms: f64,
    viewport: &Viewport,
    motion: &MotionProfile,
) -> Option<PoseFrame> {
    let center = viewport.center();
    let min_scale = motion.min_scale;

    let frame = match *mode {
        Mode::Physics => return None,

        Mode::Condensing { started_ms, durations_ms, .. } => {
            let elapsed = now_ms - started_ms;
            let mut finished = true;
            let poses = std::array::from_fn(|i| {
                let raw = progress(elapsed, durations_ms[i]);
                if raw < 1.0 {
                    finished = false;
                }
                condense_pose(snapshot.orbs[i].pos, center, ease_out_cubic(raw), motion)
            });
            PoseFrame { poses, finished }
        }

        Mode::Condensed { .. } => PoseFrame {
            poses: snapshot.orbs.map(|o| condense_pose(o.pos, center, 1.0, motion)),
            finished: false,
        },

        Mode::Expanding { started_ms } => {
            let raw = progress(now_ms - started_ms, motion.expand_ms);
            let t = ease_out_cubic(raw);
            let poses = snapshot.orbs.map(|o| OrbPose {
                center: center.lerp(o.pos, t),
                scale: lerp(min_scale, 1.0, t),
                opacity: fade_in(t, motion.expand_fade_end),
            });
            PoseFrame { poses, finished: raw >= 1.0 }
        }

        Mode::Dispersing { started_ms } => {
            let raw = progress(now_ms - started_ms, motion.disperse_ms);
            let t = ease_out_cubic(raw);
            let poses = snapshot.orbs.map(|o| OrbPose {
                center: center + (o.pos - center) * motion.overshoot * t,
                scale: lerp(min_scale, motion.disperse_peak_scale, t),
                opacity: flash(t, motion.disperse_flash_end, motion.disperse_flash_opacity),
            });
            PoseFrame { poses, finished: raw >= 1.0 }
        }

        Mode::Dispersed => PoseFrame {
            poses: snapshot.orbs.map(|o| OrbPose {
                center: overshoot_point(o.pos, center, motion),
                scale: motion.disperse_peak_scale,
                opacity: 0.0,
            }),
            finished: false,
        },

        Mode::Reconverging { started_ms } => {
            let raw = progress(now_ms - started_ms, motion.reconverge_ms);
            let t = ease_out_cubic(raw);
            let poses = snapshot.orbs.map(|o| OrbPose {
                center: overshoot_point(o.pos, center, motion).lerp(o.pos, t),
                scale: lerp(motion.disperse_peak_scale, 1.0, t),
                opacity: t,
            });
            PoseFrame { poses, finished: raw >= 1.0 }
        }
    };

    Some(frame)
}

fn condense_pose(from: Vec2, center: Vec2, t: f32, motion: &MotionProfile) -> OrbPose {
    OrbPose {
        center: from.lerp(center, t),
        scale: 1.0 - t * (1.0 - motion.min_scale),
        opacity: fade_out(t, motion.condense_fade_end),
    }
}

#[inline]
fn overshoot_point(pos: Vec2, center: Vec2, motion: &MotionProfile) -> Vec2 {
    center + (pos - center) * motion.overshoot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::mode::CapturedOrb;

    fn snapshot() -> Snapshot {
        let orb = |x: f32, y: f32| CapturedOrb {
            pos: Vec2::new(x, y),
            vel: Vec2::new(1.0, -1.0),
            size: 320.0,
        };
        Snapshot {
            orbs: [orb(700.0, 400.0), orb(500.0, 300.0), orb(200.0, 800.0)],
        }
    }

    #[test]
    fn test_resolve_table() {
        let none = Intents::new(false, false);
        let condense = Intents::new(true, false);
        let disperse = Intents::new(false, true);
        let both = Intents::new(true, true);

        assert_eq!(resolve(ModeKind::Physics, none), None);
        assert_eq!(resolve(ModeKind::Physics, condense), Some(Trigger::Condense));
        assert_eq!(resolve(ModeKind::Physics, disperse), Some(Trigger::Disperse));
        assert_eq!(resolve(ModeKind::Physics, both), Some(Trigger::Disperse));

        assert_eq!(resolve(ModeKind::Condensing, condense), None);
        assert_eq!(resolve(ModeKind::Condensed, none), Some(Trigger::Expand));
        assert_eq!(resolve(ModeKind::Condensing, none), Some(Trigger::Expand));
        assert_eq!(resolve(ModeKind::Condensed, disperse), Some(Trigger::Disperse));
        assert_eq!(resolve(ModeKind::Condensed, both), None);

        assert_eq!(resolve(ModeKind::Dispersed, disperse), None);
        assert_eq!(resolve(ModeKind::Dispersed, none), Some(Trigger::Reconverge));
        assert_eq!(resolve(ModeKind::Dispersing, none), None);

        for busy in [ModeKind::Expanding, ModeKind::Reconverging] {
            for intents in [none, condense, disperse, both] {
                assert_eq!(resolve(busy, intents), None);
            }
        }
    }

    #[test]
    fn test_condense_durations_scale_with_distance() {
        let motion = MotionProfile::default();
        let viewport = Viewport::new(1000.0, 800.0);
        let d = condense_durations(&snapshot(), &viewport, &motion);

        // Orb 2 is farthest: base + extra. Orb 1 is 100 px from center.
        assert!((d[2] - 700.0).abs() < 1e-6);
        assert!(d[1] < d[0] && d[0] < d[2]);
        assert!(d.iter().all(|&ms| ms >= 400.0));
    }

    #[test]
    fn test_condense_durations_all_at_center() {
        let motion = MotionProfile::default();
        let viewport = Viewport::new(1000.0, 800.0);
        let mut snap = snapshot();
        for orb in &mut snap.orbs {
            orb.pos = viewport.center();
        }
        let d = condense_durations(&snap, &viewport, &motion);
        assert_eq!(d, [400.0; ORB_COUNT]);
    }

    #[test]
    fn test_expand_starts_at_center_and_ends_at_snapshot() {
        let motion = MotionProfile::default();
        let viewport = Viewport::new(1000.0, 800.0);
        let snap = snapshot();
        let mode = Mode::Expanding { started_ms: 1000.0 };

        let start = pose(&mode, &snap, 1000.0, &viewport, &motion).unwrap();
        assert!(!start.finished);
        for p in &start.poses {
            assert_eq!(p.center, viewport.center());
            assert!((p.scale - motion.min_scale).abs() < 1e-6);
            assert_eq!(p.opacity, 0.0);
        }

        let end = pose(&mode, &snap, 1500.0, &viewport, &motion).unwrap();
        assert!(end.finished);
        for (p, o) in end.poses.iter().zip(snap.orbs.iter()) {
            assert!((p.center - o.pos).length() < 1e-3);
            assert!((p.scale - 1.0).abs() < 1e-6);
            assert_eq!(p.opacity, 1.0);
        }
    }

    #[test]
    fn test_disperse_overshoots() {
        let motion = MotionProfile::default();
        let viewport = Viewport::new(1000.0, 800.0);
        let snap = snapshot();
        let mode = Mode::Dispersing { started_ms: 0.0 };

        let end = pose(&mode, &snap, 700.0, &viewport, &motion).unwrap();
        assert!(end.finished);
        // Orb 0 sits 200 px right of center; ends 360 px right
        assert!((end.poses[0].center - Vec2::new(860.0, 400.0)).length() < 1e-3);
        assert!((end.poses[0].scale - 1.3).abs() < 1e-6);
        assert_eq!(end.poses[0].opacity, 0.0);

        let mid = pose(&mode, &snap, 20.0, &viewport, &motion).unwrap();
        assert!(mid.poses[0].opacity > 0.0 && mid.poses[0].opacity <= 0.5);
    }

    #[test]
    fn test_reconverge_lands_on_snapshot() {
        let motion = MotionProfile::default();
        let viewport = Viewport::new(1000.0, 800.0);
        let snap = snapshot();
        let mode = Mode::Reconverging { started_ms: 0.0 };

        let start = pose(&mode, &snap, 0.0, &viewport, &motion).unwrap();
        assert!((start.poses[0].center - Vec2::new(860.0, 400.0)).length() < 1e-3);
        assert_eq!(start.poses[0].opacity, 0.0);

        let end = pose(&mode, &snap, 600.0, &viewport, &motion).unwrap();
        assert!(end.finished);
        for (p, o) in end.poses.iter().zip(snap.orbs.iter()) {
            assert!((p.center - o.pos).length() < 1e-3);
            assert_eq!(p.opacity, 1.0);
        }
    }

    #[test]
    fn test_physics_has_no_scripted_pose() {
        let motion = MotionProfile::default();
        let viewport = Viewport::new(1000.0, 800.0);
        assert!(pose(&Mode::Physics, &snapshot(), 0.0, &viewport, &motion).is_none());
    }
}
