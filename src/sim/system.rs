//! The three-body system: seeding, integration and resize remapping

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::body::{Body, ORB_CLASSES};
use super::gravity::accelerations;
use super::viewport::Viewport;
use crate::consts::ORB_COUNT;
use crate::profile::PhysicsProfile;

/// All simulated bodies of one animator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrbSystem {
    pub bodies: [Body; ORB_COUNT],
    /// Physics steps taken since seeding
    pub steps: u64,
}

impl OrbSystem {
    /// Seed a symmetric triangle around the viewport center with near-circular
    /// tangential velocities and zero net momentum.
    pub fn seeded<R: Rng>(viewport: &Viewport, physics: &PhysicsProfile, rng: &mut R) -> Self {
        let center = viewport.center();
        let radius = viewport.min_side() * physics.spawn_radius_frac;
        let base_angle = rng.random::<f32>() * std::f32::consts::TAU;

        // Floor keeps a zero-size viewport from producing an infinite speed
        let side = (radius * 3.0f32.sqrt()).max(1.0);
        let orbital_speed = (physics.g * physics.mass / side).sqrt() * physics.orbital_speed_factor;
        let jitter = orbital_speed * physics.jitter_frac;

        let mut bodies: [Body; ORB_COUNT] = std::array::from_fn(|i| {
            let angle = base_angle + i as f32 * std::f32::consts::TAU / ORB_COUNT as f32;
            let radial = Vec2::from_angle(angle);
            let tangent = radial.perp();
            let noise = Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5) * jitter;
            Body::new(center + radial * radius, tangent * orbital_speed + noise, ORB_CLASSES[i])
        });

        let mean = mean_velocity(&bodies);
        for body in &mut bodies {
            body.vel -= mean;
        }

        Self { bodies, steps: 0 }
    }

    /// Advance one velocity-Verlet step (kick, drift, kick), then damp and
    /// clamp speed.
    pub fn step(&mut self, viewport: &Viewport, physics: &PhysicsProfile) {
        let dt = physics.dt;
        let half_dt = 0.5 * dt;

        let a_old = accelerations(&self.bodies, viewport, physics);
        for (b, a) in self.bodies.iter_mut().zip(a_old.iter()) {
            b.vel += *a * half_dt;
        }
        for b in self.bodies.iter_mut() {
            b.pos += b.vel * dt;
        }

        let a_new = accelerations(&self.bodies, viewport, physics);
        for (b, a) in self.bodies.iter_mut().zip(a_new.iter()) {
            b.vel += *a * half_dt;
            b.vel *= physics.damping;
            b.vel = clamp_speed(b.vel, physics.max_speed);
        }

        self.steps += 1;
    }

    /// Keep every body at the same center-relative place across a resize
    pub fn remap(&mut self, from: &Viewport, to: &Viewport) {
        for body in &mut self.bodies {
            body.pos = from.remap(body.pos, to);
        }
    }

    pub fn positions(&self) -> [Vec2; ORB_COUNT] {
        self.bodies.map(|b| b.pos)
    }

    pub fn mean_velocity(&self) -> Vec2 {
        mean_velocity(&self.bodies)
    }

    pub fn is_finite(&self) -> bool {
        self.bodies.iter().all(Body::is_finite)
    }
}

fn mean_velocity(bodies: &[Body; ORB_COUNT]) -> Vec2 {
    bodies.iter().map(|b| b.vel).sum::<Vec2>() / ORB_COUNT as f32
}

/// Rescale `vel` to `max_speed` if it is faster, keeping direction
#[inline]
pub fn clamp_speed(vel: Vec2, max_speed: f32) -> Vec2 {
    let speed = vel.length();
    if speed > max_speed {
        vel * (max_speed / speed)
    } else {
        vel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn seeded(seed: u64, viewport: &Viewport) -> OrbSystem {
        let mut rng = Pcg32::seed_from_u64(seed);
        OrbSystem::seeded(viewport, &PhysicsProfile::default(), &mut rng)
    }

    #[test]
    fn test_seed_zero_momentum() {
        for seed in [1, 7, 42, 12345] {
            let sys = seeded(seed, &Viewport::new(1280.0, 720.0));
            assert!(sys.mean_velocity().length() < 1e-5, "seed {}", seed);
        }
    }

    #[test]
    fn test_seed_triangle() {
        let viewport = Viewport::new(1000.0, 800.0);
        let sys = seeded(2024, &viewport);
        let center = Vec2::new(500.0, 400.0);

        for body in &sys.bodies {
            assert!(((body.pos - center).length() - 176.0).abs() < 1e-3);
        }
        // Equilateral: all sides equal to radius * sqrt(3)
        let side = 176.0 * 3.0f32.sqrt();
        for i in 0..ORB_COUNT {
            let j = (i + 1) % ORB_COUNT;
            let d = (sys.bodies[i].pos - sys.bodies[j].pos).length();
            assert!((d - side).abs() < 1e-2);
        }
        assert_eq!(sys.bodies.map(|b| b.class), ORB_CLASSES);
    }

    #[test]
    fn test_seed_deterministic() {
        let viewport = Viewport::new(1000.0, 800.0);
        let a = seeded(99, &viewport);
        let b = seeded(99, &viewport);
        assert_eq!(a.bodies, b.bodies);
    }

    #[test]
    fn test_one_step_displacement_bound() {
        let viewport = Viewport::new(1000.0, 800.0);
        let physics = PhysicsProfile::default();
        let mut sys = seeded(7, &viewport);
        let before = sys.positions();

        sys.step(&viewport, &physics);

        for (b, p) in sys.bodies.iter().zip(before.iter()) {
            assert!((b.pos - *p).length() <= physics.max_speed * physics.dt + 1e-4);
        }
        assert_eq!(sys.steps, 1);
    }

    #[test]
    fn test_clamp_speed_preserves_direction() {
        let v = clamp_speed(Vec2::new(30.0, 40.0), 5.0);
        assert!((v - Vec2::new(3.0, 4.0)).length() < 1e-5);
        assert_eq!(clamp_speed(Vec2::new(1.0, 1.0), 5.0), Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_long_run_stays_finite() {
        let viewport = Viewport::new(1440.0, 900.0);
        let physics = PhysicsProfile::default();
        let mut sys = seeded(31337, &viewport);
        for _ in 0..10_000 {
            sys.step(&viewport, &physics);
            assert!(sys.is_finite());
        }
    }

    #[test]
    fn test_close_encounter_stays_bounded() {
        let viewport = Viewport::new(800.0, 600.0);
        let physics = PhysicsProfile::default();
        let mut sys = seeded(3, &viewport);
        let c = viewport.center();
        sys.bodies[0].pos = c;
        sys.bodies[1].pos = c + Vec2::new(0.01, 0.0);
        sys.bodies[0].vel = Vec2::new(50.0, 0.0);

        sys.step(&viewport, &physics);
        assert!(sys.is_finite());
        assert!(sys.bodies.iter().all(|b| b.speed() <= physics.max_speed + 1e-4));
    }

    proptest! {
        #[test]
        fn prop_speed_never_exceeds_cap(
            seed in any::<u64>(),
            w in 320.0f32..2560.0,
            h in 320.0f32..1600.0,
            steps in 1usize..400,
        ) {
            let viewport = Viewport::new(w, h);
            let physics = PhysicsProfile::default();
            let mut sys = seeded(seed, &viewport);
            for _ in 0..steps {
                sys.step(&viewport, &physics);
                for body in &sys.bodies {
                    prop_assert!(body.speed() <= physics.max_speed + 1e-4);
                }
            }
        }

        #[test]
        fn prop_resize_preserves_relative_position(
            seed in any::<u64>(),
            w in 200.0f32..3000.0,
            h in 200.0f32..3000.0,
            w2 in 200.0f32..3000.0,
            h2 in 200.0f32..3000.0,
        ) {
            let from = Viewport::new(w, h);
            let to = Viewport::new(w2, h2);
            let mut sys = seeded(seed, &from);
            let before = sys.bodies.map(|b| from.relative(b.pos));

            sys.remap(&from, &to);

            for (body, rel) in sys.bodies.iter().zip(before.iter()) {
                prop_assert!((to.relative(body.pos) - *rel).length() < 1e-4);
            }
        }
    }
}
