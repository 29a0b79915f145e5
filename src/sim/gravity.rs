//! Acceleration terms: softened mutual gravity and soft walls

use glam::Vec2;

use super::body::Body;
use super::viewport::Viewport;
use crate::consts::ORB_COUNT;
use crate::profile::PhysicsProfile;

/// Total acceleration on every body
pub fn accelerations(
    bodies: &[Body; ORB_COUNT],
    viewport: &Viewport,
    physics: &PhysicsProfile,
) -> [Vec2; ORB_COUNT] {
    let mut acc = [Vec2::ZERO; ORB_COUNT];
    add_gravity(bodies, physics, &mut acc);
    add_boundary(bodies, viewport, physics, &mut acc);
    acc
}

/// Softened pairwise gravity. The softening term keeps the denominator
/// positive even when two bodies coincide.
pub fn add_gravity(bodies: &[Body; ORB_COUNT], physics: &PhysicsProfile, acc: &mut [Vec2; ORB_COUNT]) {
    let gm = physics.g * physics.mass;
    let soft2 = physics.softening * physics.softening;
    for i in 0..ORB_COUNT {
        for j in (i + 1)..ORB_COUNT {
            let d = bodies[j].pos - bodies[i].pos;
            let soft_sq = d.length_squared() + soft2;
            let magnitude = gm / (soft_sq * soft_sq.sqrt());
            let f = d * magnitude;
            acc[i] += f;
            acc[j] -= f;
        }
    }
}

/// Linear spring pushing bodies back once they enter the edge margin
pub fn add_boundary(
    bodies: &[Body; ORB_COUNT],
    viewport: &Viewport,
    physics: &PhysicsProfile,
    acc: &mut [Vec2; ORB_COUNT],
) {
    let margin = physics.boundary_margin;
    let k = physics.boundary_force;
    for (body, a) in bodies.iter().zip(acc.iter_mut()) {
        a.x += wall_push(body.pos.x, viewport.width, margin, k);
        a.y += wall_push(body.pos.y, viewport.height, margin, k);
    }
}

#[inline]
fn wall_push(coord: f32, extent: f32, margin: f32, k: f32) -> f32 {
    if coord < margin {
        k * (margin - coord)
    } else if coord > extent - margin {
        -k * (coord - (extent - margin))
    } else {
        0.0
    }
}
