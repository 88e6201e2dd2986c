//! Per-body motion contributors for the simulation step
//!
//! - pairwise attraction applied as an incremental polar update,
//! - boundary policy (reflect or leave the arena),
//! - radial expansion overlay
//!
//! All of these act on one body at a time. Attraction is intentionally
//! one-sided: a body only changes its own speed and direction, the other
//! body accounts for the pair when its own update runs.

use crate::simulation::states::{Arena, Body, NVec2};

/// Attraction magnitude between two bodies, gravitational constant normalized to 1
pub fn attraction(a: &Body, b: &Body) -> f64 {
    let d2 = (b.x - a.x).norm_squared();
    a.mass * b.mass / d2
}

/// Direction (radians) from `a` toward `b`
pub fn angle_to(a: &Body, b: &Body) -> f64 {
    let r = b.x - a.x;
    r.y.atan2(r.x)
}

/// Apply the pull of `other` on `body` over `dt` seconds.
///
/// The force is split relative to the current heading:
/// the forward part changes `linear_speed`, the perpendicular part bends
/// `direction` with curvature `a_turn / speed`. A body at rest cannot be
/// turned by this term. Mutates `body` immediately, so sequential calls
/// for several neighbors depend on their order.
pub fn apply_attraction(body: &mut Body, other: &Body, dt: f64) {
    // F = m_self * m_other / d^2
    let f = attraction(body, other);

    // φ - θ: angle between the heading and the line to the other body
    let diff = angle_to(body, other) - body.direction;

    // Acceleration along and across the heading
    let a = f / body.mass;
    let a_forward = a * diff.cos();
    let a_turn = a * diff.sin();

    body.linear_speed += a_forward * dt;

    if body.linear_speed != 0.0 {
        body.direction += a_turn / body.linear_speed * dt;
    }
}

/// Which arena edges a body's bounding circle is crossing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeCrossing {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl EdgeCrossing {
    pub fn any(&self) -> bool {
        self.left || self.right || self.top || self.bottom
    }
}

pub fn edge_crossing(body: &Body, arena: &Arena) -> EdgeCrossing {
    EdgeCrossing {
        left: body.x.x - body.radius < 0.0,
        right: body.x.x + body.radius > arena.width,
        top: body.x.y - body.radius < 0.0,
        bottom: body.x.y + body.radius > arena.height,
    }
}

/// Reflect the heading off the crossed edges.
///
/// Left/right edges mirror the horizontal component (`π - θ`), top/bottom
/// mirror the vertical one (`-θ`). An axis is only mirrored while the body
/// still moves outward on it. Position is never clamped here.
pub fn reflect(body: &mut Body, crossing: EdgeCrossing) {
    let v = body.velocity();

    let out_x = (crossing.left && v.x < 0.0) || (crossing.right && v.x > 0.0);
    let out_y = (crossing.top && v.y < 0.0) || (crossing.bottom && v.y > 0.0);

    if out_x {
        body.direction = std::f64::consts::PI - body.direction;
    }
    if out_y {
        body.direction = -body.direction;
    }
}

/// Outward displacement over `dt` from uniform expansion about the arena center.
///
/// The body's offset is converted to a physical distance with
/// `length_to_physical`, scaled by `rate` into an outward speed and
/// converted back to arena units. Returns `None` for a body sitting exactly
/// on the center.
pub fn expansion_displacement(
    body: &Body,
    arena: &Arena,
    length_to_physical: f64,
    rate: f64,
    dt: f64,
) -> Option<NVec2> {
    let offset = body.x - arena.center();
    let distance = offset.norm();
    if distance == 0.0 {
        return None;
    }

    let physical_distance = distance * length_to_physical; // meters
    let outward_physical = rate * physical_distance; // meters per second
    let outward = outward_physical / length_to_physical; // arena units per second

    Some(offset / distance * outward * dt)
}
