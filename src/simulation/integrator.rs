//! Kinematic integration in polar form
//!
//! Advances a body along its heading with explicit Euler, then rotates the
//! heading by the body's own angular speed.

use super::states::{Body, NVec2};

/// Advance `body` by `dt` seconds.
/// Dead and fixed bodies are left untouched.
pub fn polar_euler(body: &mut Body, dt: f64) {
    if !body.is_alive || body.is_fixed {
        return;
    }

    // x_n+1 = x_n + v (cos θ, sin θ) dt
    body.x += NVec2::new(body.direction.cos(), body.direction.sin()) * body.linear_speed * dt;

    // θ_n+1 = θ_n + ω dt
    body.direction += body.angular_speed * dt;
}
