//! Core state types for the body simulation.
//!
//! Defines the 2D body struct and the small value types it carries:
//! - `Body`      position, polar velocity, mass/radius and lifecycle flags
//! - `BodyId`    stable identifier handed out by the owning `World`
//! - `BodyColor` HSL color read by the renderer
//! - `Trail`     bounded ring buffer of recent positions
//!
//! Velocity is kept in polar form (`linear_speed` + `direction`), positions
//! and momenta use `NVec2`.

use std::collections::VecDeque;

use nalgebra::Vector2;
use rand::Rng;
use serde::Deserialize;

pub type NVec2 = Vector2<f64>;

/// Identifier of a body inside its `World`.
/// Only used for removal lookups, never for ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct BodyId(pub u64);

/// HSL color, hue in degrees, saturation and lightness in percent
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct BodyColor {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl BodyColor {
    pub fn hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self { hue, saturation, lightness }
    }

    /// Random hue at saturation 90 and lightness 60
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::hsl(rng.gen_range(0.0..360.0), 90.0, 60.0)
    }
}

/// Recent positions of a body, oldest first.
#[derive(Debug, Clone, Default)]
pub struct Trail {
    points: VecDeque<NVec2>,
}

impl Trail {
    /// Push a point and evict the oldest ones until at most `capacity` remain.
    /// A capacity of zero clears the trail.
    pub fn record(&mut self, point: NVec2, capacity: usize) {
        if capacity == 0 {
            self.points.clear();
            return;
        }
        self.points.push_back(point);
        while self.points.len() > capacity {
            self.points.pop_front();
        }
    }

    pub fn points(&self) -> impl ExactSizeIterator<Item = &NVec2> + '_ {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

#[derive(Debug, Clone)]
pub struct Body {
    pub(crate) id: BodyId,
    pub x: NVec2, // position, arena units
    pub linear_speed: f64, // arena units per second, along `direction`
    pub direction: f64, // radians
    pub angular_speed: f64, // radians per second, rotates `direction`
    pub radius: f64,
    pub mass: f64,
    pub color: BodyColor,
    pub is_fixed: bool,
    pub(crate) is_alive: bool,
    pub(crate) trail: Trail,
}

impl Body {
    /// Body at rest with mass derived from `density * radius^3` and a random color
    pub fn new(x: f64, y: f64, radius: f64, density: f64) -> Self {
        Self {
            id: BodyId::default(),
            x: NVec2::new(x, y),
            linear_speed: 0.0,
            direction: 0.0,
            angular_speed: 0.0,
            radius,
            mass: density * radius.powi(3),
            color: BodyColor::random(&mut rand::thread_rng()),
            is_fixed: false,
            is_alive: true,
            trail: Trail::default(),
        }
    }

    pub fn with_velocity(mut self, linear_speed: f64, direction: f64) -> Self {
        self.linear_speed = linear_speed;
        self.direction = direction;
        self
    }

    pub fn with_angular_speed(mut self, angular_speed: f64) -> Self {
        self.angular_speed = angular_speed;
        self
    }

    pub fn with_color(mut self, color: BodyColor) -> Self {
        self.color = color;
        self
    }

    pub fn fixed(mut self) -> Self {
        self.is_fixed = true;
        self
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn is_alive(&self) -> bool {
        self.is_alive
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    /// Cartesian velocity from the polar form
    pub fn velocity(&self) -> NVec2 {
        NVec2::new(
            self.linear_speed * self.direction.cos(),
            self.linear_speed * self.direction.sin(),
        )
    }

    pub fn momentum(&self) -> NVec2 {
        self.mass * self.velocity()
    }

    /// Replace the polar velocity from a Cartesian vector
    pub fn set_velocity(&mut self, v: NVec2) {
        self.linear_speed = v.norm();
        self.direction = v.y.atan2(v.x);
    }

    /// `mass / radius^3`, constant for the lifetime of a body
    pub fn density(&self) -> f64 {
        self.mass / self.radius.powi(3)
    }

    pub fn overlaps(&self, other: &Body) -> bool {
        (other.x - self.x).norm() <= self.radius + other.radius
    }

    /// Terminal, never reversed
    pub(crate) fn kill(&mut self) {
        self.is_alive = false;
    }
}

/// Rectangular arena, origin at the top-left corner, `y` grows downward
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f64,
    pub height: f64,
}

impl Arena {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> NVec2 {
        NVec2::new(self.width / 2.0, self.height / 2.0)
    }
}
