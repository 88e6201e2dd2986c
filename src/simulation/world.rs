//! The simulation world
//!
//! `World` owns every body, the pending-removal set, the frame clock and the
//! runtime parameters. One call to [`World::step`] advances all live bodies
//! by one tick:
//!
//! 1. bodies queued for removal before the step are skipped, both for their
//!    own update and as neighbours of every other body,
//! 2. every other live body runs its update (boundary, trail, pairwise
//!    gravity/absorption, expansion, integration) in collection order,
//! 3. queued bodies are removed from the collection and the queue is cleared.
//!
//! Removal is deferred so an absorption decided mid-pass never changes the
//! collection other bodies are still iterating over.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::simulation::clock::Clock;
use crate::simulation::collision::{absorb, absorber, Absorber};
use crate::simulation::forces::{apply_attraction, edge_crossing, expansion_displacement, reflect};
use crate::simulation::integrator::polar_euler;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Arena, Body, BodyId, NVec2};

#[derive(Debug, Clone)]
pub struct World {
    bodies: Vec<Body>,
    pending: HashSet<BodyId>,
    clock: Clock,
    params: Parameters,
    arena: Arena,
    next_id: u64,
    time: f64, // simulated seconds
}

impl World {
    pub fn new(arena: Arena, params: Parameters) -> Self {
        Self {
            bodies: Vec::new(),
            pending: HashSet::new(),
            clock: Clock::new(),
            params,
            arena,
            next_id: 1,
            time: 0.0,
        }
    }

    // =========================================================================
    // host loop
    // =========================================================================

    /// Feed a host timestamp to the clock and step if it produced a delta.
    /// Returns whether a step ran.
    pub fn tick(&mut self, timestamp_ms: f64) -> bool {
        if !self.clock.advance(timestamp_ms) {
            return false;
        }
        let dt = self.clock.dt_seconds(self.params.speed);
        self.step(dt);
        true
    }

    /// Advance every live body by `dt` simulated seconds, then apply removals
    pub fn step(&mut self, dt: f64) {
        // Bodies are only appended or removed outside of a step, so the index
        // range taken here stays valid for the whole pass.
        let n = self.bodies.len();
        let skipped = self.pending.clone();

        for i in 0..n {
            let body = &self.bodies[i];
            if !body.is_alive || skipped.contains(&body.id) {
                continue;
            }
            self.update_body(i, dt, &skipped);
        }

        self.time += dt;
        self.reconcile();
    }

    // `skipped` bodies neither pull on nor absorb the body being updated
    fn update_body(&mut self, i: usize, dt: f64, skipped: &HashSet<BodyId>) {
        let Self { bodies, pending, params, arena, .. } = self;
        let n = bodies.len();

        // Boundary
        let crossing = edge_crossing(&bodies[i], arena);
        if crossing.any() {
            let body = &mut bodies[i];
            if params.bounded {
                if !body.is_fixed {
                    reflect(body, crossing);
                }
            } else if pending.insert(body.id) {
                debug!(id = body.id.0, x = body.x.x, y = body.x.y, "body left the arena");
            }
        }

        // Trail, pre-move position
        if params.trail_length > 0 {
            let body = &mut bodies[i];
            let point = body.x;
            body.trail.record(point, params.trail_length);
        }

        // Pairwise gravity and absorption
        for j in 0..n {
            if j == i || !bodies[j].is_alive || skipped.contains(&bodies[j].id) {
                continue;
            }
            let (this, other) = pair_mut(bodies, i, j);

            if this.overlaps(other) {
                if !params.absorb {
                    continue;
                }
                match absorber(this, other) {
                    Absorber::This => {
                        absorb(this, other);
                        pending.insert(other.id);
                        debug!(winner = this.id.0, loser = other.id.0, mass = this.mass, "absorbed");
                    }
                    Absorber::Other => {
                        absorb(other, this);
                        pending.insert(this.id);
                        debug!(winner = other.id.0, loser = this.id.0, mass = other.mass, "absorbed");
                        return;
                    }
                }
                continue;
            }

            if !this.is_fixed {
                apply_attraction(this, other, dt);
            }
        }

        let body = &mut bodies[i];
        if body.is_fixed {
            return;
        }

        // Expansion overlay
        if let Some(d) = expansion_displacement(
            body,
            arena,
            params.length_to_physical,
            params.expansion_rate,
            dt,
        ) {
            body.x += d;
        }

        polar_euler(body, dt);
    }

    fn reconcile(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let before = self.bodies.len();
        let pending = &self.pending;
        self.bodies.retain(|b| b.is_alive && !pending.contains(&b.id));
        trace!(removed = before - self.bodies.len(), remaining = self.bodies.len(), "reconciled");
        self.pending.clear();
    }

    // =========================================================================
    // scenario / administrative entry points
    // =========================================================================

    /// Insert a body and return its identifier
    pub fn add_body(&mut self, mut body: Body) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        body.id = id;
        body.is_alive = true;
        self.bodies.push(body);
        id
    }

    /// Remove a body immediately, outside of the physics step
    pub fn remove_body(&mut self, id: BodyId) -> Option<Body> {
        self.pending.remove(&id);
        let index = self.bodies.iter().position(|b| b.id == id)?;
        Some(self.bodies.remove(index))
    }

    /// Queue a body for removal; it is skipped by the next step and removed at its end
    pub fn queue_removal(&mut self, id: BodyId) -> bool {
        if self.body(id).is_none() {
            return false;
        }
        self.pending.insert(id)
    }

    pub fn is_pending(&self, id: BodyId) -> bool {
        self.pending.contains(&id)
    }

    /// Resize the arena and shift every body by half the size change
    pub fn resize(&mut self, width: f64, height: f64) {
        let shift = NVec2::new(width - self.arena.width, height - self.arena.height) / 2.0;
        self.arena = Arena::new(width, height);
        if shift == NVec2::zeros() {
            return;
        }
        for body in &mut self.bodies {
            body.x += shift;
        }
    }

    // =========================================================================
    // configuration
    // =========================================================================

    pub fn set_speed(&mut self, speed: f64) {
        self.params.speed = speed;
    }

    pub fn scale_speed(&mut self, factor: f64) {
        self.params.speed *= factor;
    }

    pub fn set_absorb(&mut self, absorb: bool) {
        self.params.absorb = absorb;
    }

    /// Bounded arenas reflect crossing bodies instead of removing them.
    /// An axis is only mirrored while the body still moves outward on it,
    /// so a body straddling an edge does not flip every tick.
    pub fn set_bounded(&mut self, bounded: bool) {
        self.params.bounded = bounded;
    }

    /// Change trail capacity; 0 also clears existing trails
    pub fn set_trail_length(&mut self, trail_length: usize) {
        self.params.trail_length = trail_length;
        if trail_length == 0 {
            for body in &mut self.bodies {
                body.trail.clear();
            }
        }
    }

    pub fn reset_clock(&mut self) {
        self.clock.reset();
    }

    // =========================================================================
    // read access for renderers and diagnostics
    // =========================================================================

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn arena(&self) -> Arena {
        self.arena
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().filter(|b| b.is_alive).map(|b| b.mass).sum()
    }

    pub fn total_momentum(&self) -> NVec2 {
        self.bodies
            .iter()
            .filter(|b| b.is_alive)
            .fold(NVec2::zeros(), |p, b| p + b.momentum())
    }
}

/// Two distinct mutable bodies, in `(i, j)` order
fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    debug_assert_ne!(i, j);
    if i < j {
        let (head, tail) = bodies.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = bodies.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}
