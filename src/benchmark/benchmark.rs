//! Wall-clock timing of `World::step`
//!
//! The step is a direct O(n^2) pass, so these runs show its quadratic
//! growth with and without absorption.

use std::time::Instant;

use crate::simulation::params::Parameters;
use crate::simulation::states::{Arena, Body};
use crate::simulation::world::World;

const FRAME_DT: f64 = 1.0 / 60.0;

/// Build a world of `n` small bodies on a deterministic pattern, no rand needed
fn make_world(n: usize, absorb: bool) -> World {
    let arena = Arena::new(4000.0, 4000.0);
    let params = Parameters {
        absorb,
        bounded: true,
        trail_length: 0,
        ..Parameters::default()
    };
    let density = params.density;
    let mut world = World::new(arena, params);
    let c = arena.center();

    for i in 0..n {
        let i_f = i as f64;
        let x = c.x + (i_f * 0.37).sin() * 1800.0;
        let y = c.y + (i_f * 0.13).cos() * 1800.0;
        world.add_body(Body::new(x, y, 1.0, density));
    }

    world
}

/// Average step time for a range of body counts
pub fn bench_step() {
    let ns = [100, 200, 400, 800, 1600, 3200];
    let steps = 5;

    for n in ns {
        let mut direct = make_world(n, false);
        let mut merging = make_world(n, true);

        // Warm up
        direct.step(FRAME_DT);
        merging.step(FRAME_DT);

        let t0 = Instant::now();
        for _ in 0..steps {
            direct.step(FRAME_DT);
        }
        let direct_per_step = t0.elapsed().as_secs_f64() / steps as f64;

        let t1 = Instant::now();
        for _ in 0..steps {
            merging.step(FRAME_DT);
        }
        let merging_per_step = t1.elapsed().as_secs_f64() / steps as f64;

        println!(
            "N = {n:5}, no absorb = {direct_per_step:8.6} s, absorb = {merging_per_step:8.6} s ({} left)",
            merging.len()
        );
    }
}

/// Step time curve as CSV, paste directly into a spreadsheet to graph
pub fn bench_step_curve() {
    println!("N,step_ms");

    for n in (100..=3200).step_by(100) {
        // Large n: a single step keeps the run short
        let steps = if n <= 800 { 5 } else { 1 };
        let mut world = make_world(n, false);

        let t0 = Instant::now();
        for _ in 0..steps {
            world.step(FRAME_DT);
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{n},{ms:.6}");
    }
}
