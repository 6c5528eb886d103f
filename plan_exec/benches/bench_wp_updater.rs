//! # Waypoint Updater Benchmark

use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};
use nalgebra::Vector3;

use plan_lib::{
    base_path::{BasePath, Waypoint},
    feeds::SignalReport,
    loc::Pose,
    wp_updater::{InputData, Params, WpUpdater},
};
use util::module::State;

const NUM_WAYPOINTS: usize = 10_000;

fn wp_updater_benchmark(c: &mut Criterion) {
    // ---- Build a closed circular path with 1 m between waypoints ----

    let r = NUM_WAYPOINTS as f64 / std::f64::consts::TAU;
    let path = Arc::new(
        BasePath::new(
            (0..NUM_WAYPOINTS)
                .map(|i| {
                    let theta = std::f64::consts::TAU * (i as f64) / (NUM_WAYPOINTS as f64);
                    let yaw = theta + std::f64::consts::FRAC_PI_2;
                    Waypoint {
                        position_m: [r * theta.cos(), r * theta.sin(), 0.0],
                        attitude_q: [0.0, 0.0, (yaw / 2.0).sin(), (yaw / 2.0).cos()],
                        velocity_ms: 11.0,
                    }
                })
                .collect(),
        )
        .unwrap(),
    );

    // Vehicle part way round, just behind waypoint 7000
    let theta = std::f64::consts::TAU * 6999.6 / (NUM_WAYPOINTS as f64);
    let pose = Pose::from_parts(
        Vector3::new(r * theta.cos(), r * theta.sin(), 0.0),
        theta + std::f64::consts::FRAC_PI_2,
    );

    let cruise_input = InputData {
        pose: Some(pose),
        base_path: Some(Ok(path.clone())),
        signal: SignalReport::Clear,
    };

    let stop_input = InputData {
        signal: SignalReport::StopAt(7020),
        ..cruise_input.clone()
    };

    // ---- Benchmark ----

    let mut wpu = WpUpdater::new(Params::default());

    c.bench_function("wp_updater cruise cycle", |b| {
        b.iter(|| wpu.proc(&cruise_input).unwrap())
    });

    let mut wpu = WpUpdater::new(Params::default());

    c.bench_function("wp_updater stopping cycle", |b| {
        b.iter(|| wpu.proc(&stop_input).unwrap())
    });
}

criterion_group!(benches, wp_updater_benchmark);
criterion_main!(benches);
