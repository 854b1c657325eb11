use racecore::config::PerformanceConfig;
use racecore::perf::{
    estimate_quarter_mile, estimate_top_speed, estimate_zero_to_sixty, PerformanceSimulator,
    TuningState,
};

/// More power, all else equal: top speed does not drop and times do not grow.
/// The sweep stays below the gearing limit, so every step is a strict gain.
#[test]
fn more_power_improves_every_figure() {
    let mut prev = estimate(&TuningState::default().with_power(60.0));
    for power in [70.0, 85.0, 100.0, 110.0, 125.0, 140.0] {
        let next = estimate(&TuningState::default().with_power(power));
        assert!(next.0 < prev.0, "0-60 at {power} kW: {} !< {}", next.0, prev.0);
        assert!(next.1 < prev.1, "1/4 mile at {power} kW: {} !< {}", next.1, prev.1);
        assert!(next.2 > prev.2, "top speed at {power} kW: {} !> {}", next.2, prev.2);
        prev = next;
    }
}

#[test]
fn less_mass_improves_every_figure() {
    let mut prev = estimate(&TuningState::default().with_mass(1800.0));
    for mass in [1600.0, 1400.0, 1250.0, 1100.0, 950.0] {
        let next = estimate(&TuningState::default().with_mass(mass));
        assert!(next.0 < prev.0, "0-60 at {mass} kg: {} !< {}", next.0, prev.0);
        assert!(next.1 < prev.1, "1/4 mile at {mass} kg: {} !< {}", next.1, prev.1);
        assert!(next.2 > prev.2, "top speed at {mass} kg: {} !> {}", next.2, prev.2);
        prev = next;
    }
}

/// Past the gearing limit extra power can only tie on top speed.
#[test]
fn power_monotonic_even_when_gear_limited() {
    let base = TuningState::default().with_power(400.0);
    let more = base.with_power(600.0);
    assert!(estimate_top_speed(&more) >= estimate_top_speed(&base));
    assert!(estimate_zero_to_sixty(&more) <= estimate_zero_to_sixty(&base));
    assert!(estimate_quarter_mile(&more) <= estimate_quarter_mile(&base));
}

/// Changing any single field yields fresh numbers; nothing is cached.
#[test]
fn estimates_track_every_change() {
    let sim = PerformanceSimulator::new(PerformanceConfig::default());
    let base = TuningState::default();
    let draggy = base.with_drag(0.5);
    assert!(sim.top_speed(&draggy) < sim.top_speed(&base));
    assert!(sim.quarter_mile(&draggy) > sim.quarter_mile(&base));
    assert_eq!(sim.estimate(&base), sim.estimate(&base));
}

#[test]
fn finer_integration_agrees() {
    let coarse = PerformanceSimulator::new(PerformanceConfig::default());
    let fine = PerformanceSimulator::new(PerformanceConfig {
        hz: 1000.0,
        ..PerformanceConfig::default()
    });
    let tuning = TuningState::default();
    let rel = |a: f32, b: f32| ((a - b) / b).abs();
    assert!(rel(coarse.zero_to_sixty(&tuning), fine.zero_to_sixty(&tuning)) < 0.02);
    assert!(rel(coarse.quarter_mile(&tuning), fine.quarter_mile(&tuning)) < 0.02);
}

fn estimate(tuning: &TuningState) -> (f32, f32, f32) {
    (
        estimate_zero_to_sixty(tuning),
        estimate_quarter_mile(tuning),
        estimate_top_speed(tuning),
    )
}
