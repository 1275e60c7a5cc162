use potts_core::RunParameters;
use potts_obs::{Cutoff, RunResult};
use potts_traj::{decode_trajectory_text, Lattice, SliceSpec, Trajectory, TrajectorySource};

const TOLERANCE: f64 = 1e-12;

const SCENARIO_2X2: &str = "\
# TrajType = FullState
0 0 0 0 0 0 1 0
1 1 0 0 0 1 2 1
2 1 0 0 0 3 1 1
";

fn params(n: usize, m: usize) -> RunParameters {
    RunParameters {
        n,
        m,
        ..RunParameters::default()
    }
}

fn scenario_result() -> RunResult {
    let p = params(2, 2);
    let trajectory = decode_trajectory_text(SCENARIO_2X2, &p).unwrap();
    RunResult::from_parts(p, trajectory).unwrap()
}

/// Pseudo-random but deterministic trajectory for identity checks.
fn scrambled_trajectory(n: usize, m: usize, frames: usize) -> Trajectory {
    let mut states = Vec::with_capacity(frames);
    let mut spin = 7u64;
    for _ in 0..frames {
        let mut flattened = Vec::with_capacity(n * m);
        for _ in 0..n * m {
            spin = spin.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            flattened.push((spin >> 33) as i64 % 3);
        }
        states.push(Lattice::from_spins(n, m, flattened).unwrap());
    }
    Trajectory::from_parts(
        TrajectorySource::OnlyChange,
        (0..frames as i64).collect(),
        states,
        (0..frames).map(|k| k as f64).collect(),
        (0..frames).map(|k| 0.5 + (k % 3) as f64).collect(),
        (0..frames).map(|k| (k as f64 * 0.37).sin()).collect(),
    )
    .unwrap()
}

#[test]
fn scenario_energy_matches_hand_computation() {
    let mut result = scenario_result();
    let energy = result.average_energy();
    assert!((energy.value - 0.75).abs() < TOLERANCE);
    // sum(((E - 0.75) * dwell)^2) / total^2 = 0.875 / 16
    assert!((energy.error - (0.875f64 / 16.0).sqrt()).abs() < TOLERANCE);
}

#[test]
fn scenario_heat_capacity_scales_the_energy_variance() {
    let mut result = scenario_result();
    let heat = result.heat_capacity();
    // variance(E) = 0.1875, factor = kB / (4 * T^2) with T = 1.
    assert!((heat.value - 0.1875 / 4.0).abs() < TOLERANCE);
    // Squared deviations [0.5625, 0.0625, 0.0625]; their variance-of-mean is
    // 0.21875 / 16.
    let expected_error = (0.21875f64 / 16.0).sqrt() / 4.0;
    assert!((heat.error - expected_error).abs() < TOLERANCE);
}

#[test]
fn scenario_magnetization_averages_the_lattice() {
    let mut result = scenario_result();
    let magnetization = result.magnetization();
    // Spatial means per frame: [0, 0.25, 0.25].
    assert!((magnetization.value - 0.1875).abs() < TOLERANCE);
    let expected_error = (0.0546875f64 / 16.0 / 4.0).sqrt();
    assert!((magnetization.error - expected_error).abs() < TOLERANCE);
}

#[test]
fn constant_energy_gives_exactly_zero_heat_capacity() {
    let p = params(2, 2);
    let text = "\
# TrajType = FullState
0 0 1 0 1 0 1 -3.5
1 1 1 0 1 1 2 -3.5
2 0 1 1 1 3 1 -3.5
";
    let trajectory = decode_trajectory_text(text, &p).unwrap();
    let mut result = RunResult::from_parts(p, trajectory).unwrap();
    let heat = result.heat_capacity();
    assert_eq!(heat.value, 0.0);
    assert_eq!(heat.error, 0.0);
}

#[test]
fn zero_offset_correlation_is_the_site_variance() {
    let trajectory = scrambled_trajectory(3, 4, 12);
    let p = params(3, 4);
    let mut result = RunResult::from_parts(p, trajectory.clone()).unwrap();
    let grid = result.spatial_correlation(Some(Cutoff::Uniform(1)));

    // Correlating the field with itself at zero offset is its variance:
    // averaging the per-site time-variances over the lattice.
    let weights = trajectory.weights();
    let mut variance_sum = 0.0;
    for r in 0..3 {
        for c in 0..4 {
            let series: Vec<f64> = trajectory
                .states()
                .iter()
                .map(|state| state.get(r, c) as f64)
                .collect();
            variance_sum += weights.variance(&series);
        }
    }
    let expected = variance_sum / 12.0;
    assert!((grid.value(0, 0) - expected).abs() < 1e-9);
}

#[test]
fn lambda_averages_the_two_axes() {
    let trajectory = scrambled_trajectory(6, 6, 10);
    let p = params(6, 6);
    let mut result = RunResult::from_parts(p, trajectory).unwrap();
    let grid = result.spatial_correlation(Some(Cutoff::Uniform(3)));
    let profile = result.lambda(Some(3));

    assert_eq!(profile.cutoff, 3);
    for k in 0..3 {
        let expected = (grid.value(k, 0) + grid.value(0, k)) / 2.0;
        assert!((profile.values[k] - expected).abs() < 1e-12);
        let expected_error =
            ((grid.error(k, 0).powi(2) + grid.error(0, k).powi(2)) / 2.0).sqrt();
        assert!((profile.errors[k] - expected_error).abs() < 1e-12);
    }
}

#[test]
fn default_cutoffs_follow_the_lattice_extent() {
    let trajectory = scrambled_trajectory(6, 4, 5);
    let mut result = RunResult::from_parts(params(6, 4), trajectory).unwrap();
    let grid = result.spatial_correlation(None);
    assert_eq!(grid.bounds(), (3, 2));
    let profile = result.lambda(None);
    assert_eq!(profile.cutoff, 2);
}

#[test]
fn cached_grids_are_reused_only_for_matching_bounds() {
    let trajectory = scrambled_trajectory(4, 4, 8);
    let mut result = RunResult::from_parts(params(4, 4), trajectory).unwrap();

    let small = result.spatial_correlation(Some(Cutoff::Uniform(1)));
    assert_eq!(small.bounds(), (1, 1));
    // A different cutoff must trigger a fresh evaluation.
    let full = result.spatial_correlation(None);
    assert_eq!(full.bounds(), (2, 2));
    // Same offsets agree between the two evaluations.
    assert!((full.value(0, 0) - small.value(0, 0)).abs() < TOLERANCE);
    // The uniform spelling of the default bounds is a cache hit.
    let again = result.spatial_correlation(Some(Cutoff::Uniform(2)));
    assert_eq!(again, full);

    let profile = result.lambda(None);
    let profile_again = result.lambda(Some(2));
    assert_eq!(profile_again, profile);
}

#[test]
fn sliced_results_recompute_from_scratch() {
    let mut result = scenario_result();
    let whole = result.average_energy();

    let mut tail = result.sliced(&SliceSpec::range(1, 3)).unwrap();
    let tail_energy = tail.average_energy();
    // Frames 1..3 carry energy 1 everywhere, so the restricted mean is exact.
    assert_eq!(tail_energy.value, 1.0);
    assert!(tail_energy.value != whole.value);
    assert_eq!(tail.trajectory().frame_count(), 2);
}

#[test]
fn analyze_all_fills_every_default_slot() {
    let mut result = scenario_result();
    result.analyze_all();
    // Getters now serve from cache; values must match direct evaluation.
    let energy = result.average_energy();
    assert!((energy.value - 0.75).abs() < TOLERANCE);
    let grid = result.spatial_correlation(None);
    assert_eq!(grid.bounds(), (1, 1));
    let profile = result.lambda(None);
    assert_eq!(profile.cutoff, 1);
}
