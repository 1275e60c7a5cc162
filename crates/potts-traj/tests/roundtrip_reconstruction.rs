use potts_core::RunParameters;
use potts_traj::decode_trajectory_text;
use proptest::prelude::*;

type Flip = (usize, usize, i64);

fn artifact_inputs() -> impl Strategy<Value = (usize, usize, Vec<i64>, Vec<Flip>)> {
    (1usize..4, 1usize..4, 1usize..8).prop_flat_map(|(n, m, frames)| {
        let initial = proptest::collection::vec(0i64..3, n * m);
        let flips = proptest::collection::vec((0..n, 0..m, 0i64..3), frames - 1);
        (Just(n), Just(m), initial, flips)
    })
}

fn replay(initial: &[i64], flips: &[Flip], m: usize) -> Vec<Vec<i64>> {
    let mut states = vec![initial.to_vec()];
    for &(row, col, spin) in flips {
        let mut next = states.last().unwrap().clone();
        next[row * m + col] = spin;
        states.push(next);
    }
    states
}

fn fullstate_text(states: &[Vec<i64>]) -> String {
    let mut text = String::from("# TrajType = FullState\n");
    for (frame, state) in states.iter().enumerate() {
        let spins: Vec<String> = state.iter().map(|s| s.to_string()).collect();
        text.push_str(&format!(
            "{} {} {} 1 {}\n",
            frame,
            spins.join(" "),
            frame,
            frame as f64 * 0.5
        ));
    }
    text
}

fn onlychange_text(initial: &[i64], flips: &[Flip], frames: usize) -> String {
    let spins: Vec<String> = initial.iter().map(|s| s.to_string()).collect();
    let mut text = format!("# TrajType = OnlyChange\n# Initial State = {}\n", spins.join(" "));
    for frame in 0..frames {
        // The final row's flip columns are padding and must never be applied.
        let (row, col, spin) = if frame < flips.len() {
            flips[frame]
        } else {
            (0, 0, 0)
        };
        text.push_str(&format!(
            "{} {} {} {} 1 {}\n",
            row,
            col,
            spin,
            frame,
            frame as f64 * 0.5
        ));
    }
    text
}

proptest! {
    #[test]
    fn onlychange_replay_matches_fullstate((n, m, initial, flips) in artifact_inputs()) {
        let params = RunParameters { n, m, ..RunParameters::default() };
        let states = replay(&initial, &flips, m);
        let frames = states.len();

        let dense = decode_trajectory_text(&fullstate_text(&states), &params).unwrap();
        let replayed =
            decode_trajectory_text(&onlychange_text(&initial, &flips, frames), &params).unwrap();

        prop_assert_eq!(&dense.states(), &replayed.states());
        prop_assert_eq!(&dense.times(), &replayed.times());
        prop_assert_eq!(&dense.dwell_times(), &replayed.dwell_times());
        prop_assert_eq!(&dense.energies(), &replayed.energies());
        // Unit dwell times keep the two normalization conventions in
        // agreement, so both must equal the frame count here.
        prop_assert_eq!(dense.total_sample_time(), frames as f64);
        prop_assert_eq!(replayed.total_sample_time(), frames as f64);
    }
}
