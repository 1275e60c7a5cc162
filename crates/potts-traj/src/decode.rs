use std::fs;
use std::path::Path;

use potts_core::{ErrorInfo, PottsError, RunParameters};

use crate::lattice::Lattice;
use crate::trajectory::{Trajectory, TrajectorySource};

fn format_error(code: &str, message: impl Into<String>) -> PottsError {
    PottsError::Format(ErrorInfo::new(code, message.into()))
}

/// Reads and decodes a trajectory artifact from disk.
pub fn read_trajectory(path: &Path, params: &RunParameters) -> Result<Trajectory, PottsError> {
    let text = fs::read_to_string(path).map_err(|err| {
        PottsError::Format(
            ErrorInfo::new("traj-read", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    decode_trajectory_text(&text, params)
}

/// Decodes trajectory text in either the `FullState` or the `OnlyChange`
/// encoding into a dense [`Trajectory`].
///
/// The first line must carry one of the two encoding markers. Header lines
/// start with `#` and are excluded from the numeric table; within numeric
/// lines everything from a `#` onwards is ignored.
pub fn decode_trajectory_text(
    text: &str,
    params: &RunParameters,
) -> Result<Trajectory, PottsError> {
    let first = text.lines().next().unwrap_or("");
    let source = if first.contains("FullState") {
        TrajectorySource::FullState
    } else if first.contains("OnlyChange") {
        TrajectorySource::OnlyChange
    } else {
        return Err(format_error(
            "traj-marker",
            "first line carries neither a FullState nor an OnlyChange marker",
        ));
    };

    let rows = numeric_rows(text)?;
    if rows.is_empty() {
        return Err(format_error("traj-empty", "trajectory holds no frames"));
    }

    match source {
        TrajectorySource::FullState => decode_fullstate(&rows, params),
        TrajectorySource::OnlyChange => decode_onlychange(text, &rows, params),
    }
}

/// One parsed numeric line: its 1-based line number and its column values.
struct NumericRow {
    line: usize,
    values: Vec<f64>,
}

fn numeric_rows(text: &str) -> Result<Vec<NumericRow>, PottsError> {
    let mut rows = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let payload = match raw.find('#') {
            Some(cut) => &raw[..cut],
            None => raw,
        };
        if payload.trim().is_empty() {
            continue;
        }
        let mut values = Vec::new();
        for token in payload.split_whitespace() {
            let value: f64 = token.parse().map_err(|_| {
                PottsError::Format(
                    ErrorInfo::new("traj-number", "unparseable numeric column")
                        .with_context("line", (index + 1).to_string())
                        .with_context("token", token.to_string()),
                )
            })?;
            values.push(value);
        }
        rows.push(NumericRow {
            line: index + 1,
            values,
        });
    }
    Ok(rows)
}

fn check_row_width(row: &NumericRow, expected: usize) -> Result<(), PottsError> {
    if row.values.len() != expected {
        return Err(PottsError::Shape(
            ErrorInfo::new("traj-row-width", "row width inconsistent with lattice dimensions")
                .with_context("line", row.line.to_string())
                .with_context("expected", expected.to_string())
                .with_context("actual", row.values.len().to_string()),
        ));
    }
    Ok(())
}

fn decode_fullstate(rows: &[NumericRow], params: &RunParameters) -> Result<Trajectory, PottsError> {
    let (n, m) = (params.n, params.m);
    let sites = n * m;

    let mut frame_index = Vec::with_capacity(rows.len());
    let mut states = Vec::with_capacity(rows.len());
    let mut times = Vec::with_capacity(rows.len());
    let mut dwell_times = Vec::with_capacity(rows.len());
    let mut energies = Vec::with_capacity(rows.len());
    for row in rows {
        check_row_width(row, sites + 4)?;
        frame_index.push(row.values[0] as i64);
        let spins: Vec<i64> = row.values[1..=sites].iter().map(|&v| v as i64).collect();
        states.push(Lattice::from_spins(n, m, spins)?);
        times.push(row.values[sites + 1]);
        dwell_times.push(row.values[sites + 2]);
        energies.push(row.values[sites + 3]);
    }

    Trajectory::from_parts(
        TrajectorySource::FullState,
        frame_index,
        states,
        times,
        dwell_times,
        energies,
    )
}

fn decode_onlychange(
    text: &str,
    rows: &[NumericRow],
    params: &RunParameters,
) -> Result<Trajectory, PottsError> {
    let (n, m) = (params.n, params.m);
    let initial = parse_initial_state(text, n, m)?;

    let mut times = Vec::with_capacity(rows.len());
    let mut dwell_times = Vec::with_capacity(rows.len());
    let mut energies = Vec::with_capacity(rows.len());
    for row in rows {
        check_row_width(row, 6)?;
        times.push(row.values[3]);
        dwell_times.push(row.values[4]);
        energies.push(row.values[5]);
    }

    // Row k's flip produces frame k+1, so the final row's flip columns are
    // padding and every frame gets its own copy of the lattice.
    let mut states = Vec::with_capacity(rows.len());
    states.push(initial);
    for (step, row) in rows[..rows.len() - 1].iter().enumerate() {
        let flip_row = row.values[0] as i64;
        let flip_col = row.values[1] as i64;
        let next_spin = row.values[2] as i64;
        if flip_row < 0 || flip_row >= n as i64 || flip_col < 0 || flip_col >= m as i64 {
            return Err(PottsError::Shape(
                ErrorInfo::new("flip-bounds", "flip target outside the lattice")
                    .with_context("frame", (step + 1).to_string())
                    .with_context("row", flip_row.to_string())
                    .with_context("col", flip_col.to_string()),
            ));
        }
        let mut next = states[step].clone();
        next.set(flip_row as usize, flip_col as usize, next_spin);
        states.push(next);
    }

    let frame_index = (0..rows.len() as i64).collect();
    Trajectory::from_parts(
        TrajectorySource::OnlyChange,
        frame_index,
        states,
        times,
        dwell_times,
        energies,
    )
}

fn parse_initial_state(text: &str, n: usize, m: usize) -> Result<Lattice, PottsError> {
    let line = text.lines().nth(1).unwrap_or("");
    let Some((key, value)) = line.split_once('=') else {
        return Err(format_error(
            "traj-initial-state",
            "second line carries no Initial State entry",
        ));
    };
    if !key.contains("Initial State") {
        return Err(format_error(
            "traj-initial-state",
            "second line carries no Initial State entry",
        ));
    }

    let mut spins = Vec::with_capacity(n * m);
    for token in value.split_whitespace() {
        let spin: i64 = token.parse().map_err(|_| {
            PottsError::Format(
                ErrorInfo::new("initial-state-value", "unparseable initial spin")
                    .with_context("token", token.to_string()),
            )
        })?;
        spins.push(spin);
    }
    if spins.len() != n * m {
        return Err(PottsError::Shape(
            ErrorInfo::new("initial-state-size", "initial state length mismatch")
                .with_context("expected", (n * m).to_string())
                .with_context("actual", spins.len().to_string()),
        ));
    }
    Lattice::from_spins(n, m, spins)
}
