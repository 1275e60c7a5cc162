use potts_core::{ErrorInfo, PottsError};
use serde::{Deserialize, Serialize};

use crate::estimator::TimeWeights;
use crate::lattice::Lattice;

fn trajectory_error(code: &str, message: impl Into<String>) -> PottsError {
    PottsError::Shape(ErrorInfo::new(code, message.into()))
}

/// On-disk encoding the trajectory was decoded from.
///
/// The two encodings carry different `totalSampleTime` conventions (see
/// [`Trajectory::total_sample_time`]); the source is kept so downstream
/// consumers can reproduce that convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrajectorySource {
    /// Every frame stores the full flattened lattice.
    FullState,
    /// Frames are reconstructed by replaying single-site flips.
    OnlyChange,
}

/// Dense decoded simulation history.
///
/// All sequences share the frame axis: `frame_index()[k]`, `states()[k]`,
/// `times()[k]`, `dwell_times()[k]` and `energies()[k]` describe the same
/// recorded frame. [`Trajectory::from_parts`] is the only way to build one,
/// so every value of this type holds at least one frame, equal-length
/// sequences and uniform snapshot dimensions. `total_sample_time` is the
/// normalization used by the time-weighted estimators; its value follows the
/// convention of the encoding the trajectory came from and is deliberately
/// not unified across encodings: `FullState` uses the timestamp span
/// `time[last] + dwell[last] - time[0]`, `OnlyChange` uses
/// `sum(dwell_times)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory {
    source: TrajectorySource,
    frame_index: Vec<i64>,
    states: Vec<Lattice>,
    times: Vec<f64>,
    dwell_times: Vec<f64>,
    energies: Vec<f64>,
    total_sample_time: f64,
}

impl Trajectory {
    /// Assembles a trajectory from decoded parts, deriving
    /// `total_sample_time` from the encoding convention.
    ///
    /// Fails with a shape error when the frame sequences disagree in length,
    /// when no frames are present, or when the snapshots do not all share the
    /// dimensions of the first one.
    pub fn from_parts(
        source: TrajectorySource,
        frame_index: Vec<i64>,
        states: Vec<Lattice>,
        times: Vec<f64>,
        dwell_times: Vec<f64>,
        energies: Vec<f64>,
    ) -> Result<Self, PottsError> {
        let frames = frame_index.len();
        if states.len() != frames
            || times.len() != frames
            || dwell_times.len() != frames
            || energies.len() != frames
        {
            return Err(PottsError::Shape(
                ErrorInfo::new("traj-length", "frame sequences disagree in length")
                    .with_context("frame_index", frames.to_string())
                    .with_context("states", states.len().to_string())
                    .with_context("times", times.len().to_string())
                    .with_context("dwell_times", dwell_times.len().to_string())
                    .with_context("energies", energies.len().to_string()),
            ));
        }
        if frames == 0 {
            return Err(trajectory_error("traj-empty", "trajectory holds no frames"));
        }
        let (rows, cols) = (states[0].rows(), states[0].cols());
        if let Some(bad) = states
            .iter()
            .position(|state| state.rows() != rows || state.cols() != cols)
        {
            return Err(PottsError::Shape(
                ErrorInfo::new("state-shape", "snapshot dimensions differ across frames")
                    .with_context("frame", bad.to_string()),
            ));
        }

        let mut trajectory = Self {
            source,
            frame_index,
            states,
            times,
            dwell_times,
            energies,
            total_sample_time: 0.0,
        };
        trajectory.total_sample_time = match source {
            TrajectorySource::FullState => trajectory.span_time(),
            TrajectorySource::OnlyChange => trajectory.dwell_total(),
        };
        Ok(trajectory)
    }

    /// Encoding this trajectory was decoded from.
    pub fn source(&self) -> TrajectorySource {
        self.source
    }

    /// Frame ordinals recorded in the underlying log.
    pub fn frame_index(&self) -> &[i64] {
        &self.frame_index
    }

    /// Lattice snapshot per frame.
    pub fn states(&self) -> &[Lattice] {
        &self.states
    }

    /// Simulation clock at each frame.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Residence time in each frame's state.
    pub fn dwell_times(&self) -> &[f64] {
        &self.dwell_times
    }

    /// Energy recorded at each frame.
    pub fn energies(&self) -> &[f64] {
        &self.energies
    }

    /// Normalization for time-weighted estimates.
    pub fn total_sample_time(&self) -> f64 {
        self.total_sample_time
    }

    /// Number of recorded frames.
    pub fn frame_count(&self) -> usize {
        self.frame_index.len()
    }

    /// Lattice row count (`N`) of the snapshots.
    pub fn rows(&self) -> usize {
        self.states[0].rows()
    }

    /// Lattice column count (`M`) of the snapshots.
    pub fn cols(&self) -> usize {
        self.states[0].cols()
    }

    /// Timestamp span `time[last] + dwell[last] - time[0]`.
    pub fn span_time(&self) -> f64 {
        let last = self.times.len() - 1;
        self.times[last] + self.dwell_times[last] - self.times[0]
    }

    /// Sum of all dwell times.
    pub fn dwell_total(&self) -> f64 {
        self.dwell_times.iter().sum()
    }

    /// Dwell-time weights over this trajectory's frames.
    pub fn weights(&self) -> TimeWeights<'_> {
        TimeWeights::new(&self.dwell_times, self.total_sample_time)
    }

    /// Produces an independent restriction of this trajectory to the frames
    /// selected by `spec`.
    ///
    /// Nothing is shared with the parent; every snapshot in the result is its
    /// own copy. `total_sample_time` is recomputed over the restricted
    /// frames: runs recorded at every step (`record_freq == 1`) keep the
    /// timestamp-span convention, all others use the dwell-time sum.
    pub fn sliced(&self, spec: &SliceSpec, record_freq: usize) -> Result<Self, PottsError> {
        let picks = spec.resolve(self.frame_count())?;
        if picks.is_empty() {
            return Err(PottsError::Shape(
                ErrorInfo::new("slice-empty", "slice selects no frames")
                    .with_context("frames", self.frame_count().to_string()),
            ));
        }

        let mut sliced = Self {
            source: self.source,
            frame_index: picks.iter().map(|&k| self.frame_index[k]).collect(),
            states: picks.iter().map(|&k| self.states[k].clone()).collect(),
            times: picks.iter().map(|&k| self.times[k]).collect(),
            dwell_times: picks.iter().map(|&k| self.dwell_times[k]).collect(),
            energies: picks.iter().map(|&k| self.energies[k]).collect(),
            total_sample_time: 0.0,
        };
        sliced.total_sample_time = if record_freq == 1 {
            sliced.span_time()
        } else {
            sliced.dwell_total()
        };
        Ok(sliced)
    }
}

/// Frame-axis slice specification with Python-style semantics: optional
/// start/stop bounds (negative values count from the end) and an optional
/// step (negative steps walk backwards).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceSpec {
    /// First frame of the slice; defaults to the axis start for positive
    /// steps and the axis end for negative ones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    /// Exclusive stop bound; defaults analogously to `start`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<i64>,
    /// Stride through the axis; defaults to 1 and must be non-zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<i64>,
}

impl SliceSpec {
    /// Slice covering `start..stop` with unit stride.
    pub fn range(start: i64, stop: i64) -> Self {
        Self {
            start: Some(start),
            stop: Some(stop),
            step: None,
        }
    }

    /// Slice covering every frame.
    pub fn full() -> Self {
        Self::default()
    }

    /// Resolves the specification against an axis of `len` frames, yielding
    /// the selected indices in traversal order.
    pub fn resolve(&self, len: usize) -> Result<Vec<usize>, PottsError> {
        let step = self.step.unwrap_or(1);
        if step == 0 {
            return Err(PottsError::Shape(ErrorInfo::new(
                "slice-zero-step",
                "slice step must be non-zero",
            )));
        }
        let len = len as i64;

        let clamp = |value: i64, lower: i64, upper: i64| -> i64 {
            let value = if value < 0 { value + len } else { value };
            value.max(lower).min(upper)
        };
        // Bounds follow the usual sequence-slicing rules: walking backwards
        // may run off the front of the axis, hence the -1 lower bound.
        let (lower, upper) = if step > 0 { (0, len) } else { (-1, len - 1) };
        let start = match self.start {
            Some(start) => clamp(start, lower, upper),
            None => if step > 0 { lower } else { upper },
        };
        let stop = match self.stop {
            Some(stop) => clamp(stop, lower, upper),
            None => if step > 0 { upper } else { lower },
        };

        let mut picks = Vec::new();
        let mut cursor = start;
        if step > 0 {
            while cursor < stop {
                picks.push(cursor as usize);
                cursor += step;
            }
        } else {
            while cursor > stop {
                picks.push(cursor as usize);
                cursor += step;
            }
        }
        Ok(picks)
    }
}
