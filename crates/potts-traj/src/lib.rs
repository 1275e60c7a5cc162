#![deny(missing_docs)]
#![doc = "Trajectory decoding and time-weighted statistics for Potts kinetic Monte Carlo output: dense reconstruction from the FullState and OnlyChange text encodings, frame slicing, and dwell-time-weighted estimators."]

/// Trajectory artifact decoding.
pub mod decode;
/// Dwell-time-weighted statistical primitives.
pub mod estimator;
/// Lattice snapshot storage.
pub mod lattice;
/// Dense trajectory representation and slicing.
pub mod trajectory;

pub use decode::{decode_trajectory_text, read_trajectory};
pub use estimator::TimeWeights;
pub use lattice::Lattice;
pub use trajectory::{SliceSpec, Trajectory, TrajectorySource};
