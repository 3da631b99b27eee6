//! Shared primitive types used across the entire simulation.

/// Index of a team in the base standings. Stable for the whole run.
pub type TeamIdx = usize;

/// League points. Never negative.
pub type Points = u32;

/// Goal counts (scored or conceded).
pub type Goals = u32;

/// Zero-based index of one simulated season within a run.
pub type Iteration = u64;

/// The canonical run identifier used by the result store.
pub type RunId = String;
