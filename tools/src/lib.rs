//! File formats and terminal output for the relegation runners.

pub mod io;
pub mod report;
