//! Presentation layer for the Drift demonstrations: argument parsing, logging setup,
//! text tables, plots and report assembly. The binaries in `src/bin` wire these together.

pub mod cli;
pub mod logging;
pub mod plot;
pub mod report;
pub mod table;
