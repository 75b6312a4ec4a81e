//! Stopwatch for project tasks. Time spent is saved per task as JSON next to a free-form
//! description, and can be summed up per day into a report.
//!

pub mod cli;
pub mod report;
pub mod session;
pub mod storage;
pub mod terminal;
pub mod utils;
