//! # Speed-up reports
//!
//! Turns CSV performance logs of distributed Monte Carlo runs into speed-up
//! charts. Each log is a sequence of (processor count, elapsed time) rows; the
//! first row is the baseline every other row is compared against.

pub mod env;
pub mod error;
pub mod tasks;

pub use error::{ReportError, Result};
