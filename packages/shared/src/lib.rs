//! Shared utilities for Kaiwa.
//!
//! Logger setup and time helpers used by every Kaiwa package.

pub mod logger;
pub mod time;
