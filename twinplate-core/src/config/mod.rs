//! Configuration types
//!
//! All thresholds are compiled in. [`TimingConfig::DEFAULT`] is the only
//! configuration the firmware ever uses.

pub mod types;

pub use types::*;
