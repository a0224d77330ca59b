//! Safety monitoring
//!
//! Forces both plates off after a period without button activity.

pub mod idle;

pub use idle::IdleCountdown;
