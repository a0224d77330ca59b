//! Control events
//!
//! Reported by the controller for logging; never fed back into control.

pub mod events;

pub use events::{ControlEvent, TickReport, MAX_TICK_EVENTS};
