//! Embassy async tasks
//!
//! The controller and the board live in a single task, so the base tick and
//! the PWM compare handler can never preempt each other.

pub mod control;

pub use control::control_task;
