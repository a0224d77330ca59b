//! Board-agnostic core logic for the twinplate heating controller
//!
//! This crate contains all control logic that does not depend on
//! specific hardware implementations:
//!
//! - Timing configuration and validation
//! - Button debounce engine
//! - Two-channel PWM driver over a shared compare register
//! - Idle auto-shutoff countdown
//! - Sleep depth arbitration
//! - The controller tying the handlers together

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod input;
pub mod output;
pub mod power;
pub mod safety;
pub mod state;

#[cfg(test)]
pub(crate) mod mock;

pub use controller::PlateController;
pub use twinplate_hal::{Channel, Peripheral, PowerMode};
