//! Twinplate Hardware Abstraction Layer
//!
//! This crate defines the capability interface between the board-agnostic
//! control logic and whatever hardware runs it. Board crates implement
//! [`Peripheral`]; the control logic only ever talks to this trait.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  twinplate-firmware (embassy-stm32)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ twinplate-    │       │ twinplate-    │
//! │    core       │       │   drivers     │
//! └───────────────┘       └───────────────┘
//!         │                       │
//!         └───────────┬───────────┘
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  twinplate-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod peripheral;

pub use peripheral::{Channel, Peripheral, PowerMode};
