//! Button input handling

pub mod debounce;

pub use debounce::{debounce, ButtonChannel, DebounceWindows};
