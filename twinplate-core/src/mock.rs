//! In-memory peripheral for unit tests

use twinplate_hal::{Channel, Peripheral, PowerMode};

/// Records everything the control logic asks of the hardware
#[derive(Debug, Default)]
pub struct MockPeripheral {
    /// Raw button levels (true = pressed)
    pub buttons: [bool; 2],
    /// Plate pin levels
    pub outputs: [bool; 2],
    /// Shared compare register
    pub compare: u16,
    /// Fast tick counter
    pub fast_counter: u16,
    /// Last requested power mode
    pub mode: PowerMode,
    /// Number of `set_power_mode` calls
    pub mode_writes: u32,
    /// Number of `set_output` calls
    pub output_writes: u32,
    pub configured: bool,
    pub base_tick_armed: bool,
}

impl MockPeripheral {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, channel: Channel, pressed: bool) {
        self.buttons[channel.index()] = pressed;
    }
}

impl Peripheral for MockPeripheral {
    fn configure(&mut self) {
        self.configured = true;
    }

    fn read_button(&mut self, channel: Channel) -> bool {
        self.buttons[channel.index()]
    }

    fn set_output(&mut self, channel: Channel, high: bool) {
        self.outputs[channel.index()] = high;
        self.output_writes += 1;
    }

    fn arm_base_tick(&mut self) {
        self.base_tick_armed = true;
    }

    fn arm_fast_tick(&mut self, compare: u16) {
        self.compare = compare;
    }

    fn fast_compare(&self) -> u16 {
        self.compare
    }

    fn reset_fast_counter(&mut self) {
        self.fast_counter = 0;
    }

    fn set_power_mode(&mut self, mode: PowerMode) {
        self.mode = mode;
        self.mode_writes += 1;
    }
}
