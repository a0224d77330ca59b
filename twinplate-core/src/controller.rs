//! Plate controller
//!
//! Owns all control state and exposes one entry point per hardware event:
//!
//! - [`PlateController::on_base_tick`]: debounce both buttons, apply
//!   toggles, run the idle countdown, decide the sleep depth
//! - [`PlateController::on_compare_match`]: advance the PWM schedule
//! - [`PlateController::on_button_edge`]: wake the timer from deep sleep
//!
//! The active flags are written only from the base tick, the pins only from
//! the compare match and the idle shutoff. `&mut self` on every handler keeps
//! the two from interleaving.

use twinplate_hal::{Channel, Peripheral, PowerMode};

use crate::config::{ConfigError, TimingConfig};
use crate::input::{ButtonChannel, DebounceWindows};
use crate::output::{OutputChannel, PhaseSchedule, PwmDriver, PwmStep};
use crate::power::SleepInputs;
use crate::safety::IdleCountdown;
use crate::state::{ControlEvent, TickReport};

/// Two-plate controller
#[derive(Debug, Clone)]
pub struct PlateController {
    config: TimingConfig,
    windows: DebounceWindows,
    buttons: [ButtonChannel; 2],
    outputs: [OutputChannel; 2],
    pwm: PwmDriver,
    idle: IdleCountdown,
    power: PowerMode,
}

impl Default for PlateController {
    fn default() -> Self {
        Self::build(TimingConfig::DEFAULT)
    }
}

impl PlateController {
    /// Create a controller for the given timing
    pub fn new(config: TimingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: TimingConfig) -> Self {
        let windows = DebounceWindows::from_config(&config);
        Self {
            config,
            windows,
            buttons: [ButtonChannel::new(&windows); 2],
            outputs: [OutputChannel::default(); 2],
            pwm: PwmDriver::new(PhaseSchedule::from_config(&config)),
            idle: IdleCountdown::new(config.idle_timeout_ticks),
            power: PowerMode::Light,
        }
    }

    /// Hand-off from board setup
    ///
    /// Puts the outputs low and starts both ticks in the light sleep mode.
    pub fn start<P: Peripheral>(&mut self, periph: &mut P) {
        periph.configure();
        for channel in Channel::ALL {
            let output = &mut self.outputs[channel.index()];
            output.active = false;
            output.drive(channel, false, periph);
        }
        periph.arm_fast_tick(self.pwm.schedule().start());
        periph.arm_base_tick();
        self.power = PowerMode::Light;
        periph.set_power_mode(PowerMode::Light);
    }

    /// Falling edge on either button
    ///
    /// Restarts the timer if it was halted. Nothing else is decided here;
    /// the next base tick samples the buttons as usual.
    pub fn on_button_edge<P: Peripheral>(&mut self, periph: &mut P) -> PowerMode {
        self.power = PowerMode::Light;
        periph.set_power_mode(PowerMode::Light);
        self.power
    }

    /// Fast compare match
    pub fn on_compare_match<P: Peripheral>(&mut self, periph: &mut P) -> PwmStep {
        self.pwm.on_compare_match(&mut self.outputs, periph)
    }

    /// Periodic base tick
    pub fn on_base_tick<P: Peripheral>(&mut self, periph: &mut P) -> TickReport {
        let mut report = TickReport::new();

        // Channel A strictly before channel B
        for channel in Channel::ALL {
            let raw = periph.read_button(channel);
            let button = &mut self.buttons[channel.index()];
            if !button.sample(raw, &self.windows) {
                continue;
            }

            let pressed = button.toggle();
            report.push(ControlEvent::ButtonConfirmed { channel, pressed });

            // A full press/release cycle flips the plate
            if !pressed {
                let output = &mut self.outputs[channel.index()];
                output.active = !output.active;
                if !output.active {
                    output.drive(channel, false, periph);
                }
                report.push(ControlEvent::OutputSwitched {
                    channel,
                    on: output.active,
                });
            }

            self.idle.reset();
        }

        // The reset above must land before this decrement
        if self.idle.tick() {
            self.force_off(periph);
            report.push(ControlEvent::IdleShutoff);
        }

        let inputs = SleepInputs {
            active: self.outputs.map(|o| o.active),
            pressed: self.buttons.map(|b| b.is_pressed()),
            raw_pressed: Channel::ALL.map(|c| periph.read_button(c)),
        };
        let mode = inputs.mode();
        if mode != self.power {
            self.power = mode;
            periph.set_power_mode(mode);
            report.push(ControlEvent::PowerModeChanged(mode));
        }

        report
    }

    /// Switch both plates off regardless of PWM phase
    fn force_off<P: Peripheral>(&mut self, periph: &mut P) {
        for channel in Channel::ALL {
            let output = &mut self.outputs[channel.index()];
            output.active = false;
            output.drive(channel, false, periph);
        }
    }

    /// Check if a plate is commanded on
    pub fn is_active(&self, channel: Channel) -> bool {
        self.outputs[channel.index()].active
    }

    /// Last level written to a plate pin
    pub fn pin_high(&self, channel: Channel) -> bool {
        self.outputs[channel.index()].pin_high
    }

    /// Debounced button state
    pub fn is_pressed(&self, channel: Channel) -> bool {
        self.buttons[channel.index()].is_pressed()
    }

    /// Base ticks left before the idle shutoff
    pub fn idle_remaining(&self) -> u16 {
        self.idle.remaining()
    }

    /// Currently requested sleep depth
    pub fn power_mode(&self) -> PowerMode {
        self.power
    }

    /// Timing in use
    pub fn config(&self) -> &TimingConfig {
        &self.config
    }
}
