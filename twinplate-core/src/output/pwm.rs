//! Two-channel PWM over a single compare register
//!
//! One compare register walks through four offsets per base period:
//!
//! ```text
//! sub-tick   0    2         11    17        26   29
//!            |----A^--------Av----B^--------Bv---|  (base tick at 29)
//! ```
//!
//! Plate A is raised at the first offset and lowered at the second, plate B
//! likewise at the third and fourth. The two pulses never overlap, which
//! keeps the peak current of the two heating elements apart.

use twinplate_hal::{Channel, Peripheral};

use crate::config::TimingConfig;

/// One of the four compare phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Raise plate A if active
    RiseA,
    /// Lower plate A
    FallA,
    /// Raise plate B if active
    RiseB,
    /// Lower plate B
    FallB,
}

impl Phase {
    /// Phases in schedule order
    pub const ALL: [Phase; 4] = [Phase::RiseA, Phase::FallA, Phase::RiseB, Phase::FallB];

    /// Phase that follows this one
    pub const fn next(self) -> Self {
        match self {
            Phase::RiseA => Phase::FallA,
            Phase::FallA => Phase::RiseB,
            Phase::RiseB => Phase::FallB,
            Phase::FallB => Phase::RiseA,
        }
    }

    /// Channel whose pin this phase drives
    pub const fn channel(self) -> Channel {
        match self {
            Phase::RiseA | Phase::FallA => Channel::A,
            Phase::RiseB | Phase::FallB => Channel::B,
        }
    }

    const fn index(self) -> usize {
        match self {
            Phase::RiseA => 0,
            Phase::FallA => 1,
            Phase::RiseB => 2,
            Phase::FallB => 3,
        }
    }
}

/// Compare values for each phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhaseSchedule {
    compares: [u16; 4],
}

impl PhaseSchedule {
    /// Build the schedule from the timing configuration
    pub const fn from_config(config: &TimingConfig) -> Self {
        Self {
            compares: config.phase_compares(),
        }
    }

    /// Compare value that arms a phase
    pub const fn compare(&self, phase: Phase) -> u16 {
        self.compares[phase.index()]
    }

    /// Phase armed by a compare value, if it is one of ours
    pub fn phase_of(&self, compare: u16) -> Option<Phase> {
        Phase::ALL
            .into_iter()
            .find(|&phase| self.compare(phase) == compare)
    }

    /// Compare value at the start of the cycle
    pub const fn start(&self) -> u16 {
        self.compare(Phase::RiseA)
    }

    /// Sub-ticks a plate stays high within one period
    pub const fn pulse_width(&self) -> u16 {
        self.compares[1] - self.compares[0]
    }
}

/// Commanded and physical state of one plate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputChannel {
    /// Heating commanded on (duty-cycle level)
    pub active: bool,
    /// Last level written to the pin
    pub pin_high: bool,
}

impl OutputChannel {
    /// Drive the pin and remember the level
    pub fn drive<P: Peripheral>(&mut self, channel: Channel, high: bool, periph: &mut P) {
        periph.set_output(channel, high);
        self.pin_high = high;
    }
}

/// Result of one compare-match service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PwmStep {
    /// Both plates inactive; nothing touched
    Idle,
    /// Phase serviced; the next one is armed
    Advanced(Phase),
    /// Compare register held an unknown value; counter reset and cycle restarted
    Resynced,
}

/// PWM duty driver
#[derive(Debug, Clone, Copy)]
pub struct PwmDriver {
    schedule: PhaseSchedule,
}

impl PwmDriver {
    /// Create a driver for the given schedule
    pub const fn new(schedule: PhaseSchedule) -> Self {
        Self { schedule }
    }

    /// Schedule in use
    pub fn schedule(&self) -> &PhaseSchedule {
        &self.schedule
    }

    /// Service one compare match
    ///
    /// Reads the live compare register, acts on the phase it identifies and
    /// arms the next phase. Only pins are written; the active flags are
    /// read-only here.
    pub fn on_compare_match<P: Peripheral>(
        &self,
        outputs: &mut [OutputChannel; 2],
        periph: &mut P,
    ) -> PwmStep {
        if !outputs.iter().any(|o| o.active) {
            return PwmStep::Idle;
        }

        let Some(phase) = self.schedule.phase_of(periph.fast_compare()) else {
            periph.reset_fast_counter();
            periph.arm_fast_tick(self.schedule.start());
            return PwmStep::Resynced;
        };

        let channel = phase.channel();
        let output = &mut outputs[channel.index()];
        match phase {
            Phase::RiseA | Phase::RiseB => {
                if output.active {
                    output.drive(channel, true, periph);
                }
            }
            Phase::FallA | Phase::FallB => output.drive(channel, false, periph),
        }

        periph.arm_fast_tick(self.schedule.compare(phase.next()));
        PwmStep::Advanced(phase)
    }
}
