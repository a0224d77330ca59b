//! Timing configuration
//!
//! Everything is expressed in milliseconds and converted to base ticks or
//! fast sub-ticks on demand.

use core::fmt;

/// Base tick period (ms)
pub const TICK_MS: u16 = 10;

/// Time a press must be stable before it is accepted (ms)
pub const PRESS_MS: u16 = 40;

/// Time a release must be stable before it is accepted (ms)
pub const RELEASE_MS: u16 = 100;

/// Auto-shutoff after this many base ticks without a button toggle (60 s)
pub const IDLE_TIMEOUT_TICKS: u16 = 6000;

/// Fast timer sub-ticks per millisecond (3 kHz timer clock)
pub const SUB_TICKS_PER_MS: u16 = 3;

/// Phase offsets within one base period (ms): A on, A off, B on, B off
pub const PHASE_OFFSETS_MS: [u16; 4] = [1, 4, 6, 9];

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Base tick period is zero
    ZeroTickPeriod,
    /// Fast timer resolution is zero
    ZeroSubTicks,
    /// A debounce window is shorter than one base tick
    WindowShorterThanTick,
    /// Idle timeout of zero ticks would never arm
    ZeroIdleTimeout,
    /// Phase offsets must be strictly increasing and start above zero
    PhaseOffsetsNotIncreasing,
    /// A phase offset falls on or after the end of the base period
    PhaseOutsidePeriod,
    /// Base period does not fit the 16-bit fast counter
    PeriodTooLong,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroTickPeriod => write!(f, "base tick period is zero"),
            ConfigError::ZeroSubTicks => write!(f, "fast timer resolution is zero"),
            ConfigError::WindowShorterThanTick => {
                write!(f, "debounce window shorter than one tick")
            }
            ConfigError::ZeroIdleTimeout => write!(f, "idle timeout is zero"),
            ConfigError::PhaseOffsetsNotIncreasing => {
                write!(f, "phase offsets not strictly increasing")
            }
            ConfigError::PhaseOutsidePeriod => write!(f, "phase offset outside base period"),
            ConfigError::PeriodTooLong => write!(f, "base period exceeds fast counter range"),
        }
    }
}

/// Timing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimingConfig {
    /// Base tick period (ms)
    pub tick_ms: u16,
    /// Press confirmation window (ms)
    pub press_ms: u16,
    /// Release confirmation window (ms)
    pub release_ms: u16,
    /// Idle auto-shutoff (base ticks)
    pub idle_timeout_ticks: u16,
    /// Fast timer sub-ticks per millisecond
    pub sub_ticks_per_ms: u16,
    /// PWM phase offsets (ms)
    pub phase_offsets_ms: [u16; 4],
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TimingConfig {
    /// Built-in timing used by the firmware
    pub const DEFAULT: Self = Self {
        tick_ms: TICK_MS,
        press_ms: PRESS_MS,
        release_ms: RELEASE_MS,
        idle_timeout_ticks: IDLE_TIMEOUT_TICKS,
        sub_ticks_per_ms: SUB_TICKS_PER_MS,
        phase_offsets_ms: PHASE_OFFSETS_MS,
    };

    /// Press window in base ticks
    pub const fn press_ticks(&self) -> u16 {
        self.press_ms / self.tick_ms
    }

    /// Release window in base ticks
    pub const fn release_ticks(&self) -> u16 {
        self.release_ms / self.tick_ms
    }

    /// Length of one base period in fast sub-ticks
    pub const fn period_sub_ticks(&self) -> u16 {
        self.tick_ms * self.sub_ticks_per_ms
    }

    /// Highest fast counter value before it wraps (the base tick compare)
    pub const fn timer_top(&self) -> u16 {
        self.period_sub_ticks() - 1
    }

    /// Compare register value for a phase offset in ms
    pub const fn compare_for(&self, offset_ms: u16) -> u16 {
        offset_ms * self.sub_ticks_per_ms - 1
    }

    /// Compare register values for all four phases
    pub const fn phase_compares(&self) -> [u16; 4] {
        [
            self.compare_for(self.phase_offsets_ms[0]),
            self.compare_for(self.phase_offsets_ms[1]),
            self.compare_for(self.phase_offsets_ms[2]),
            self.compare_for(self.phase_offsets_ms[3]),
        ]
    }

    /// Check that the configuration describes a workable schedule
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTickPeriod);
        }
        if self.sub_ticks_per_ms == 0 {
            return Err(ConfigError::ZeroSubTicks);
        }
        let period = self.tick_ms as u32 * self.sub_ticks_per_ms as u32;
        if period > u16::MAX as u32 {
            return Err(ConfigError::PeriodTooLong);
        }
        if self.press_ticks() == 0 || self.release_ticks() == 0 {
            return Err(ConfigError::WindowShorterThanTick);
        }
        if self.idle_timeout_ticks == 0 {
            return Err(ConfigError::ZeroIdleTimeout);
        }

        let mut previous = 0;
        for &offset in &self.phase_offsets_ms {
            if offset <= previous {
                return Err(ConfigError::PhaseOffsetsNotIncreasing);
            }
            previous = offset;
        }

        // The last phase must fire strictly before the base tick compare.
        let last = previous as u32 * self.sub_ticks_per_ms as u32;
        if last >= period {
            return Err(ConfigError::PhaseOutsidePeriod);
        }

        Ok(())
    }
}
