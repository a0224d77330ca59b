//! Asymmetric button debouncer
//!
//! Each button is sampled once per base tick. While the raw sample agrees
//! with the debounced state the counter is held at the window for the next
//! transition; while it disagrees the counter runs down, and the toggle is
//! confirmed on the sample that takes it from 0 past zero.
//!
//! Presses confirm fast, releases confirm slower so a lifting finger does
//! not flicker the state.

use crate::config::TimingConfig;

/// Confirmation windows in base ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DebounceWindows {
    /// Ticks to confirm a press (armed while released)
    pub press: u16,
    /// Ticks to confirm a release (armed while pressed)
    pub release: u16,
}

impl DebounceWindows {
    /// Derive windows from the timing configuration
    pub const fn from_config(config: &TimingConfig) -> Self {
        Self {
            press: config.press_ticks(),
            release: config.release_ticks(),
        }
    }

    /// Window needed to leave the given debounced state
    pub const fn leaving(&self, pressed: bool) -> u16 {
        if pressed {
            self.release
        } else {
            self.press
        }
    }
}

/// One debounce step
///
/// Returns `true` when a toggle is confirmed. The caller owns the debounced
/// state and applies the flip.
pub fn debounce(pressed: bool, raw: bool, count: &mut u16, windows: &DebounceWindows) -> bool {
    if raw == pressed {
        *count = windows.leaving(pressed);
        return false;
    }

    *count = count.wrapping_sub(1);
    if count.wrapping_add(1) == 0 {
        // The new debounced state will equal `raw`
        *count = windows.leaving(raw);
        return true;
    }

    false
}

/// Debounce state for one button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonChannel {
    /// Debounced state (true = pressed)
    pressed: bool,
    /// Ticks left in the current transition window
    count: u16,
}

impl ButtonChannel {
    /// Create a released button armed with the press window
    pub const fn new(windows: &DebounceWindows) -> Self {
        Self {
            pressed: false,
            count: windows.press,
        }
    }

    /// Feed one raw sample; returns `true` on a confirmed toggle
    ///
    /// The debounced state is left untouched; call [`ButtonChannel::toggle`]
    /// to apply a confirmed transition.
    pub fn sample(&mut self, raw: bool, windows: &DebounceWindows) -> bool {
        debounce(self.pressed, raw, &mut self.count, windows)
    }

    /// Apply a confirmed transition and return the new state
    pub fn toggle(&mut self) -> bool {
        self.pressed = !self.pressed;
        self.pressed
    }

    /// Debounced state (true = pressed)
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Ticks left in the current window
    pub fn count(&self) -> u16 {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const WINDOWS: DebounceWindows = DebounceWindows::from_config(&TimingConfig::DEFAULT);

    /// Feed samples, applying confirmed toggles; returns the indices that confirmed
    fn run(button: &mut ButtonChannel, samples: &[bool]) -> heapless::Vec<usize, 64> {
        let mut confirmed = heapless::Vec::new();
        for (i, &raw) in samples.iter().enumerate() {
            if button.sample(raw, &WINDOWS) {
                button.toggle();
                confirmed.push(i).unwrap();
            }
        }
        confirmed
    }

    #[test]
    fn test_windows() {
        assert_eq!(WINDOWS.press, 4);
        assert_eq!(WINDOWS.release, 10);
        assert_eq!(WINDOWS.leaving(false), 4);
        assert_eq!(WINDOWS.leaving(true), 10);
    }

    #[test]
    fn test_agreement_rearms() {
        let mut count = 0;
        assert!(!debounce(false, false, &mut count, &WINDOWS));
        assert_eq!(count, 4);

        assert!(!debounce(true, true, &mut count, &WINDOWS));
        assert_eq!(count, 10);
    }

    #[test]
    fn test_wrap_fires_once() {
        // Counter at zero: next disagreeing sample wraps and confirms
        let mut count = 0;
        assert!(debounce(false, true, &mut count, &WINDOWS));
        assert_eq!(count, WINDOWS.release);

        // Counter at one: first sample only reaches zero
        let mut count = 1;
        assert!(!debounce(false, true, &mut count, &WINDOWS));
        assert_eq!(count, 0);
        assert!(debounce(false, true, &mut count, &WINDOWS));
    }

    #[test]
    fn test_press_confirms_on_fifth_sample() {
        let mut button = ButtonChannel::new(&WINDOWS);
        let confirmed = run(&mut button, &[true; 5]);
        assert_eq!(confirmed.as_slice(), &[4]);
        assert!(button.is_pressed());
        assert_eq!(button.count(), WINDOWS.release);
    }

    #[test]
    fn test_release_confirms_on_eleventh_sample() {
        let mut button = ButtonChannel::new(&WINDOWS);
        run(&mut button, &[true; 5]);

        let confirmed = run(&mut button, &[false; 11]);
        assert_eq!(confirmed.as_slice(), &[10]);
        assert!(!button.is_pressed());
        assert_eq!(button.count(), WINDOWS.press);
    }

    #[test]
    fn test_bounce_is_ignored() {
        let mut button = ButtonChannel::new(&WINDOWS);
        let confirmed = run(&mut button, &[true, true, false, true, true, true, false]);
        assert!(confirmed.is_empty());
        assert!(!button.is_pressed());
    }

    #[test]
    fn test_held_button_confirms_once() {
        let mut button = ButtonChannel::new(&WINDOWS);
        let confirmed = run(&mut button, &[true; 40]);
        assert_eq!(confirmed.as_slice(), &[4]);
    }

    proptest! {
        /// A toggle happens exactly when `window + 1` consecutive samples disagree
        #[test]
        fn prop_confirms_after_full_window(samples in prop::collection::vec(any::<bool>(), 0..64)) {
            let mut button = ButtonChannel::new(&WINDOWS);
            let mut run_length: u16 = 0;

            for &raw in &samples {
                let before = button.is_pressed();
                if raw != before {
                    run_length += 1;
                } else {
                    run_length = 0;
                }

                let confirmed = button.sample(raw, &WINDOWS);
                prop_assert_eq!(confirmed, run_length == WINDOWS.leaving(before) + 1);

                if confirmed {
                    button.toggle();
                    run_length = 0;
                }
            }
        }
    }
}
