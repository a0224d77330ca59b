//! Pin-level board
//!
//! Implements the control logic's `Peripheral` for any pair of
//! `embedded-hal` input pins (buttons, active-low with pull-ups) and output
//! pins (plate drivers, active-high). The timing unit is a [`CompareTimer`]
//! that the owner steps once per sub-tick via [`PinBoard::service`].

use embedded_hal::digital::{InputPin, OutputPin, PinState};
use twinplate_core::config::TimingConfig;
use twinplate_core::output::PwmStep;
use twinplate_core::state::TickReport;
use twinplate_core::PlateController;
use twinplate_hal::{Channel, Peripheral, PowerMode};

use crate::timer::CompareTimer;

/// What one sub-tick of service produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ServiceOutcome {
    /// Base tick report, if the base tick fired
    pub tick: Option<TickReport>,
    /// PWM step, if the compare matched
    pub pwm: Option<PwmStep>,
}

/// Buttons, plates and timer of one board
pub struct PinBoard<I, O> {
    buttons: [I; 2],
    plates: [O; 2],
    timer: CompareTimer,
    mode: PowerMode,
}

impl<I: InputPin, O: OutputPin> PinBoard<I, O> {
    /// Create a board
    ///
    /// Pins must already be configured (pull-ups on the buttons, push-pull
    /// on the plates). The timer starts stopped until the controller arms it.
    pub fn new(buttons: [I; 2], plates: [O; 2], config: &TimingConfig) -> Self {
        Self {
            buttons,
            plates,
            timer: CompareTimer::new(config.timer_top()),
            mode: PowerMode::Light,
        }
    }

    /// Advance the timer one sub-tick and run whichever handlers fired
    ///
    /// The base tick is serviced before the compare match.
    pub fn service(&mut self, controller: &mut PlateController) -> ServiceOutcome {
        let events = self.timer.step();
        let mut outcome = ServiceOutcome::default();

        if events.base_tick {
            outcome.tick = Some(controller.on_base_tick(self));
        }
        if events.compare_match {
            outcome.pwm = Some(controller.on_compare_match(self));
        }

        outcome
    }

    /// Button pins, e.g. to wait for an edge while the timer is halted
    pub fn buttons_mut(&mut self) -> &mut [I; 2] {
        &mut self.buttons
    }

    /// Plate pins
    pub fn plates(&self) -> &[O; 2] {
        &self.plates
    }

    /// Timing unit
    pub fn timer(&self) -> &CompareTimer {
        &self.timer
    }

    /// Last requested sleep depth
    pub fn power_mode(&self) -> PowerMode {
        self.mode
    }
}

impl<I: InputPin, O: OutputPin> Peripheral for PinBoard<I, O> {
    fn configure(&mut self) {
        for plate in &mut self.plates {
            let _ = plate.set_low();
        }
        self.timer.clear();
    }

    fn read_button(&mut self, channel: Channel) -> bool {
        // Pulled up; a read error counts as released
        matches!(self.buttons[channel.index()].is_low(), Ok(true))
    }

    fn set_output(&mut self, channel: Channel, high: bool) {
        let _ = self.plates[channel.index()].set_state(PinState::from(high));
    }

    fn arm_base_tick(&mut self) {
        self.timer.start();
    }

    fn arm_fast_tick(&mut self, compare: u16) {
        self.timer.set_compare(compare);
    }

    fn fast_compare(&self) -> u16 {
        self.timer.compare()
    }

    fn reset_fast_counter(&mut self) {
        self.timer.reset_counter();
    }

    fn set_power_mode(&mut self, mode: PowerMode) {
        self.mode = mode;
        match mode {
            PowerMode::Light => self.timer.start(),
            PowerMode::Deep => self.timer.halt(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;

    /// Mock button: `low` is the electrical level, so pressed = low
    struct MockButton {
        low: bool,
    }

    impl ErrorType for MockButton {
        type Error = Infallible;
    }

    impl InputPin for MockButton {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.low)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(self.low)
        }
    }

    /// Mock plate driver
    struct MockPlate {
        high: bool,
    }

    impl ErrorType for MockPlate {
        type Error = Infallible;
    }

    impl OutputPin for MockPlate {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            Ok(())
        }
    }

    type Board = PinBoard<MockButton, MockPlate>;

    const PERIOD: usize = 30;

    fn setup(config: TimingConfig) -> (Board, PlateController) {
        let board = PinBoard::new(
            [MockButton { low: false }, MockButton { low: false }],
            [MockPlate { high: true }, MockPlate { high: true }],
            &config,
        );
        let controller = PlateController::new(config).unwrap();
        (board, controller)
    }

    fn press(board: &mut Board, channel: Channel, pressed: bool) {
        board.buttons_mut()[channel.index()].low = pressed;
    }

    fn run(board: &mut Board, controller: &mut PlateController, base_ticks: usize) {
        for _ in 0..base_ticks * PERIOD {
            board.service(controller);
        }
    }

    fn click(board: &mut Board, controller: &mut PlateController, channel: Channel) {
        press(board, channel, true);
        run(board, controller, 5);
        press(board, channel, false);
        run(board, controller, 11);
    }

    /// Sub-ticks each plate spends high over one period
    fn high_time(board: &mut Board, controller: &mut PlateController) -> [usize; 2] {
        let mut high = [0; 2];
        for _ in 0..PERIOD {
            board.service(controller);
            for (count, plate) in high.iter_mut().zip(board.plates()) {
                if plate.high {
                    *count += 1;
                }
            }
        }
        high
    }

    #[test]
    fn test_start_drives_plates_low() {
        let (mut board, mut controller) = setup(TimingConfig::DEFAULT);
        controller.start(&mut board);

        assert!(board.plates().iter().all(|p| !p.high));
        assert!(board.timer().is_running());
        assert_eq!(board.timer().compare(), 2);
    }

    #[test]
    fn test_button_read_is_active_low() {
        let (mut board, _) = setup(TimingConfig::DEFAULT);
        assert!(!board.read_button(Channel::A));
        press(&mut board, Channel::A, true);
        assert!(board.read_button(Channel::A));
        assert!(!board.read_button(Channel::B));
    }

    #[test]
    fn test_click_runs_pwm_on_one_plate() {
        let (mut board, mut controller) = setup(TimingConfig::DEFAULT);
        controller.start(&mut board);

        click(&mut board, &mut controller, Channel::A);
        assert!(controller.is_active(Channel::A));

        assert_eq!(high_time(&mut board, &mut controller), [9, 0]);
        assert_eq!(high_time(&mut board, &mut controller), [9, 0]);
    }

    #[test]
    fn test_both_plates_never_overlap() {
        let (mut board, mut controller) = setup(TimingConfig::DEFAULT);
        controller.start(&mut board);

        click(&mut board, &mut controller, Channel::A);
        click(&mut board, &mut controller, Channel::B);

        for _ in 0..PERIOD * 4 {
            board.service(&mut controller);
            let [a, b] = board.plates();
            assert!(!(a.high && b.high));
        }
        assert_eq!(high_time(&mut board, &mut controller), [9, 9]);
    }

    #[test]
    fn test_idle_board_halts_timer() {
        let (mut board, mut controller) = setup(TimingConfig::DEFAULT);
        controller.start(&mut board);

        run(&mut board, &mut controller, 1);
        assert_eq!(board.power_mode(), PowerMode::Deep);
        assert!(!board.timer().is_running());

        let counter = board.timer().counter();
        for _ in 0..100 {
            assert_eq!(board.service(&mut controller), ServiceOutcome::default());
        }
        assert_eq!(board.timer().counter(), counter);
    }

    #[test]
    fn test_button_edge_restarts_timer() {
        let (mut board, mut controller) = setup(TimingConfig::DEFAULT);
        controller.start(&mut board);
        run(&mut board, &mut controller, 1);
        assert!(!board.timer().is_running());

        press(&mut board, Channel::B, true);
        controller.on_button_edge(&mut board);
        assert!(board.timer().is_running());

        let ticks = (0..PERIOD)
            .filter(|_| board.service(&mut controller).tick.is_some())
            .count();
        assert_eq!(ticks, 1);
        assert_eq!(board.power_mode(), PowerMode::Light);
    }

    #[test]
    fn test_idle_shutoff_stops_heating() {
        let config = TimingConfig {
            idle_timeout_ticks: 40,
            ..TimingConfig::DEFAULT
        };
        let (mut board, mut controller) = setup(config);
        controller.start(&mut board);

        click(&mut board, &mut controller, Channel::A);
        assert!(controller.is_active(Channel::A));

        run(&mut board, &mut controller, 40);
        assert!(!controller.is_active(Channel::A));
        assert!(board.plates().iter().all(|p| !p.high));
        assert_eq!(board.power_mode(), PowerMode::Deep);
    }

    #[test]
    fn test_desynced_compare_recovers() {
        let (mut board, mut controller) = setup(TimingConfig::DEFAULT);
        controller.start(&mut board);
        click(&mut board, &mut controller, Channel::A);

        board.arm_fast_tick(5);
        let mut resynced = false;
        for _ in 0..PERIOD {
            if board.service(&mut controller).pwm == Some(PwmStep::Resynced) {
                resynced = true;
                break;
            }
        }
        assert!(resynced);
        assert_eq!(board.timer().counter(), 0);
        assert_eq!(board.timer().compare(), 2);

        // Back on schedule from the next period
        run(&mut board, &mut controller, 1);
        assert_eq!(high_time(&mut board, &mut controller), [9, 0]);
    }
}
