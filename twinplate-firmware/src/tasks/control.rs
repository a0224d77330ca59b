//! Control task
//!
//! Steps the shared compare timer at the fast sub-tick rate and hands the
//! resulting events to the controller. While the controller has asked for
//! deep sleep the ticker is left alone and the task waits for a falling
//! edge on either button instead.

use defmt::*;
use embassy_futures::select::select;
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::Output;
use embassy_time::{Duration, Ticker};

use twinplate_core::output::PwmStep;
use twinplate_core::state::{ControlEvent, TickReport};
use twinplate_core::PlateController;
use twinplate_drivers::PinBoard;

/// Board wired to the STM32 pins
pub type Board = PinBoard<ExtiInput<'static>, Output<'static>>;

/// Control task - runs the timer service loop forever
#[embassy_executor::task]
pub async fn control_task(mut board: Board, mut controller: PlateController) {
    info!("Control task started");

    controller.start(&mut board);

    let sub_tick_hz = u64::from(controller.config().sub_ticks_per_ms) * 1000;
    let mut ticker = Ticker::every(Duration::from_hz(sub_tick_hz));

    loop {
        if !board.power_mode().ticks_running() {
            debug!("Timer halted, waiting for button");

            let [a, b] = board.buttons_mut();
            select(a.wait_for_falling_edge(), b.wait_for_falling_edge()).await;

            let mode = controller.on_button_edge(&mut board);
            debug!("Button edge, power mode {:?}", mode);

            // Don't replay the sub-ticks missed while halted
            ticker.reset();
            continue;
        }

        ticker.next().await;

        let outcome = board.service(&mut controller);
        if let Some(report) = outcome.tick {
            log_report(&report);
        }
        if outcome.pwm == Some(PwmStep::Resynced) {
            warn!("PWM compare out of phase, counter reset");
        }
    }
}

/// Log what a base tick changed
fn log_report(report: &TickReport) {
    for event in &report.events {
        match *event {
            ControlEvent::ButtonConfirmed { channel, pressed } => {
                trace!("Button {:?} pressed={}", channel, pressed);
            }
            ControlEvent::OutputSwitched { channel, on } => {
                info!("Plate {:?} {}", channel, if on { "on" } else { "off" });
            }
            ControlEvent::IdleShutoff => {
                warn!("Idle timeout, plates forced off");
            }
            ControlEvent::PowerModeChanged(mode) => {
                debug!("Power mode {:?}", mode);
            }
        }
    }
}
