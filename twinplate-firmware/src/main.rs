//! Twinplate - two-plate toy cooker controller
//!
//! Firmware for STM32F042K6 boards driving two heating plates, each with
//! its own push-button. All control happens in one task that services the
//! shared timer; the executor sleeps between sub-ticks and stays asleep
//! while the timer is halted.
//!
//! Pinout:
//! - PA4, PA5: buttons A and B (to ground, internal pull-up)
//! - PA6, PA7: plate drivers A and B (active-high)

#![no_std]
#![no_main]

mod tasks;

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::bind_interrupts;
use embassy_stm32::exti::{self, ExtiInput};
use embassy_stm32::gpio::{Level, Output, Pull, Speed};
use {defmt_rtt as _, panic_probe as _};

use twinplate_core::config::TimingConfig;
use twinplate_core::PlateController;
use twinplate_drivers::PinBoard;

bind_interrupts!(struct Irqs {
    EXTI4_15 => exti::InterruptHandler<embassy_stm32::interrupt::typelevel::EXTI4_15>;
});

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Twinplate firmware starting...");

    let p = embassy_stm32::init(Default::default());

    let config = TimingConfig::DEFAULT;
    let controller = match PlateController::new(config) {
        Ok(controller) => controller,
        Err(e) => {
            // Plates were never driven, so leaving here is safe
            error!("Invalid timing configuration: {:?}", e);
            return;
        }
    };

    // Falling edge = press; the EXTI lines double as deep-sleep wake sources
    let buttons = [
        ExtiInput::new(p.PA4, p.EXTI4, Pull::Up, Irqs),
        ExtiInput::new(p.PA5, p.EXTI5, Pull::Up, Irqs),
    ];
    let plates = [
        Output::new(p.PA6, Level::Low, Speed::Low),
        Output::new(p.PA7, Level::Low, Speed::Low),
    ];
    let board = PinBoard::new(buttons, plates, &config);

    info!(
        "Timing: tick={}ms press={}ms release={}ms idle={} ticks",
        config.tick_ms, config.press_ms, config.release_ms, config.idle_timeout_ticks
    );

    spawner.spawn(tasks::control_task(board, controller)).unwrap();

    info!("All tasks spawned");
}
