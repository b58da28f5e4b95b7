//! Chime - Alarm Clock Front Panel Firmware
//!
//! Main firmware binary for the RP2040-based front panel. A sensor board
//! streams potentiometer and button samples over UART; the panel turns
//! them into an alarm time, watches the RTC and rings the buzzer.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{I2C0, UART1};
use embassy_rp::pwm::{self, Pwm};
use embassy_rp::rtc::Rtc;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use chime_core::config::ControllerConfig;
use chime_core::UserRequest;
use chime_protocol::BAUD_RATE;

mod audio;
mod channels;
mod clock;
mod display;
mod tasks;

use crate::audio::Buzzer;
use crate::clock::RtcClock;
use crate::display::sh1106::Sh1106;

bind_interrupts!(struct Irqs {
    UART1_IRQ => BufferedInterruptHandler<UART1>;
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
    RTC_IRQ => embassy_rp::rtc::InterruptHandler;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Chime firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = ControllerConfig::default();
    if let Err(e) = config.validate() {
        error!("Invalid controller config: {:?}", e);
        return;
    }

    // Sensor link (UART1: GPIO4 = TX, GPIO5 = RX)
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = BAUD_RATE;

    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART1, p.PIN_4, p.PIN_5, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized for sensor link");

    // OLED (I2C0: GPIO16 = SDA, GPIO17 = SCL)
    let i2c = I2c::new_async(p.I2C0, p.PIN_17, p.PIN_16, Irqs, i2c::Config::default());
    let display = Sh1106::new(i2c);

    // Buzzer (GPIO15 = PWM slice 7 channel B)
    let pwm = Pwm::new_output_b(p.PWM_SLICE7, p.PIN_15, pwm::Config::default());
    let buzzer = Buzzer::new(pwm);

    // Wall clock, started from the build time
    let clock = RtcClock::new(Rtc::new(p.RTC, Irqs), clock::build_time());

    // Buttons (active low)
    let set_hour = Input::new(p.PIN_18, Pull::Up);
    let set_minute = Input::new(p.PIN_19, Pull::Up);
    let reset = Input::new(p.PIN_20, Pull::Up);

    spawner.spawn(tasks::link_rx_task(rx)).unwrap();
    spawner.spawn(tasks::link_tx_task(tx)).unwrap();
    spawner
        .spawn(tasks::preview_task(config.preview_interval_ms))
        .unwrap();
    spawner
        .spawn(tasks::alarm_check_task(config.alarm_check_interval_ms))
        .unwrap();
    spawner.spawn(tasks::display_task(display)).unwrap();
    spawner.spawn(tasks::audio_task(buzzer)).unwrap();
    spawner
        .spawn(tasks::button_task(set_hour, UserRequest::SetHour))
        .unwrap();
    spawner
        .spawn(tasks::button_task(set_minute, UserRequest::SetMinute))
        .unwrap();
    spawner
        .spawn(tasks::button_task(reset, UserRequest::Reset))
        .unwrap();
    spawner.spawn(tasks::controller_task(config, clock)).unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
