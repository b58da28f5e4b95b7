//! Front panel button task
//!
//! One instance per button. Buttons are active low with pull-ups.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Timer};

use chime_core::UserRequest;

use crate::channels::REQUESTS;

/// Settle time after a falling edge
const PRESS_DEBOUNCE_MS: u64 = 20;

/// Settle time after release
const RELEASE_DEBOUNCE_MS: u64 = 50;

/// Button task - sends `request` on every debounced press
#[embassy_executor::task(pool_size = 3)]
pub async fn button_task(mut btn: Input<'static>, request: UserRequest) {
    info!("Button task started: {:?}", request);

    loop {
        btn.wait_for_falling_edge().await;

        // Debounce
        Timer::after(Duration::from_millis(PRESS_DEBOUNCE_MS)).await;

        if btn.is_low() {
            debug!("Button: {:?}", request);
            REQUESTS.send(request).await;

            btn.wait_for_rising_edge().await;

            // Debounce after release
            Timer::after(Duration::from_millis(RELEASE_DEBOUNCE_MS)).await;
        }
    }
}
