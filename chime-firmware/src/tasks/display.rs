//! Display task
//!
//! Redraws the panel when the snapshot changes and drives the flashing
//! alert by toggling the hardware inverse.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Duration, Ticker};

use crate::channels::DISPLAY_REFRESH;
use crate::display::sh1106::Sh1106;
use crate::display::{render, FLASH_PERIOD_MS, DISPLAY_STATE};

/// Display task - renders [`DISPLAY_STATE`] onto the OLED
#[embassy_executor::task]
pub async fn display_task(mut display: Sh1106<I2c<'static, I2C0, Async>>) {
    info!("Display task started");

    if let Err(e) = display.init().await {
        error!("Display init failed: {:?}", e);
    }

    let mut blink = Ticker::every(Duration::from_millis(FLASH_PERIOD_MS));
    let mut phase = false;
    let mut state = *DISPLAY_STATE.lock().await;
    let mut redraw = true;

    loop {
        if redraw {
            state = *DISPLAY_STATE.lock().await;
            // Drawing into the frame buffer cannot fail
            let _ = render(&state, &mut display);
            if let Err(e) = display.flush().await {
                warn!("Display flush failed: {:?}", e);
            }
            trace!("Display updated");
        }

        if !state.flashing {
            phase = false;
        }
        let inverse = state.inverted ^ (state.flashing && phase);
        if let Err(e) = display.set_inverted(inverse).await {
            warn!("Display invert failed: {:?}", e);
        }

        match select(DISPLAY_REFRESH.wait(), blink.next()).await {
            Either::First(()) => redraw = true,
            Either::Second(()) => {
                redraw = false;
                phase = !phase;
            }
        }
    }
}
