//! Gated tick tasks
//!
//! The live preview and the alarm check each run a ticker that the
//! controller starts and stops. Exactly one task exists per ticker, so
//! starting an already running ticker only restarts its period.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Ticker};

use crate::channels::{
    TimerControl, ALARM_CHECK_CONTROL, ALARM_TICK, PREVIEW_CONTROL, PREVIEW_TICK,
};

/// Preview task - re-reads the potentiometer while a field is being set
#[embassy_executor::task]
pub async fn preview_task(interval_ms: u64) {
    info!("Preview task started ({} ms)", interval_ms);
    gated_ticker("Preview", &PREVIEW_CONTROL, &PREVIEW_TICK, interval_ms).await
}

/// Alarm check task - compares the wall clock with the alarm time
#[embassy_executor::task]
pub async fn alarm_check_task(interval_ms: u64) {
    info!("Alarm check task started ({} ms)", interval_ms);
    gated_ticker("Alarm check", &ALARM_CHECK_CONTROL, &ALARM_TICK, interval_ms).await
}

async fn gated_ticker(
    name: &'static str,
    control: &'static Signal<CriticalSectionRawMutex, TimerControl>,
    tick: &'static Signal<CriticalSectionRawMutex, ()>,
    interval_ms: u64,
) -> ! {
    let period = Duration::from_millis(interval_ms);

    loop {
        // Idle until started
        while control.wait().await != TimerControl::Start {}
        debug!("{} ticker started", name);

        let mut ticker = Ticker::every(period);
        loop {
            match select(control.wait(), ticker.next()).await {
                Either::First(TimerControl::Start) => ticker.reset(),
                Either::First(TimerControl::Stop) => break,
                Either::Second(()) => tick.signal(()),
            }
        }
        debug!("{} ticker stopped", name);
    }
}
