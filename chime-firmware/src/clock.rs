//! RP2040 RTC as the alarm's wall clock

use defmt::*;
use embassy_rp::peripherals::RTC;
use embassy_rp::rtc::{DateTime, DayOfWeek, Rtc};

use chime_core::traits::{ClockError, WallClock};
use chime_core::ClockTime;

/// Wall clock backed by the on-chip RTC
pub struct RtcClock {
    rtc: Rtc<'static, RTC>,
}

impl RtcClock {
    /// Take the RTC and start it at `start`
    ///
    /// A failed seed is logged; reads then report [`ClockError::NotRunning`]
    /// and the alarm never fires.
    pub fn new(mut rtc: Rtc<'static, RTC>, start: DateTime) -> Self {
        let (hour, minute) = (start.hour, start.minute);
        match rtc.set_datetime(start) {
            Ok(()) => info!("RTC set to {}:{}", hour, minute),
            Err(_) => error!("RTC rejected start time, alarm check disabled"),
        }
        Self { rtc }
    }
}

impl WallClock for RtcClock {
    fn now(&mut self) -> Result<ClockTime, ClockError> {
        let now = self.rtc.now().map_err(|_| ClockError::NotRunning)?;
        ClockTime::new(now.hour, now.minute).ok_or(ClockError::InvalidTime)
    }
}

/// Local time of the firmware build, recorded by build.rs
pub fn build_time() -> DateTime {
    DateTime {
        year: env!("CHIME_BUILD_YEAR").parse().unwrap_or(2000),
        month: field(env!("CHIME_BUILD_MONTH"), 1),
        day: field(env!("CHIME_BUILD_DAY"), 1),
        day_of_week: day_of_week(field(env!("CHIME_BUILD_WEEKDAY"), 0)),
        hour: field(env!("CHIME_BUILD_HOUR"), 0),
        minute: field(env!("CHIME_BUILD_MINUTE"), 0),
        second: field(env!("CHIME_BUILD_SECOND"), 0),
    }
}

fn field(value: &str, fallback: u8) -> u8 {
    value.parse().unwrap_or(fallback)
}

/// Days since Sunday
fn day_of_week(days: u8) -> DayOfWeek {
    match days {
        1 => DayOfWeek::Monday,
        2 => DayOfWeek::Tuesday,
        3 => DayOfWeek::Wednesday,
        4 => DayOfWeek::Thursday,
        5 => DayOfWeek::Friday,
        6 => DayOfWeek::Saturday,
        _ => DayOfWeek::Sunday,
    }
}
