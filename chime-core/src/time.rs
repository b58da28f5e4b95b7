//! Clock time and potentiometer scaling

use core::fmt::{self, Write};

use chime_protocol::{POT_MAX, POT_MIN};
use heapless::String;

/// Highest hour value
pub const MAX_HOUR: u8 = 23;

/// Highest minute value
pub const MAX_MINUTE: u8 = 59;

/// Hour and minute of day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    /// 00:00
    pub const MIDNIGHT: Self = Self { hour: 0, minute: 0 };

    /// Create a time, or `None` if either field is out of range
    pub const fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour > MAX_HOUR || minute > MAX_MINUTE {
            return None;
        }
        Some(Self { hour, minute })
    }

    /// Hour, 0-23
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// Minute, 0-59
    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Same time with a different hour
    pub fn with_hour(self, hour: u8) -> Option<Self> {
        Self::new(hour, self.minute)
    }

    /// Same time with a different minute
    pub fn with_minute(self, minute: u8) -> Option<Self> {
        Self::new(self.hour, minute)
    }

    /// Zero-padded `HH:MM`
    pub fn format(&self) -> String<5> {
        let mut out = String::new();
        // Always exactly five characters
        let _ = write!(out, "{:02}:{:02}", self.hour, self.minute);
        out
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Linearly map `value` from one range onto another
///
/// The input is clamped to `[from_low, from_high]` and the result is rounded
/// half-up, so the output always lies within `[to_low, to_high]`.
pub fn scale(value: i32, from_low: i32, from_high: i32, to_low: i32, to_high: i32) -> i32 {
    if from_high <= from_low {
        return to_low;
    }

    let value = value.clamp(from_low, from_high);
    // i128 holds the product of two full i32 spans
    let num = (value as i128 - from_low as i128) * (to_high as i128 - to_low as i128);
    let den = from_high as i128 - from_low as i128;

    // floor(num / den + 1/2)
    let rounded = (2 * num + den).div_euclid(2 * den);
    (to_low as i128 + rounded) as i32
}

fn scale_potentiometer(value: i32, pot_min: i32, pot_max: i32, max: u8) -> u8 {
    scale(value, pot_min, pot_max, 0, max as i32) as u8
}

/// Hour selected by a raw potentiometer reading
pub fn potentiometer_to_hour(value: i32) -> u8 {
    scale_potentiometer(value, POT_MIN, POT_MAX, MAX_HOUR)
}

/// Minute selected by a raw potentiometer reading
pub fn potentiometer_to_minute(value: i32) -> u8 {
    scale_potentiometer(value, POT_MIN, POT_MAX, MAX_MINUTE)
}

/// Hour for a potentiometer with a custom raw range
pub fn potentiometer_to_hour_in(value: i32, pot_min: i32, pot_max: i32) -> u8 {
    scale_potentiometer(value, pot_min, pot_max, MAX_HOUR)
}

/// Minute for a potentiometer with a custom raw range
pub fn potentiometer_to_minute_in(value: i32, pot_min: i32, pot_max: i32) -> u8 {
    scale_potentiometer(value, pot_min, pot_max, MAX_MINUTE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_format_zero_padded() {
        let time = ClockTime::new(7, 5).unwrap();
        assert_eq!(time.format().as_str(), "07:05");
        assert_eq!(ClockTime::MIDNIGHT.format().as_str(), "00:00");
        assert_eq!(ClockTime::new(23, 59).unwrap().format().as_str(), "23:59");
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(ClockTime::new(24, 0).is_none());
        assert!(ClockTime::new(0, 60).is_none());
        assert!(ClockTime::MIDNIGHT.with_hour(24).is_none());
    }

    #[test]
    fn test_with_fields() {
        let time = ClockTime::MIDNIGHT.with_hour(6).unwrap().with_minute(30).unwrap();
        assert_eq!(time.hour(), 6);
        assert_eq!(time.minute(), 30);
    }

    #[test]
    fn test_hour_endpoints() {
        assert_eq!(potentiometer_to_hour(0), 0);
        assert_eq!(potentiometer_to_hour(4095), 23);
        assert_eq!(potentiometer_to_minute(0), 0);
        assert_eq!(potentiometer_to_minute(4095), 59);
    }

    #[test]
    fn test_hour_rounding_boundary() {
        // 23 * 2047 / 4095 = 11.497
        assert_eq!(potentiometer_to_hour(2047), 11);
        // 23 * 2048 / 4095 = 11.503
        assert_eq!(potentiometer_to_hour(2048), 12);
    }

    #[test]
    fn test_minute_midpoint() {
        // 59 * 2048 / 4095 = 29.507
        assert_eq!(potentiometer_to_minute(2048), 30);
        // 59 * 2012 / 4095 = 28.988
        assert_eq!(potentiometer_to_minute(2012), 29);
    }

    #[test]
    fn test_exact_half_rounds_up() {
        // 1 * 1 / 2 = 0.5
        assert_eq!(scale(1, 0, 2, 0, 1), 1);
    }

    #[test]
    fn test_out_of_range_input_is_clamped() {
        assert_eq!(potentiometer_to_hour(-50), 0);
        assert_eq!(potentiometer_to_hour(10_000), 23);
    }

    #[test]
    fn test_custom_pot_range() {
        assert_eq!(potentiometer_to_hour_in(1023, 0, 1023), 23);
        assert_eq!(potentiometer_to_minute_in(0, 0, 1023), 0);
    }

    #[test]
    fn test_full_i32_range_does_not_overflow() {
        // 23 * 2^31 / (2^32 - 1) is just above 11.5
        assert_eq!(scale(0, i32::MIN, i32::MAX, 0, 23), 12);
        assert_eq!(scale(i32::MIN, i32::MIN, i32::MAX, 0, 23), 0);
        assert_eq!(scale(i32::MAX, i32::MIN, i32::MAX, 0, 23), 23);
        assert_eq!(scale(i32::MAX, i32::MIN, i32::MAX, i32::MIN, i32::MAX), i32::MAX);
        assert_eq!(potentiometer_to_hour_in(0, i32::MIN, i32::MAX), 12);
    }

    proptest! {
        #[test]
        fn prop_hour_bounded_and_monotonic(p in POT_MIN..POT_MAX) {
            let a = potentiometer_to_hour(p);
            let b = potentiometer_to_hour(p + 1);
            prop_assert!(a <= MAX_HOUR);
            prop_assert!(b <= MAX_HOUR);
            prop_assert!(a <= b);
        }

        #[test]
        fn prop_minute_bounded_and_monotonic(p in POT_MIN..POT_MAX) {
            let a = potentiometer_to_minute(p);
            let b = potentiometer_to_minute(p + 1);
            prop_assert!(a <= MAX_MINUTE);
            prop_assert!(a <= b);
        }

        #[test]
        fn prop_scale_within_target(v in any::<i32>(), to_high in 1i32..1000) {
            let out = scale(v, POT_MIN, POT_MAX, 0, to_high);
            prop_assert!((0..=to_high).contains(&out));
        }
    }
}
