//! Wall clock trait

use crate::time::ClockTime;

/// Errors that can occur reading the wall clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// Clock not running or not yet set
    NotRunning,
    /// Clock returned a time outside 00:00-23:59
    InvalidTime,
}

/// Source of the local time of day
pub trait WallClock {
    /// Read the current hour and minute
    fn now(&mut self) -> Result<ClockTime, ClockError>;
}

/// Clock that always reports the same time (tests and bring-up)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub ClockTime);

impl WallClock for FixedClock {
    fn now(&mut self) -> Result<ClockTime, ClockError> {
        Ok(self.0)
    }
}
