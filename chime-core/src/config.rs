//! Configuration types
//!
//! Compiled-in defaults for the controller timing. Nothing is read from
//! storage; the front panel always boots with these values.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use chime_protocol::{POT_MAX, POT_MIN};

/// Lower bound of the gesture window (exclusive)
pub const DEFAULT_GESTURE_MIN_MS: u64 = 400;

/// Upper bound of the gesture window (exclusive)
pub const DEFAULT_GESTURE_MAX_MS: u64 = 5000;

/// Alarm check cadence
pub const DEFAULT_ALARM_CHECK_INTERVAL_MS: u64 = 1000;

/// Live preview cadence (~60 Hz)
pub const DEFAULT_PREVIEW_INTERVAL_MS: u64 = 16;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Gesture window admits no interval
    EmptyGestureWindow,
    /// A timer interval is zero
    ZeroInterval,
    /// Potentiometer range is empty or inverted
    InvalidPotentiometerRange,
}

/// Interval between two pressed samples that counts as a deliberate gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GestureWindow {
    /// Shorter gaps are treated as contact noise
    pub min_ms: u64,
    /// Longer gaps are treated as unrelated presses
    pub max_ms: u64,
}

impl Default for GestureWindow {
    fn default() -> Self {
        Self {
            min_ms: DEFAULT_GESTURE_MIN_MS,
            max_ms: DEFAULT_GESTURE_MAX_MS,
        }
    }
}

impl GestureWindow {
    /// Returns true if `elapsed_ms` lies strictly inside the window
    pub fn contains(&self, elapsed_ms: u64) -> bool {
        elapsed_ms > self.min_ms && elapsed_ms < self.max_ms
    }
}

/// Controller configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControllerConfig {
    /// Double-press gesture window
    pub gesture: GestureWindow,
    /// Period of the alarm check while the alarm is active
    pub alarm_check_interval_ms: u64,
    /// Period of the live preview while setting a field
    pub preview_interval_ms: u64,
    /// Lowest raw potentiometer value
    pub potentiometer_min: i32,
    /// Highest raw potentiometer value
    pub potentiometer_max: i32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            gesture: GestureWindow::default(),
            alarm_check_interval_ms: DEFAULT_ALARM_CHECK_INTERVAL_MS,
            preview_interval_ms: DEFAULT_PREVIEW_INTERVAL_MS,
            potentiometer_min: POT_MIN,
            potentiometer_max: POT_MAX,
        }
    }
}

impl ControllerConfig {
    /// Check the configuration for values the controller cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Strict bounds need at least one integer between them
        if self.gesture.max_ms <= self.gesture.min_ms.saturating_add(1) {
            return Err(ConfigError::EmptyGestureWindow);
        }
        if self.alarm_check_interval_ms == 0 || self.preview_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if self.potentiometer_max <= self.potentiometer_min {
            return Err(ConfigError::InvalidPotentiometerRange);
        }
        Ok(())
    }
}
