//! Events that trigger state transitions

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Alarm time editing
    /// User started setting the hour
    BeginSetHour,
    /// User confirmed the previewed hour
    ConfirmHour,
    /// User started setting the minute
    BeginSetMinute,
    /// User confirmed the previewed minute
    ConfirmMinute,

    // Alarm lifecycle
    /// Double-press gesture while idle
    Arm,
    /// Gesture while active, or explicit reset
    Reset,
}

