//! State machine definition

use super::events::Event;

/// Controller states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerState {
    /// Showing the confirmed alarm time, controls available
    #[default]
    Idle,
    /// Hour tracks the potentiometer until confirmed
    SettingHour,
    /// Minute tracks the potentiometer until confirmed
    SettingMinute,
    /// Alarm armed: controls locked, wall clock checked every second
    AlarmActive,
}

impl ControllerState {
    /// Check if a field is being set
    pub fn is_setting(&self) -> bool {
        matches!(
            self,
            ControllerState::SettingHour | ControllerState::SettingMinute
        )
    }

    /// Check if the set buttons are locked
    pub fn controls_locked(&self) -> bool {
        matches!(self, ControllerState::AlarmActive)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        use ControllerState::*;
        use Event::*;

        match (self, event) {
            // Reset always wins
            (_, Reset) => Idle,

            // Idle transitions
            (Idle, BeginSetHour) => SettingHour,
            (Idle, BeginSetMinute) => SettingMinute,
            (Idle, Arm) => AlarmActive,

            // Setting transitions
            (SettingHour, ConfirmHour) => Idle,
            (SettingMinute, ConfirmMinute) => Idle,

            // Default: stay in current state
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ControllerState; 4] = [
        ControllerState::Idle,
        ControllerState::SettingHour,
        ControllerState::SettingMinute,
        ControllerState::AlarmActive,
    ];

    #[test]
    fn test_set_hour_flow() {
        let setting = ControllerState::Idle.transition(Event::BeginSetHour);
        assert_eq!(setting, ControllerState::SettingHour);
        assert!(setting.is_setting());
        assert_eq!(setting.transition(Event::ConfirmHour), ControllerState::Idle);
    }

    #[test]
    fn test_set_minute_flow() {
        let setting = ControllerState::Idle.transition(Event::BeginSetMinute);
        assert_eq!(setting, ControllerState::SettingMinute);
        assert_eq!(
            setting.transition(Event::ConfirmMinute),
            ControllerState::Idle
        );
    }

    #[test]
    fn test_reset_from_any_state() {
        for state in ALL {
            assert_eq!(state.transition(Event::Reset), ControllerState::Idle);
        }
    }

    #[test]
    fn test_arm_only_from_idle() {
        assert_eq!(
            ControllerState::Idle.transition(Event::Arm),
            ControllerState::AlarmActive
        );
        for state in [ControllerState::SettingHour, ControllerState::SettingMinute] {
            assert_eq!(state.transition(Event::Arm), state);
        }
    }

    #[test]
    fn test_active_ignores_everything_but_reset() {
        let active = ControllerState::AlarmActive;
        assert!(active.controls_locked());
        for event in [
            Event::BeginSetHour,
            Event::BeginSetMinute,
            Event::ConfirmHour,
            Event::ConfirmMinute,
            Event::Arm,
        ] {
            assert_eq!(active.transition(event), active);
        }
    }

    #[test]
    fn test_settings_are_exclusive() {
        assert_eq!(
            ControllerState::SettingHour.transition(Event::BeginSetMinute),
            ControllerState::SettingHour
        );
        assert_eq!(
            ControllerState::SettingMinute.transition(Event::ConfirmHour),
            ControllerState::SettingMinute
        );
    }
}
