//! Mode controller
//!
//! Owns the controller state and the alarm time. Every operation returns
//! the side effects it wants applied (display, audio, timers, device
//! commands) instead of touching hardware, so the firmware tasks stay thin
//! and the behaviour can be tested on the host.

use chime_protocol::{DeviceCommand, SensorSample};
use heapless::Vec;

use crate::config::ControllerConfig;
use crate::gesture::{ButtonEdge, GestureDetector};
use crate::sound::AlarmSound;
use crate::state::{ControllerState, Event};
use crate::time::{potentiometer_to_hour_in, potentiometer_to_minute_in, ClockTime};
use crate::traits::{ClockError, WallClock};

/// Upper bound on effects produced by a single operation
pub const MAX_EFFECTS: usize = 12;

/// Effects produced by a single operation, in the order to apply them
pub type Effects = Vec<Effect, MAX_EFFECTS>;

/// Requests from the front panel buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UserRequest {
    /// "Set Hour" button: begins setting, or confirms when already setting
    SetHour,
    /// "Set Minute" button: begins setting, or confirms when already setting
    SetMinute,
    /// "Reset" button
    Reset,
}

/// Alarm time field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    Hour,
    Minute,
}

/// Side effect requested by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Effect {
    /// Render this time on the clock face
    ShowTime(ClockTime),
    /// Send a command to the sensor board
    SendCommand(DeviceCommand),
    /// Start playing an alarm sound from the beginning
    PlaySound(AlarmSound),
    /// Stop playback and rewind
    StopSound,
    /// Flashing alert on/off
    Flash(bool),
    /// Inverted clock face on/off
    Invert(bool),
    /// Set buttons locked (reset stays available)
    LockControls(bool),
    /// Start the live preview ticker for a field
    StartPreview(Field),
    /// Stop the live preview ticker
    StopPreview,
    /// Start the periodic alarm check
    StartAlarmCheck,
    /// Cancel the periodic alarm check
    CancelAlarmCheck,
}

fn push(effects: &mut Effects, effect: Effect) {
    // No operation emits more than MAX_EFFECTS
    let _ = effects.push(effect);
}

/// Alarm mode controller
#[derive(Debug, Clone)]
pub struct Controller {
    config: ControllerConfig,
    state: ControllerState,
    /// Alarm target, fixed on confirmation
    confirmed: ClockTime,
    /// What the clock face shows; differs from `confirmed` only in the field
    /// being set
    displayed: ClockTime,
    /// Most recent sensor sample
    latest: Option<SensorSample>,
    gesture: GestureDetector,
    /// Alarm sound started for the current matching minute
    ringing: bool,
    flashing: bool,
    inverted: bool,
    /// Periodic alarm check has been started and not cancelled
    alarm_check_running: bool,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(ControllerConfig::default())
    }
}

impl Controller {
    /// Create a controller in the idle state with the alarm at 00:00
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            config,
            state: ControllerState::Idle,
            confirmed: ClockTime::MIDNIGHT,
            displayed: ClockTime::MIDNIGHT,
            latest: None,
            gesture: GestureDetector::new(config.gesture),
            ringing: false,
            flashing: false,
            inverted: false,
            alarm_check_running: false,
        }
    }

    /// Get current state
    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Confirmed alarm time
    pub fn confirmed_time(&self) -> ClockTime {
        self.confirmed
    }

    /// Time currently shown on the clock face
    pub fn displayed_time(&self) -> ClockTime {
        self.displayed
    }

    pub fn is_ringing(&self) -> bool {
        self.ringing
    }

    pub fn is_flashing(&self) -> bool {
        self.flashing
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    pub fn alarm_check_running(&self) -> bool {
        self.alarm_check_running
    }

    /// Caption for the hour button
    pub fn hour_caption(&self) -> &'static str {
        if self.state == ControllerState::SettingHour {
            "Confirm Hour"
        } else {
            "Set Hour"
        }
    }

    /// Caption for the minute button
    pub fn minute_caption(&self) -> &'static str {
        if self.state == ControllerState::SettingMinute {
            "Confirm Minute"
        } else {
            "Set Minute"
        }
    }

    /// Apply an event to the state machine; returns true if the state changed
    fn apply(&mut self, event: Event) -> bool {
        let next = self.state.transition(event);
        let changed = next != self.state;
        self.state = next;
        changed
    }

    /// Handle a front panel button
    pub fn handle_request(&mut self, request: UserRequest) -> Effects {
        use ControllerState::*;

        if self.state.controls_locked() && request != UserRequest::Reset {
            return Effects::new();
        }

        match (request, self.state) {
            (UserRequest::SetHour, Idle) => self.begin_setting(Field::Hour),
            (UserRequest::SetHour, SettingHour) => self.confirm(Field::Hour),
            (UserRequest::SetMinute, Idle) => self.begin_setting(Field::Minute),
            (UserRequest::SetMinute, SettingMinute) => self.confirm(Field::Minute),
            (UserRequest::Reset, _) => self.reset(),
            // The other field is being set
            _ => Effects::new(),
        }
    }

    fn begin_setting(&mut self, field: Field) -> Effects {
        let mut effects = Effects::new();
        let event = match field {
            Field::Hour => Event::BeginSetHour,
            Field::Minute => Event::BeginSetMinute,
        };
        if !self.apply(event) {
            return effects;
        }

        push(&mut effects, Effect::StartPreview(field));
        // First preview frame runs immediately
        if let Some(time) = self.preview_tick() {
            push(&mut effects, Effect::ShowTime(time));
        }
        effects
    }

    fn confirm(&mut self, field: Field) -> Effects {
        let mut effects = Effects::new();
        let (event, command, confirmed) = match field {
            Field::Hour => (
                Event::ConfirmHour,
                DeviceCommand::SetHour(self.displayed.hour()),
                self.confirmed.with_hour(self.displayed.hour()),
            ),
            Field::Minute => (
                Event::ConfirmMinute,
                DeviceCommand::SetMinute(self.displayed.minute()),
                self.confirmed.with_minute(self.displayed.minute()),
            ),
        };
        if !self.apply(event) {
            return effects;
        }

        if let Some(time) = confirmed {
            self.confirmed = time;
        }
        self.displayed = self.confirmed;

        push(&mut effects, Effect::StopPreview);
        push(&mut effects, Effect::SendCommand(command));
        push(&mut effects, Effect::ShowTime(self.displayed));
        effects
    }

    /// Recompute the field being set from the latest sample
    ///
    /// Returns the new displayed time if it changed. Does nothing outside the
    /// setting modes or before the first sample has arrived.
    pub fn preview_tick(&mut self) -> Option<ClockTime> {
        let sample = self.latest?;
        let (pot_min, pot_max) = (self.config.potentiometer_min, self.config.potentiometer_max);

        let next = match self.state {
            ControllerState::SettingHour => self
                .displayed
                .with_hour(potentiometer_to_hour_in(sample.potentiometer, pot_min, pot_max))?,
            ControllerState::SettingMinute => self
                .displayed
                .with_minute(potentiometer_to_minute_in(sample.potentiometer, pot_min, pot_max))?,
            _ => return None,
        };

        if next == self.displayed {
            return None;
        }
        self.displayed = next;
        Some(next)
    }

    /// Take a new sensor sample
    ///
    /// A double-press gesture arms the alarm from idle and resets it from the
    /// active state. Gestures while setting a field are ignored.
    pub fn ingest(&mut self, sample: SensorSample) -> Effects {
        self.latest = Some(sample);

        if self.gesture.observe(&sample) != ButtonEdge::Gesture {
            return Effects::new();
        }

        match self.state {
            ControllerState::AlarmActive => self.reset(),
            ControllerState::Idle => self.arm(),
            _ => Effects::new(),
        }
    }

    fn arm(&mut self) -> Effects {
        let mut effects = Effects::new();
        if !self.apply(Event::Arm) {
            return effects;
        }

        self.inverted = true;
        push(&mut effects, Effect::Invert(true));
        push(&mut effects, Effect::LockControls(true));

        // One alarm check timer at most
        if !self.alarm_check_running {
            self.alarm_check_running = true;
            push(&mut effects, Effect::StartAlarmCheck);
        }
        effects
    }

    /// Periodic alarm check
    ///
    /// Starts the alarm once when the wall clock reaches the confirmed time
    /// and clears the alert once the minute has passed. The clock is only
    /// read while the alarm is active.
    pub fn check_alarm<C, R>(&mut self, clock: &mut C, entropy: R) -> Result<Effects, ClockError>
    where
        C: WallClock,
        R: FnOnce() -> u32,
    {
        let mut effects = Effects::new();
        if self.state != ControllerState::AlarmActive {
            return Ok(effects);
        }

        let now = clock.now()?;
        if now == self.confirmed {
            if !self.ringing {
                let sound = AlarmSound::from_random(entropy());
                self.ringing = true;
                self.flashing = true;
                push(&mut effects, Effect::PlaySound(sound));
                push(&mut effects, Effect::Flash(true));
            }
        } else if self.ringing || self.flashing {
            self.ringing = false;
            self.flashing = false;
            push(&mut effects, Effect::Flash(false));
        }

        Ok(effects)
    }

    /// Return everything to defaults
    ///
    /// Honoured in every state.
    pub fn reset(&mut self) -> Effects {
        let mut effects = Effects::new();
        let was_setting = self.state.is_setting();

        self.apply(Event::Reset);
        self.confirmed = ClockTime::MIDNIGHT;
        self.displayed = ClockTime::MIDNIGHT;
        self.ringing = false;
        self.flashing = false;
        self.inverted = false;

        if was_setting {
            push(&mut effects, Effect::StopPreview);
        }
        if self.alarm_check_running {
            self.alarm_check_running = false;
            push(&mut effects, Effect::CancelAlarmCheck);
        }
        push(&mut effects, Effect::StopSound);
        push(&mut effects, Effect::Flash(false));
        push(&mut effects, Effect::Invert(false));
        push(&mut effects, Effect::LockControls(false));
        push(&mut effects, Effect::ShowTime(ClockTime::MIDNIGHT));
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::clock::FixedClock;
    use chime_protocol::LineDecoder;

    struct StoppedClock;

    impl WallClock for StoppedClock {
        fn now(&mut self) -> Result<ClockTime, ClockError> {
            Err(ClockError::NotRunning)
        }
    }

    fn sample(potentiometer: i32, button: i32, at_ms: u64) -> SensorSample {
        SensorSample {
            potentiometer,
            button,
            at_ms,
        }
    }

    fn time(hour: u8, minute: u8) -> ClockTime {
        ClockTime::new(hour, minute).unwrap()
    }

    /// Set hour and minute through the buttons and potentiometer
    fn set_alarm(controller: &mut Controller, hour_pot: i32, minute_pot: i32) {
        controller.handle_request(UserRequest::SetHour);
        controller.ingest(sample(hour_pot, 1, 100));
        controller.preview_tick();
        controller.handle_request(UserRequest::SetHour);

        controller.handle_request(UserRequest::SetMinute);
        controller.ingest(sample(minute_pot, 1, 200));
        controller.preview_tick();
        controller.handle_request(UserRequest::SetMinute);
    }

    /// Double press the sensor button
    fn gesture(controller: &mut Controller, at_ms: u64) -> Effects {
        controller.ingest(sample(0, 0, at_ms));
        controller.ingest(sample(0, 1, at_ms + 100));
        controller.ingest(sample(0, 0, at_ms + 1000))
    }

    #[test]
    fn test_initial_state() {
        let controller = Controller::default();
        assert_eq!(controller.state(), ControllerState::Idle);
        assert_eq!(controller.confirmed_time(), ClockTime::MIDNIGHT);
        assert!(!controller.is_ringing());
        assert_eq!(controller.hour_caption(), "Set Hour");
    }

    #[test]
    fn test_preview_2048_shows_hour_12() {
        let mut controller = Controller::default();
        let effects = controller.handle_request(UserRequest::SetHour);
        assert_eq!(effects.as_slice(), &[Effect::StartPreview(Field::Hour)]);
        assert_eq!(controller.hour_caption(), "Confirm Hour");

        controller.ingest(sample(2048, 1, 0));
        assert_eq!(controller.preview_tick(), Some(time(12, 0)));
        // Unchanged reading renders nothing new
        assert_eq!(controller.preview_tick(), None);
        // Preview does not touch the confirmed time
        assert_eq!(controller.confirmed_time(), ClockTime::MIDNIGHT);
    }

    #[test]
    fn test_begin_setting_renders_immediately() {
        let mut controller = Controller::default();
        controller.ingest(sample(4095, 1, 0));
        let effects = controller.handle_request(UserRequest::SetMinute);
        assert_eq!(
            effects.as_slice(),
            &[
                Effect::StartPreview(Field::Minute),
                Effect::ShowTime(time(0, 59))
            ]
        );
    }

    #[test]
    fn test_confirm_hour_sends_command() {
        let mut controller = Controller::default();
        controller.handle_request(UserRequest::SetHour);
        controller.ingest(sample(1246, 1, 0));
        controller.preview_tick();

        let effects = controller.handle_request(UserRequest::SetHour);
        assert_eq!(
            effects.as_slice(),
            &[
                Effect::StopPreview,
                Effect::SendCommand(DeviceCommand::SetHour(7)),
                Effect::ShowTime(time(7, 0)),
            ]
        );
        assert_eq!(controller.state(), ControllerState::Idle);
        assert_eq!(controller.confirmed_time(), time(7, 0));
    }

    #[test]
    fn test_preview_outside_setting_mode_is_noop() {
        let mut controller = Controller::default();
        controller.ingest(sample(4095, 1, 0));
        assert_eq!(controller.preview_tick(), None);
        assert_eq!(controller.displayed_time(), ClockTime::MIDNIGHT);
    }

    #[test]
    fn test_preview_without_sample_keeps_display() {
        let mut controller = Controller::default();
        controller.handle_request(UserRequest::SetHour);
        assert_eq!(controller.preview_tick(), None);
        let effects = controller.handle_request(UserRequest::SetHour);
        assert!(effects.contains(&Effect::SendCommand(DeviceCommand::SetHour(0))));
    }

    #[test]
    fn test_settings_are_exclusive() {
        let mut controller = Controller::default();
        controller.handle_request(UserRequest::SetHour);
        assert!(controller.handle_request(UserRequest::SetMinute).is_empty());
        assert_eq!(controller.state(), ControllerState::SettingHour);
    }

    #[test]
    fn test_presses_300ms_apart_do_not_arm() {
        let mut controller = Controller::default();
        controller.ingest(sample(0, 0, 1000));
        let effects = controller.ingest(sample(0, 0, 1300));
        assert!(effects.is_empty());
        assert_eq!(controller.state(), ControllerState::Idle);
    }

    #[test]
    fn test_presses_1000ms_apart_arm() {
        let mut controller = Controller::default();
        controller.ingest(sample(0, 0, 1000));
        let effects = controller.ingest(sample(0, 0, 2000));
        assert_eq!(
            effects.as_slice(),
            &[
                Effect::Invert(true),
                Effect::LockControls(true),
                Effect::StartAlarmCheck
            ]
        );
        assert_eq!(controller.state(), ControllerState::AlarmActive);
        assert!(controller.alarm_check_running());
    }

    #[test]
    fn test_controls_locked_while_active() {
        let mut controller = Controller::default();
        gesture(&mut controller, 0);
        assert!(controller.handle_request(UserRequest::SetHour).is_empty());
        assert!(controller.handle_request(UserRequest::SetMinute).is_empty());
        assert_eq!(controller.state(), ControllerState::AlarmActive);
    }

    #[test]
    fn test_gesture_ignored_while_setting() {
        let mut controller = Controller::default();
        controller.handle_request(UserRequest::SetHour);
        assert!(gesture(&mut controller, 0).is_empty());
        assert_eq!(controller.state(), ControllerState::SettingHour);
    }

    #[test]
    fn test_alarm_rings_once_per_matching_minute() {
        let mut controller = Controller::default();
        set_alarm(&mut controller, 1246, 2048);
        assert_eq!(controller.confirmed_time(), time(7, 30));

        gesture(&mut controller, 10_000);
        assert_eq!(controller.state(), ControllerState::AlarmActive);

        let mut clock = FixedClock(time(7, 29));
        assert!(controller.check_alarm(&mut clock, || 0).unwrap().is_empty());

        clock.0 = time(7, 30);
        let effects = controller.check_alarm(&mut clock, || 2).unwrap();
        assert_eq!(
            effects.as_slice(),
            &[Effect::PlaySound(AlarmSound::Alarm3), Effect::Flash(true)]
        );
        assert!(controller.is_ringing());

        // Still the same minute: no restart
        for _ in 0..59 {
            assert!(controller.check_alarm(&mut clock, || 0).unwrap().is_empty());
        }

        clock.0 = time(7, 31);
        let effects = controller.check_alarm(&mut clock, || 0).unwrap();
        assert_eq!(effects.as_slice(), &[Effect::Flash(false)]);
        assert!(!controller.is_ringing());
        assert!(controller.check_alarm(&mut clock, || 0).unwrap().is_empty());
    }

    #[test]
    fn test_check_alarm_idle_does_not_read_clock() {
        let mut controller = Controller::default();
        let effects = controller.check_alarm(&mut StoppedClock, || 0).unwrap();
        assert!(effects.is_empty());
    }

    #[test]
    fn test_check_alarm_propagates_clock_error() {
        let mut controller = Controller::default();
        gesture(&mut controller, 0);
        assert_eq!(
            controller.check_alarm(&mut StoppedClock, || 0),
            Err(ClockError::NotRunning)
        );
    }

    #[test]
    fn test_gesture_while_active_resets() {
        let mut controller = Controller::default();
        set_alarm(&mut controller, 4095, 4095);
        gesture(&mut controller, 0);
        controller
            .check_alarm(&mut FixedClock(time(23, 59)), || 1)
            .unwrap();
        assert!(controller.is_ringing());

        // Next press 1 s after the arming press
        let effects = controller.ingest(sample(0, 0, 2000));
        assert!(effects.contains(&Effect::StopSound));
        assert!(effects.contains(&Effect::CancelAlarmCheck));
        assert!(effects.contains(&Effect::ShowTime(ClockTime::MIDNIGHT)));
        assert_eq!(controller.state(), ControllerState::Idle);
        assert_eq!(controller.confirmed_time(), ClockTime::MIDNIGHT);
        assert!(!controller.is_ringing());
        assert!(!controller.is_inverted());
    }

    /// Feed every line of one transport read, all stamped with its arrival
    fn ingest_chunk(
        controller: &mut Controller,
        decoder: &mut LineDecoder,
        bytes: &[u8],
        at_ms: u64,
    ) -> Effects {
        let mut effects = Effects::new();
        for reading in decoder.decode(bytes) {
            effects.extend(controller.ingest(reading.unwrap().stamp(at_ms)));
        }
        effects
    }

    #[test]
    fn test_press_and_release_in_one_chunk_arms() {
        let mut controller = Controller::default();
        let mut decoder = LineDecoder::new();

        ingest_chunk(&mut controller, &mut decoder, b"0x0\n0x1\n", 1000);
        let effects = ingest_chunk(&mut controller, &mut decoder, b"0x0\n0x1\n", 2000);

        assert_eq!(controller.state(), ControllerState::AlarmActive);
        assert!(effects.contains(&Effect::StartAlarmCheck));
    }

    #[test]
    fn test_full_range_potentiometer_config_previews() {
        let config = ControllerConfig {
            potentiometer_min: i32::MIN,
            potentiometer_max: i32::MAX,
            ..ControllerConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));

        let mut controller = Controller::new(config);
        controller.handle_request(UserRequest::SetHour);
        controller.ingest(sample(0, 1, 100));
        assert_eq!(controller.preview_tick(), Some(time(12, 0)));
    }

    #[test]
    fn test_reset_from_any_state() {
        let setups: [fn(&mut Controller); 4] = [
            |_| {},
            |c| {
                c.handle_request(UserRequest::SetHour);
            },
            |c| {
                c.handle_request(UserRequest::SetMinute);
            },
            |c| {
                gesture(c, 0);
            },
        ];

        for setup in setups {
            let mut controller = Controller::default();
            set_alarm(&mut controller, 3000, 3000);
            setup(&mut controller);

            let effects = controller.handle_request(UserRequest::Reset);
            assert_eq!(controller.state(), ControllerState::Idle);
            assert_eq!(controller.confirmed_time(), ClockTime::MIDNIGHT);
            assert_eq!(controller.displayed_time(), ClockTime::MIDNIGHT);
            assert!(!controller.alarm_check_running());
            assert!(effects.contains(&Effect::LockControls(false)));
            assert!(effects.contains(&Effect::Invert(false)));
        }
    }

    #[test]
    fn test_reset_stops_preview_when_setting() {
        let mut controller = Controller::default();
        controller.handle_request(UserRequest::SetMinute);
        let effects = controller.reset();
        assert_eq!(effects[0], Effect::StopPreview);
        assert_eq!(controller.minute_caption(), "Set Minute");
    }

    #[test]
    fn test_rearm_after_reset_starts_single_timer() {
        let mut controller = Controller::default();
        gesture(&mut controller, 0);
        assert!(controller.alarm_check_running());

        let effects = controller.handle_request(UserRequest::Reset);
        assert!(effects.contains(&Effect::CancelAlarmCheck));
        assert!(!controller.alarm_check_running());

        let effects = gesture(&mut controller, 20_000);
        let starts = effects
            .iter()
            .filter(|e| **e == Effect::StartAlarmCheck)
            .count();
        assert_eq!(starts, 1);

        // Reset while idle has no timer to cancel
        controller.handle_request(UserRequest::Reset);
        let effects = controller.handle_request(UserRequest::Reset);
        assert!(!effects.contains(&Effect::CancelAlarmCheck));
    }
}
