//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use chime_core::sound::AlarmSound;
use chime_core::UserRequest;
use chime_protocol::{DeviceCommand, SensorSample};

/// Channel capacity for button requests
const REQUEST_CHANNEL_SIZE: usize = 4;

/// Channel capacity for sensor samples (one UART read of short lines)
const SAMPLE_CHANNEL_SIZE: usize = 16;

/// Channel capacity for outbound device commands
const COMMAND_CHANNEL_SIZE: usize = 4;

/// Start/stop control for a periodic ticker task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerControl {
    Start,
    Stop,
}

/// Command for the audio task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AudioCommand {
    /// Play a sound from the beginning
    Play(AlarmSound),
    /// Stop and rewind
    Stop,
}

/// Samples from the sensor board, one per decoded line
///
/// Every sample must reach the gesture detector, so the reader waits when
/// the controller falls behind instead of overwriting.
pub static SAMPLES: Channel<CriticalSectionRawMutex, SensorSample, SAMPLE_CHANNEL_SIZE> =
    Channel::new();

/// Front panel button requests
pub static REQUESTS: Channel<CriticalSectionRawMutex, UserRequest, REQUEST_CHANNEL_SIZE> =
    Channel::new();

/// Commands to send to the sensor board
pub static COMMANDS: Channel<CriticalSectionRawMutex, DeviceCommand, COMMAND_CHANNEL_SIZE> =
    Channel::new();

/// Live preview ticker control (controller -> preview task)
pub static PREVIEW_CONTROL: Signal<CriticalSectionRawMutex, TimerControl> = Signal::new();

/// Live preview tick (preview task -> controller)
pub static PREVIEW_TICK: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Alarm check ticker control (controller -> alarm check task)
pub static ALARM_CHECK_CONTROL: Signal<CriticalSectionRawMutex, TimerControl> = Signal::new();

/// Alarm check tick (alarm check task -> controller)
pub static ALARM_TICK: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Audio command (controller -> audio task)
pub static AUDIO_CMD: Signal<CriticalSectionRawMutex, AudioCommand> = Signal::new();

/// Signal that the display state changed and should be redrawn
pub static DISPLAY_REFRESH: Signal<CriticalSectionRawMutex, ()> = Signal::new();
