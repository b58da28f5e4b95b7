//! Front panel display
//!
//! The controller task publishes a [`DisplayState`] snapshot; the display
//! task renders it onto the SH1106 panel.

pub mod sh1106;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

use chime_core::{ClockTime, ControllerState};

/// Blink half-period of the flashing alert
pub const FLASH_PERIOD_MS: u64 = 250;

/// Whether sensor samples are arriving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkStatus {
    /// No sample received yet
    Waiting,
    /// Samples are arriving
    Receiving,
    /// The link closed or failed; ingestion has stopped
    Lost,
}

/// Everything the panel shows
#[derive(Debug, Clone, Copy)]
pub struct DisplayState {
    pub time: ClockTime,
    pub hour_caption: &'static str,
    pub minute_caption: &'static str,
    pub mode: ControllerState,
    pub ringing: bool,
    pub flashing: bool,
    pub inverted: bool,
    pub locked: bool,
    pub link: LinkStatus,
}

impl DisplayState {
    pub const fn new() -> Self {
        Self {
            time: ClockTime::MIDNIGHT,
            hour_caption: "Set Hour",
            minute_caption: "Set Minute",
            mode: ControllerState::Idle,
            ringing: false,
            flashing: false,
            inverted: false,
            locked: false,
            link: LinkStatus::Waiting,
        }
    }

    /// Top status line
    fn status(&self) -> &'static str {
        if self.ringing {
            return "ALARM!";
        }
        match self.link {
            LinkStatus::Waiting => return "Waiting for sensor",
            LinkStatus::Lost => return "Sensor link lost",
            LinkStatus::Receiving => {}
        }
        match self.mode {
            ControllerState::Idle => "",
            ControllerState::SettingHour => "Turn knob: hour",
            ControllerState::SettingMinute => "Turn knob: minute",
            ControllerState::AlarmActive => "Alarm armed",
        }
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new()
    }
}

/// Current panel contents, written by the controller task
pub static DISPLAY_STATE: Mutex<CriticalSectionRawMutex, DisplayState> =
    Mutex::new(DisplayState::new());

/// Draw a full frame
pub fn render<D>(state: &DisplayState, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    target.clear(BinaryColor::Off)?;

    let small = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
    let large = MonoTextStyle::new(&FONT_10X20, BinaryColor::On);
    let centered = TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Middle)
        .build();

    Text::with_baseline(state.status(), Point::new(0, 0), small, Baseline::Top).draw(target)?;

    let time = state.time.format();
    Text::with_text_style(time.as_str(), Point::new(64, 28), large, centered).draw(target)?;

    let (first, second) = if state.locked {
        ("Controls locked", "Reset to unlock")
    } else {
        (state.hour_caption, state.minute_caption)
    };
    Text::with_baseline(first, Point::new(0, 44), small, Baseline::Top).draw(target)?;
    Text::with_baseline(second, Point::new(0, 54), small, Baseline::Top).draw(target)?;

    Ok(())
}
