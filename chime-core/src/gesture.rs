//! Button gesture detection on the sensor stream
//!
//! The sensor board reports the button level in every sample rather than
//! sending edges. A gesture is two pressed samples whose spacing falls
//! inside the [`GestureWindow`]: closer together is contact noise or a
//! held button, further apart is two unrelated presses.

use chime_protocol::SensorSample;

use crate::config::GestureWindow;

/// Classification of one sample's button field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEdge {
    /// Button not pressed
    Released,
    /// Pressed after a released (or first) sample, outside the window
    Pressed,
    /// Still pressed, outside the window
    Held,
    /// Pressed with the previous pressed sample inside the window
    Gesture,
}

/// Tracks pressed samples to recognise the double-press gesture
#[derive(Debug, Clone)]
pub struct GestureDetector {
    window: GestureWindow,
    /// Arrival time of the most recent pressed sample
    last_press_ms: Option<u64>,
    /// Button value of the previous sample
    previous_pressed: bool,
}

impl Default for GestureDetector {
    fn default() -> Self {
        Self::new(GestureWindow::default())
    }
}

impl GestureDetector {
    /// Create a detector with the given window
    pub fn new(window: GestureWindow) -> Self {
        Self {
            window,
            last_press_ms: None,
            previous_pressed: false,
        }
    }

    /// Arrival time of the last pressed sample
    pub fn last_press_ms(&self) -> Option<u64> {
        self.last_press_ms
    }

    /// Classify a sample and update the press timestamp
    ///
    /// The timestamp moves on every pressed sample, whether or not it
    /// completed a gesture.
    pub fn observe(&mut self, sample: &SensorSample) -> ButtonEdge {
        let pressed = sample.is_pressed();
        let was_pressed = self.previous_pressed;
        self.previous_pressed = pressed;

        if !pressed {
            return ButtonEdge::Released;
        }

        let in_window = self
            .last_press_ms
            .map(|last| self.window.contains(sample.at_ms.saturating_sub(last)))
            .unwrap_or(false);
        self.last_press_ms = Some(sample.at_ms);

        if in_window {
            ButtonEdge::Gesture
        } else if was_pressed {
            ButtonEdge::Held
        } else {
            ButtonEdge::Pressed
        }
    }
}
