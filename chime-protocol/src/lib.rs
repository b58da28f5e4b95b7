//! Chime sensor link protocol
//!
//! This crate defines the text protocol spoken over the UART between the
//! sensor board (potentiometer + push button) and the Chime front panel.
//!
//! # Protocol Overview
//!
//! The sensor board streams one line per sample:
//! ```text
//! <potentiometer>x<button>\n        e.g. "2048x1\n"
//! ```
//!
//! The front panel answers with plain text commands:
//! ```text
//! set_hour <0-23>\n
//! set_minute <0-59>\n
//! ```
//!
//! There is no handshake; the link runs at a fixed [`BAUD_RATE`].

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod line;

pub use command::{CommandError, DeviceCommand, MAX_COMMAND_LEN};
pub use line::{
    LineDecoder, LineError, Reading, SensorSample, BUTTON_PRESSED, MAX_LINE_LEN, POT_MAX, POT_MIN,
};

/// UART line rate used by the sensor board
pub const BAUD_RATE: u32 = 9600;
