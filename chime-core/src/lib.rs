//! Board-agnostic core logic for the Chime front panel
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Mode controller (set hour / set minute / alarm active)
//! - Button gesture detection on the sensor stream
//! - Potentiometer to clock-field scaling
//! - Alarm sound selection
//! - Configuration type definitions
//! - Wall clock trait

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod gesture;
pub mod sound;
pub mod state;
pub mod time;
pub mod traits;

pub use controller::{Controller, Effect, Effects, Field, UserRequest};
pub use state::{ControllerState, Event};
pub use time::ClockTime;
