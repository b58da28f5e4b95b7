//! Hardware abstraction traits
//!
//! These traits define the interface between the controller logic
//! and board-specific implementations.

pub mod clock;

pub use clock::{ClockError, WallClock};
