//! Controller state machine
//!
//! The controller mode is explicit, finite, and deterministic. Exactly one
//! state is active at a time.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::ControllerState;
