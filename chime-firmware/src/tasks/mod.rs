//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod audio;
pub mod buttons;
pub mod controller;
pub mod display;
pub mod link_rx;
pub mod link_tx;
pub mod tick;

pub use audio::audio_task;
pub use buttons::button_task;
pub use controller::controller_task;
pub use display::display_task;
pub use link_rx::link_rx_task;
pub use link_tx::link_tx_task;
pub use tick::{alarm_check_task, preview_task};
