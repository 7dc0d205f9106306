//! pancake: a terminal station player driving `mpg123 -R`.
//!
//! The [`player::PlayerController`] owns playback. Decoder output, tick
//! timers and key presses all arrive on one task and are handled one at a
//! time, so no player state is shared across threads.

pub mod config;
pub mod decoder;
pub mod error;
pub mod event;
pub mod logging;
pub mod player;
pub mod playlist;
pub mod tui;

pub use error::{Error, Result};
