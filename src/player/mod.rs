//! The playback controller and the pieces it owns.

mod controller;
mod progress;
mod scheduler;
mod session;

pub use controller::{PlaybackStatus, PlayerController, PlayerState};
pub use progress::{ProgressTracker, FALLBACK as PROGRESS_FALLBACK};
pub use scheduler::{Scheduler, TimerHandle};
pub use session::PlaybackSession;
