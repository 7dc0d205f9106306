use crate::decoder::PlaybackEvent;
use crate::player::TimerHandle;

/// Everything that reaches the main loop besides key input. Each event is
/// handled to completion before the next one is taken.
#[derive(Clone, Debug, PartialEq)]
pub enum AppEvent {
    Decoder(PlaybackEvent),
    /// The decoder's output closed; the process is gone.
    DecoderExited,
    Tick(TimerHandle),
}
