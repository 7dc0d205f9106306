use crate::decoder::PlaybackEvent;
use crate::playlist::Track;

/// Mutable playback bookkeeping, owned by the controller.
#[derive(Clone, Debug)]
pub struct PlaybackSession {
    pub track: Option<Track>,
    /// Set while a station auto-advances from track to track.
    pub queue_active: bool,
    pub last_event: Option<PlaybackEvent>,
    generation: u64,
    ended: Option<u64>,
}

impl Default for PlaybackSession {
    /// Generation 0 stands for "nothing loaded yet" and is already over.
    fn default() -> Self {
        Self {
            track: None,
            queue_active: false,
            last_event: None,
            generation: 0,
            ended: Some(0),
        }
    }
}

impl PlaybackSession {
    /// Starts a new generation for `track` and returns its number.
    pub fn begin(&mut self, track: Track) -> u64 {
        self.generation += 1;
        self.track = Some(track);
        self.last_event = None;
        self.generation
    }

    /// Marks the current generation as ended. Returns `false` when it
    /// already was, so end-of-song work runs once per track.
    pub fn finish(&mut self) -> bool {
        if self.has_ended() {
            return false;
        }
        self.ended = Some(self.generation);
        true
    }

    pub fn has_ended(&self) -> bool {
        self.ended == Some(self.generation)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
