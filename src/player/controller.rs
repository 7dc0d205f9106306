use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, error, info, trace, warn};

use super::progress::ProgressTracker;
use super::scheduler::{Scheduler, TimerHandle};
use super::session::PlaybackSession;
use crate::config::PlayerConfig;
use crate::decoder::{CommandSink, DecoderCommand, PlaybackEvent};
use crate::error::{Error, Result};
use crate::event::AppEvent;
use crate::playlist::{Feedback, PlaylistCursor, RetryPolicy, Station, Track};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerState {
    Idle,
    /// `load` sent, waiting for the decoder to confirm playback.
    Loading,
    Playing,
    Paused,
    /// `stop` sent to move on to the next track.
    Ending,
}

/// What the presentation layer shows for the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackStatus {
    Playing,
    Paused,
    Stopped,
    Unavailable,
}

impl PlaybackStatus {
    pub fn icon(&self) -> &str {
        match self {
            Self::Playing => "▶",
            Self::Paused => "⏸",
            Self::Stopped => "⏹",
            Self::Unavailable => "○",
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Playing => "Playing",
            Self::Paused => "Paused",
            Self::Stopped => "Stopped",
            Self::Unavailable => "Decoder unavailable",
        }
    }
}

/// Drives the decoder and decides when a song is over.
///
/// Every method runs to completion on the caller's task; the only side
/// effects are decoder commands, session updates and tick timers. Once the
/// decoder is gone every command fails with [`Error::ProcessUnavailable`].
#[derive(Debug)]
pub struct PlayerController<C> {
    commands: C,
    scheduler: Scheduler<AppEvent>,
    tick_interval: Duration,
    retry: RetryPolicy,
    cursor: Option<PlaylistCursor<Box<dyn Station>>>,
    session: PlaybackSession,
    progress: ProgressTracker,
    state: PlayerState,
    /// Generation the last unanswered `stop` was sent for.
    pending_stop: Option<u64>,
    available: bool,
}

impl<C: CommandSink> PlayerController<C> {
    pub fn new(commands: C, events: mpsc::UnboundedSender<AppEvent>, config: &PlayerConfig) -> Self {
        Self {
            commands,
            scheduler: Scheduler::new(events),
            tick_interval: config.tick_interval(),
            retry: config.retry_policy(),
            cursor: None,
            session: PlaybackSession::default(),
            progress: ProgressTracker::new(),
            state: PlayerState::Idle,
            pending_stop: None,
            available: true,
        }
    }

    // ── Accessors ──────────────────────────────────────────────────

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn status(&self) -> PlaybackStatus {
        if !self.available {
            return PlaybackStatus::Unavailable;
        }
        match self.state {
            PlayerState::Loading | PlayerState::Playing => PlaybackStatus::Playing,
            PlayerState::Paused => PlaybackStatus::Paused,
            PlayerState::Idle | PlayerState::Ending => PlaybackStatus::Stopped,
        }
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.session.track.as_ref()
    }

    pub fn last_event(&self) -> Option<&PlaybackEvent> {
        self.session.last_event.as_ref()
    }

    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    pub fn upcoming(&self) -> impl Iterator<Item = &Track> + '_ {
        self.tuned().into_iter().flat_map(|cursor| cursor.upcoming())
    }

    /// The station being played, if the queue is still running.
    pub fn station_name(&self) -> Option<&str> {
        self.tuned().map(|cursor| cursor.source().name())
    }

    fn tuned(&self) -> Option<&PlaylistCursor<Box<dyn Station>>> {
        self.cursor.as_ref().filter(|_| self.session.queue_active)
    }

    pub fn generation(&self) -> u64 {
        self.session.generation()
    }

    pub fn is_queue_active(&self) -> bool {
        self.session.queue_active
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    // ── Commands ───────────────────────────────────────────────────

    /// Tunes into `station` and starts its first track.
    pub fn play_station(&mut self, station: Box<dyn Station>) -> Result<()> {
        if !self.available {
            return Err(Error::ProcessUnavailable);
        }
        info!(station = station.name(), "tuning in");
        self.cursor = Some(PlaylistCursor::new(station, self.retry));
        self.session.queue_active = true;
        self.play_next()
    }

    pub fn play(&mut self, track: Track) -> Result<()> {
        self.cancel_tick();
        self.send(DecoderCommand::Load(track.source.clone()))?;
        info!(title = %track.title, artist = %track.artist, "loading");
        let generation = self.session.begin(track);
        debug!(generation, "new generation");
        self.progress.reset();
        self.state = PlayerState::Loading;
        self.arm_tick();
        Ok(())
    }

    /// Toggles pause. The decoder has a single toggle command, so the same
    /// `pause` goes out in both directions.
    pub fn pause(&mut self) -> Result<()> {
        let next = match self.state {
            PlayerState::Playing => PlayerState::Paused,
            PlayerState::Paused => PlayerState::Playing,
            state => {
                debug!(?state, "pause ignored");
                return Ok(());
            }
        };
        self.send(DecoderCommand::Pause)?;
        self.state = next;
        Ok(())
    }

    /// Stops the current track; the decoder's stop report then advances the
    /// station exactly like a track that ran out.
    pub fn skip(&mut self) -> Result<()> {
        if self.session.track.is_none() {
            debug!("nothing to skip");
            return Ok(());
        }
        self.send(DecoderCommand::Stop)?;
        self.pending_stop = Some(self.session.generation());
        self.state = PlayerState::Ending;
        Ok(())
    }

    pub fn stop_station(&mut self) -> Result<()> {
        info!("station stopped");
        let loaded = self.session.track.is_some();
        self.session.queue_active = false;
        self.session.finish();
        self.clear_track();
        self.state = PlayerState::Idle;
        self.send(DecoderCommand::Stop)?;
        // only a loaded track answers the stop
        if loaded {
            self.pending_stop = Some(self.session.generation());
        }
        Ok(())
    }

    pub fn thumbs_up(&mut self) -> Result<()> {
        self.feedback(Feedback::ThumbsUp)
    }

    pub fn thumbs_down(&mut self) -> Result<()> {
        self.feedback(Feedback::ThumbsDown)?;
        self.skip()
    }

    pub fn bookmark_song(&mut self) -> Result<()> {
        self.feedback(Feedback::BookmarkSong)
    }

    pub fn bookmark_artist(&mut self) -> Result<()> {
        self.feedback(Feedback::BookmarkArtist)
    }

    fn feedback(&mut self, feedback: Feedback) -> Result<()> {
        match (self.session.track.as_ref(), self.cursor.as_mut()) {
            (Some(track), Some(cursor)) => cursor.source_mut().feedback(track, feedback),
            _ => Ok(()),
        }
    }

    // ── Inbound events ─────────────────────────────────────────────

    pub fn handle_event(&mut self, event: PlaybackEvent) -> Result<()> {
        match event {
            PlaybackEvent::Stopped => self.on_stopped(),
            PlaybackEvent::Paused | PlaybackEvent::Playing => {
                self.confirm_playback();
                Ok(())
            }
            PlaybackEvent::FrameProgress { .. } => {
                if self.state == PlayerState::Idle {
                    return Ok(());
                }
                self.progress.update(&event);
                if self.state == PlayerState::Loading {
                    self.state = PlayerState::Playing;
                }
                self.session.last_event = Some(event);
                Ok(())
            }
            PlaybackEvent::Failed(message) => self.on_failed(&message),
            PlaybackEvent::Unrecognized(line) => {
                trace!(line = %line, "ignored decoder line");
                Ok(())
            }
        }
    }

    /// Handles a tick. Returns the rendered progress when the UI should
    /// refresh, `None` for ticks that were cancelled in the meantime.
    pub fn on_tick(&mut self, handle: TimerHandle) -> Option<String> {
        if !self.scheduler.fire(handle) {
            return None;
        }
        let rendered = self.progress.render();
        if self.session.track.is_some() && self.available {
            self.arm_tick();
        }
        Some(rendered)
    }

    pub fn on_decoder_exit(&mut self) {
        if self.available {
            error!("decoder process exited");
            self.go_offline();
        }
    }

    // The protocol's non-zero play state is our own pause/resume echoed
    // back, except right after a load where it confirms playback.
    fn confirm_playback(&mut self) {
        let reconciled = match self.state {
            PlayerState::Loading => {
                info!(generation = self.session.generation(), "playback started");
                self.state = PlayerState::Playing;
                PlaybackEvent::Playing
            }
            PlayerState::Playing => PlaybackEvent::Playing,
            PlayerState::Paused => PlaybackEvent::Paused,
            PlayerState::Idle | PlayerState::Ending => return,
        };
        self.session.last_event = Some(reconciled);
    }

    fn on_stopped(&mut self) -> Result<()> {
        let generation = self.session.generation();
        if let Some(issued) = self.pending_stop.take() {
            if issued != generation || self.session.has_ended() {
                debug!(issued, generation, "reply to an earlier stop absorbed");
                return Ok(());
            }
        }
        // the decoder has not confirmed the new load yet
        if self.state == PlayerState::Loading {
            debug!(generation, "stale stop ignored");
            return Ok(());
        }
        if !self.session.finish() {
            debug!(generation, "generation already ended");
            return Ok(());
        }

        let skipped = self.state == PlayerState::Ending;
        info!(generation, skipped, "song ended");
        self.session.last_event = Some(PlaybackEvent::Stopped);
        self.state = PlayerState::Idle;
        self.song_ended()
    }

    fn on_failed(&mut self, message: &str) -> Result<()> {
        warn!(message, "decoder reported an error");
        if self.state != PlayerState::Loading || !self.session.finish() {
            return Ok(());
        }
        // the track never started; move past it
        self.state = PlayerState::Idle;
        self.song_ended()
    }

    fn song_ended(&mut self) -> Result<()> {
        self.clear_track();
        if self.session.queue_active {
            self.play_next()
        } else {
            Ok(())
        }
    }

    fn play_next(&mut self) -> Result<()> {
        let Some(cursor) = self.cursor.as_mut() else {
            self.session.queue_active = false;
            return Ok(());
        };
        match cursor.next() {
            Ok(track) => self.play(track),
            Err(e) => {
                warn!(error = %e, "station has nothing to play");
                self.session.queue_active = false;
                self.state = PlayerState::Idle;
                Err(e)
            }
        }
    }

    fn send(&mut self, command: DecoderCommand) -> Result<()> {
        if !self.available {
            return Err(Error::ProcessUnavailable);
        }
        if let Err(e) = self.commands.send(command) {
            error!(error = %e, "decoder command failed");
            self.go_offline();
            return Err(e);
        }
        Ok(())
    }

    fn go_offline(&mut self) {
        self.available = false;
        self.pending_stop = None;
        self.session.finish();
        self.session.queue_active = false;
        self.clear_track();
        self.state = PlayerState::Idle;
    }

    fn clear_track(&mut self) {
        self.cancel_tick();
        self.session.track = None;
        self.progress.reset();
    }

    fn arm_tick(&mut self) {
        self.scheduler.arm(self.tick_interval, AppEvent::Tick);
    }

    fn cancel_tick(&mut self) {
        if let Some(handle) = self.scheduler.live() {
            self.scheduler.cancel(handle);
        }
    }
}
