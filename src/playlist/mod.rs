//! Tracks, the stations that hand them out, and the cursor that turns a
//! station's finite batches into an endless queue.

mod catalog;
mod cursor;

use std::fmt::Debug;

use serde::Deserialize;

use crate::error::Result;

pub use catalog::{Bookmark, CatalogStation};
pub use cursor::{PlaylistCursor, RetryPolicy};

// ── Data ───────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Track {
    /// Locator handed to the decoder's `load` command
    pub source: String,
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub album: String,
    #[serde(default)]
    pub art: Option<String>,
}

impl Track {
    pub fn new(source: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            title: title.into(),
            artist: String::new(),
            album: String::new(),
            art: None,
        }
    }

    pub fn by(mut self, artist: impl Into<String>, album: impl Into<String>) -> Self {
        self.artist = artist.into();
        self.album = album.into();
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feedback {
    ThumbsUp,
    ThumbsDown,
    BookmarkSong,
    BookmarkArtist,
}

impl Feedback {
    pub fn label(&self) -> &str {
        match self {
            Self::ThumbsUp => "Thumbs up",
            Self::ThumbsDown => "Thumbs down",
            Self::BookmarkSong => "Song bookmarked",
            Self::BookmarkArtist => "Artist bookmarked",
        }
    }
}

// ── Providers ──────────────────────────────────────────────────────

/// A finite, on-demand supply of tracks. Each call returns the next page,
/// which may be empty.
pub trait TrackSource {
    fn next_batch(&mut self) -> Result<Vec<Track>>;
}

/// A named track source that also takes listener feedback.
pub trait Station: TrackSource + Debug {
    fn name(&self) -> &str;

    fn feedback(&mut self, track: &Track, feedback: Feedback) -> Result<()>;
}

impl<S: TrackSource + ?Sized> TrackSource for Box<S> {
    fn next_batch(&mut self) -> Result<Vec<Track>> {
        (**self).next_batch()
    }
}

impl<S: Station + ?Sized> Station for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn feedback(&mut self, track: &Track, feedback: Feedback) -> Result<()> {
        (**self).feedback(track, feedback)
    }
}
