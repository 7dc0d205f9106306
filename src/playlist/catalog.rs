use std::collections::HashSet;

use tracing::info;

use super::{Feedback, Station, Track, TrackSource};
use crate::config::StationConfig;
use crate::error::Result;

/// A station backed by the track list in the config file.
///
/// Batches are served round-robin, `batch_size` at a time, the way a
/// streaming service hands out short playlists on request. Thumbed-down
/// tracks leave the rotation for good.
#[derive(Debug)]
pub struct CatalogStation {
    name: String,
    tracks: Vec<Track>,
    batch_size: usize,
    position: usize,
    banned: HashSet<String>,
    liked: Vec<Track>,
    bookmarks: Vec<Bookmark>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Bookmark {
    Song(Track),
    Artist(String),
}

impl CatalogStation {
    pub fn new(name: impl Into<String>, tracks: Vec<Track>, batch_size: usize) -> Self {
        Self {
            name: name.into(),
            tracks,
            batch_size: batch_size.max(1),
            position: 0,
            banned: HashSet::new(),
            liked: Vec::new(),
            bookmarks: Vec::new(),
        }
    }

    pub fn from_config(config: &StationConfig) -> Self {
        Self::new(config.name.clone(), config.tracks.clone(), config.batch_size)
    }

    pub fn liked(&self) -> &[Track] {
        &self.liked
    }

    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }
}

impl TrackSource for CatalogStation {
    fn next_batch(&mut self) -> Result<Vec<Track>> {
        let mut batch = Vec::with_capacity(self.batch_size);
        // one full lap at most, so a fully banned station yields nothing
        for _ in 0..self.tracks.len() {
            if batch.len() == self.batch_size {
                break;
            }
            let track = &self.tracks[self.position];
            self.position = (self.position + 1) % self.tracks.len();
            if !self.banned.contains(&track.source) {
                batch.push(track.clone());
            }
        }
        Ok(batch)
    }
}

impl Station for CatalogStation {
    fn name(&self) -> &str {
        &self.name
    }

    fn feedback(&mut self, track: &Track, feedback: Feedback) -> Result<()> {
        info!(station = %self.name, track = %track.title, ?feedback, "feedback");
        match feedback {
            Feedback::ThumbsUp => self.liked.push(track.clone()),
            Feedback::ThumbsDown => {
                self.banned.insert(track.source.clone());
            }
            Feedback::BookmarkSong => self.bookmarks.push(Bookmark::Song(track.clone())),
            Feedback::BookmarkArtist => {
                self.bookmarks.push(Bookmark::Artist(track.artist.clone()));
            }
        }
        Ok(())
    }
}
