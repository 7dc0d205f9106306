use std::collections::VecDeque;

use tracing::{debug, warn};

use super::{Track, TrackSource};
use crate::error::{Error, Result};

/// How many empty batches in a row a cursor tolerates before giving up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_empty_batches: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_empty_batches: 5,
        }
    }
}

/// Endless view over a [`TrackSource`].
///
/// Buffered tracks are handed out first; once the buffer runs dry the source
/// is asked for another batch. Empty batches are skipped, up to the retry
/// budget, after which [`Error::ProviderExhausted`] is returned instead of
/// spinning on a source that has nothing left.
#[derive(Debug)]
pub struct PlaylistCursor<S> {
    source: S,
    buffer: VecDeque<Track>,
    policy: RetryPolicy,
}

impl<S: TrackSource> PlaylistCursor<S> {
    pub fn new(source: S, policy: RetryPolicy) -> Self {
        Self {
            source,
            buffer: VecDeque::new(),
            policy,
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<Track> {
        let mut empty = 0;
        loop {
            if let Some(track) = self.buffer.pop_front() {
                return Ok(track);
            }

            let batch = self.source.next_batch()?;
            if batch.is_empty() {
                empty += 1;
                warn!(attempt = empty, "station returned an empty batch");
                if empty >= self.policy.max_empty_batches {
                    return Err(Error::ProviderExhausted { attempts: empty });
                }
                continue;
            }

            debug!(count = batch.len(), "refilled playlist");
            self.buffer.extend(batch);
        }
    }

    /// Tracks already fetched and waiting to play, in order.
    pub fn upcoming(&self) -> impl Iterator<Item = &Track> {
        self.buffer.iter()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Scripted {
        batches: VecDeque<Vec<Track>>,
        calls: u32,
    }

    impl Scripted {
        fn new(batches: Vec<Vec<Track>>) -> Self {
            Self {
                batches: batches.into(),
                calls: 0,
            }
        }
    }

    impl TrackSource for Scripted {
        fn next_batch(&mut self) -> Result<Vec<Track>> {
            self.calls += 1;
            Ok(self.batches.pop_front().unwrap_or_default())
        }
    }

    fn track(name: &str) -> Track {
        Track::new(format!("http://tracks/{name}.mp3"), name)
    }

    fn titles(cursor: &mut PlaylistCursor<Scripted>, n: usize) -> Vec<String> {
        (0..n).map(|_| cursor.next().unwrap().title).collect()
    }

    #[test]
    fn empty_batches_are_skipped() {
        let source = Scripted::new(vec![
            vec![track("A"), track("B")],
            vec![],
            vec![track("C")],
            vec![track("D")],
        ]);
        let mut cursor = PlaylistCursor::new(source, RetryPolicy::default());

        assert_eq!(titles(&mut cursor, 4), vec!["A", "B", "C", "D"]);
        assert_eq!(cursor.source().calls, 4);
    }

    #[test]
    fn source_is_only_called_when_buffer_is_empty() {
        let source = Scripted::new(vec![vec![track("A"), track("B"), track("C")]]);
        let mut cursor = PlaylistCursor::new(source, RetryPolicy::default());

        assert_eq!(titles(&mut cursor, 1), vec!["A"]);
        let upcoming: Vec<_> = cursor.upcoming().map(|t| t.title.as_str()).collect();
        assert_eq!(upcoming, vec!["B", "C"]);
        assert_eq!(cursor.source().calls, 1);
    }

    #[test]
    fn gives_up_after_retry_budget() {
        let source = Scripted::new(vec![vec![track("A")]]);
        let policy = RetryPolicy {
            max_empty_batches: 3,
        };
        let mut cursor = PlaylistCursor::new(source, policy);

        assert_eq!(titles(&mut cursor, 1), vec!["A"]);
        assert!(matches!(
            cursor.next(),
            Err(Error::ProviderExhausted { attempts: 3 })
        ));
        assert_eq!(cursor.source().calls, 4);
    }

    #[test]
    fn budget_resets_between_calls() {
        let source = Scripted::new(vec![
            vec![],
            vec![track("A")],
            vec![],
            vec![track("B")],
        ]);
        let policy = RetryPolicy {
            max_empty_batches: 2,
        };
        let mut cursor = PlaylistCursor::new(source, policy);

        assert_eq!(titles(&mut cursor, 2), vec!["A", "B"]);
    }

    #[test]
    fn source_errors_propagate() {
        struct Broken;
        impl TrackSource for Broken {
            fn next_batch(&mut self) -> Result<Vec<Track>> {
                Err(Error::Provider("offline".into()))
            }
        }

        let mut cursor = PlaylistCursor::new(Broken, RetryPolicy::default());
        assert!(matches!(cursor.next(), Err(Error::Provider(_))));
    }
}
