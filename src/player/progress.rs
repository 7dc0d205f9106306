use crate::decoder::PlaybackEvent;

pub const FALLBACK: &str = "0:00 | 0:00";

/// Latest elapsed/total seconds reported by the decoder.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ProgressTracker {
    latest: Option<(f64, f64)>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the seconds of a `FrameProgress`; other events are ignored.
    pub fn update(&mut self, event: &PlaybackEvent) {
        if let PlaybackEvent::FrameProgress {
            elapsed_seconds,
            total_seconds,
            ..
        } = *event
        {
            self.latest = Some((elapsed_seconds, total_seconds));
        }
    }

    pub fn reset(&mut self) {
        self.latest = None;
    }

    /// `"MM:SS | MM:SS"`, elapsed then total, or [`FALLBACK`] when nothing
    /// usable has been reported.
    pub fn render(&self) -> String {
        match self.usable() {
            Some((elapsed, total)) => format!("{} | {}", clock(elapsed), clock(total)),
            None => FALLBACK.to_string(),
        }
    }

    /// Fraction played, in `0.0..=1.0`.
    pub fn ratio(&self) -> f64 {
        self.usable()
            .map(|(elapsed, total)| (elapsed / total).clamp(0.0, 1.0))
            .unwrap_or(0.0)
    }

    fn usable(&self) -> Option<(f64, f64)> {
        let (elapsed, total) = self.latest?;
        let valid = elapsed.is_finite() && total.is_finite() && elapsed >= 0.0 && total > 0.0;
        valid.then_some((elapsed, total))
    }
}

fn clock(seconds: f64) -> String {
    let total = seconds as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}
