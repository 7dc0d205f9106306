//! Decoding of the decoder's remote-control status lines.

/// One status line from the decoder, decoded.
#[derive(Clone, Debug, PartialEq)]
pub enum PlaybackEvent {
    /// Non-zero play state; the protocol cannot tell who paused.
    Paused,
    /// Confirmed playback, produced by the controller when it reconciles
    /// a `Paused` status against its own last command.
    Playing,
    Stopped,
    FrameProgress {
        elapsed_frames: u64,
        total_frames: u64,
        elapsed_seconds: f64,
        total_seconds: f64,
    },
    /// `@E` error report (unreadable stream, unknown command, ...)
    Failed(String),
    Unrecognized(String),
}

/// Parses one line. Never fails: anything that does not match a known
/// status shape comes back as [`PlaybackEvent::Unrecognized`].
pub fn parse(line: &str) -> PlaybackEvent {
    let mut fields = line.split_whitespace();
    let event = match fields.next() {
        Some("@P") => parse_play_state(fields),
        Some("@F") => parse_frame(fields),
        Some("@E") => {
            let message = line.trim_start()["@E".len()..].trim();
            Some(PlaybackEvent::Failed(message.to_string()))
        }
        _ => None,
    };
    event.unwrap_or_else(|| PlaybackEvent::Unrecognized(line.to_string()))
}

fn parse_play_state<'a>(mut fields: impl Iterator<Item = &'a str>) -> Option<PlaybackEvent> {
    let state: i64 = fields.next()?.parse().ok()?;
    Some(if state == 0 {
        PlaybackEvent::Stopped
    } else {
        PlaybackEvent::Paused
    })
}

fn parse_frame<'a>(mut fields: impl Iterator<Item = &'a str>) -> Option<PlaybackEvent> {
    let elapsed_frames = fields.next()?.parse().ok()?;
    let total_frames = fields.next()?.parse().ok()?;
    let elapsed_seconds = fields.next()?.parse().ok()?;
    let total_seconds = fields.next()?.parse().ok()?;
    Some(PlaybackEvent::FrameProgress {
        elapsed_frames,
        total_frames,
        elapsed_seconds,
        total_seconds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_progress_uses_float_fields_as_seconds() {
        assert_eq!(
            parse("@F 10 0 30.0 120.0"),
            PlaybackEvent::FrameProgress {
                elapsed_frames: 10,
                total_frames: 0,
                elapsed_seconds: 30.0,
                total_seconds: 120.0,
            }
        );
    }

    #[test]
    fn play_state_zero_is_stopped() {
        assert_eq!(parse("@P 0"), PlaybackEvent::Stopped);
    }

    #[test]
    fn other_play_states_are_paused() {
        for line in ["@P 1", "@P 2", "@P 3", "@P -1"] {
            assert_eq!(parse(line), PlaybackEvent::Paused, "{line}");
        }
    }

    #[test]
    fn error_line_keeps_message() {
        assert_eq!(
            parse("@E Error opening stream: http://x/a.mp3"),
            PlaybackEvent::Failed("Error opening stream: http://x/a.mp3".into())
        );
    }

    #[test]
    fn junk_is_unrecognized() {
        for line in [
            "",
            "   ",
            "@R MPG123 (ThOr) v10",
            "@I ID3:title",
            "@P",
            "@P playing",
            "@F 1 2 abc 4.0",
            "@F 1 2 3.0",
            "@Fx 1 2 3.0 4.0",
            "load foo.mp3",
        ] {
            assert_eq!(
                parse(line),
                PlaybackEvent::Unrecognized(line.to_string()),
                "{line:?}"
            );
        }
    }
}
