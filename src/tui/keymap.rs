//! Static key bindings. Each key maps to one variant of a closed command
//! set; nothing is looked up by name at runtime.

use crossterm::event::KeyCode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    ShowStations,
    ShowCommands,
    Skip,
    Pause,
    StopStation,
    Refresh,
    ThumbsUp,
    ThumbsDown,
    BookmarkSong,
    BookmarkArtist,
    Exit,
}

#[derive(Clone, Copy, Debug)]
pub struct Binding {
    pub key: KeyCode,
    pub command: Command,
    /// Shown in the command pane when set.
    pub label: Option<&'static str>,
}

const fn bind(key: KeyCode, command: Command, label: Option<&'static str>) -> Binding {
    Binding {
        key,
        command,
        label,
    }
}

pub const BINDINGS: &[Binding] = &[
    bind(KeyCode::Left, Command::ShowStations, None),
    bind(KeyCode::Right, Command::ShowCommands, None),
    bind(KeyCode::Char('n'), Command::Skip, Some("Skip")),
    bind(KeyCode::Char('p'), Command::Pause, Some("Pause")),
    bind(KeyCode::Char('s'), Command::StopStation, Some("Stop Station")),
    bind(KeyCode::Char('r'), Command::Refresh, None),
    bind(KeyCode::Char('u'), Command::ThumbsUp, Some("Thumbs Up")),
    bind(KeyCode::Char('d'), Command::ThumbsDown, Some("Thumbs Down")),
    bind(KeyCode::Char('b'), Command::BookmarkSong, Some("Bookmark Song")),
    bind(KeyCode::Char('a'), Command::BookmarkArtist, Some("Bookmark Artist")),
    bind(KeyCode::Char('q'), Command::Exit, Some("Exit")),
];

pub fn lookup(key: KeyCode) -> Option<Command> {
    BINDINGS.iter().find(|b| b.key == key).map(|b| b.command)
}

/// Bindings listed in the command pane, in table order.
pub fn labelled() -> impl Iterator<Item = &'static Binding> {
    BINDINGS.iter().filter(|b| b.label.is_some())
}

pub fn key_label(key: KeyCode) -> String {
    match key {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Left => "←".into(),
        KeyCode::Right => "→".into(),
        other => format!("{:?}", other),
    }
}
