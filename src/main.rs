use std::io::{self, stdout};
use std::time::Duration;

use anyhow::Context;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::info;

use pancake::config::{self, Config};
use pancake::decoder::{CommandSink, DecoderProcess};
use pancake::event::AppEvent;
use pancake::logging;
use pancake::player::PlayerController;
use pancake::tui::{self, App, Theme};

// ── Constants ──────────────────────────────────────────────────────

const TICK_RATE: Duration = Duration::from_millis(100);

// ── Main ───────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = config::config_path();
    let config = Config::load(&config_path)?;

    let log_path = config.log.file.clone().unwrap_or_else(config::default_log_path);
    logging::init(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;
    info!(
        config = %config_path.display(),
        stations = config.stations.len(),
        "starting"
    );

    let (tx, mut rx) = mpsc::unbounded_channel();
    let decoder = DecoderProcess::spawn(&config.decoder, tx.clone())
        .with_context(|| format!("failed to start `{}`", config.decoder.program))?;
    let player = PlayerController::new(decoder.handle(), tx, &config.player);
    let mut app = App::new(player, config.stations, Theme::named(config.ui.theme));

    // Panic hook: restore terminal on crash so it doesn't stay in raw mode
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app, &mut rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    decoder.shutdown().await;
    info!("exiting");
    result
}

fn run<C: CommandSink>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<C>,
    rx: &mut mpsc::UnboundedReceiver<AppEvent>,
) -> anyhow::Result<()> {
    loop {
        while let Ok(event) = rx.try_recv() {
            app.handle_app_event(event);
        }
        app.expire_status();

        if app.dirty {
            terminal.draw(|f| tui::draw(f, app))?;
            app.dirty = false;
        }

        if event::poll(TICK_RATE)? {
            match event::read()? {
                Event::Key(key) => app.handle_key(key),
                Event::Resize(..) => app.dirty = true,
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
