//! The decoder subprocess and its command channel.

use std::fmt;
use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::process::{Child, Command};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::framer::LineFramer;
use super::status;
use crate::config::DecoderConfig;
use crate::error::{Error, Result};
use crate::event::AppEvent;

const READ_CHUNK: usize = 4096;
const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

// ── Commands ───────────────────────────────────────────────────────

/// Remote-control commands understood by the decoder.
#[derive(Clone, Debug, PartialEq)]
pub enum DecoderCommand {
    Load(String),
    /// Toggles between paused and playing.
    Pause,
    Stop,
    Quit,
}

impl fmt::Display for DecoderCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load(source) => write!(f, "load {}", source),
            Self::Pause => f.write_str("pause"),
            Self::Stop => f.write_str("stop"),
            Self::Quit => f.write_str("quit"),
        }
    }
}

/// Where the controller writes decoder commands. Sending never waits for
/// a reply; answers come back later as status lines.
pub trait CommandSink {
    fn send(&mut self, command: DecoderCommand) -> Result<()>;
}

/// Cloneable sender side of a running decoder's stdin.
#[derive(Clone, Debug)]
pub struct DecoderHandle {
    tx: mpsc::UnboundedSender<DecoderCommand>,
}

impl CommandSink for DecoderHandle {
    fn send(&mut self, command: DecoderCommand) -> Result<()> {
        self.tx.send(command).map_err(|_| Error::ProcessUnavailable)
    }
}

// ── Process ────────────────────────────────────────────────────────

/// A running decoder with one task reading its status output and one
/// writing queued commands to its input.
#[derive(Debug)]
pub struct DecoderProcess {
    child: Child,
    handle: DecoderHandle,
    reader: JoinHandle<()>,
    writer: JoinHandle<()>,
}

impl DecoderProcess {
    /// Starts the decoder. Parsed status lines, followed by a final
    /// [`AppEvent::DecoderExited`], are delivered on `events`.
    pub fn spawn(config: &DecoderConfig, events: mpsc::UnboundedSender<AppEvent>) -> Result<Self> {
        let mut child = Command::new(&config.program)
            .args(&config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;

        let stdin = child.stdin.take().ok_or(Error::ProcessUnavailable)?;
        let stdout = child.stdout.take().ok_or(Error::ProcessUnavailable)?;
        info!(program = %config.program, pid = ?child.id(), "decoder started");

        let (tx, rx) = mpsc::unbounded_channel();
        let writer = tokio::spawn(write_commands(stdin, rx));
        let reader = tokio::spawn(read_status(stdout, events));

        Ok(Self {
            child,
            handle: DecoderHandle { tx },
            reader,
            writer,
        })
    }

    pub fn handle(&self) -> DecoderHandle {
        self.handle.clone()
    }

    /// Asks the decoder to quit, killing it if it does not exit in time.
    pub async fn shutdown(mut self) {
        let _ = self.handle.send(DecoderCommand::Quit);
        match tokio::time::timeout(SHUTDOWN_GRACE, self.child.wait()).await {
            Ok(Ok(status)) => info!(%status, "decoder exited"),
            Ok(Err(e)) => warn!(error = %e, "waiting for decoder failed"),
            Err(_) => {
                warn!("decoder ignored quit, killing it");
                let _ = self.child.kill().await;
            }
        }
        self.reader.abort();
        self.writer.abort();
    }
}

async fn read_status<R>(mut output: R, events: mpsc::UnboundedSender<AppEvent>)
where
    R: AsyncRead + Unpin,
{
    let mut framer = LineFramer::new();
    let mut chunk = [0u8; READ_CHUNK];

    loop {
        let n = match output.read(&mut chunk).await {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) => {
                warn!(error = %e, "reading decoder output failed");
                break;
            }
        };
        for line in framer.push(&chunk[..n]) {
            if !forward(&events, &line) {
                return;
            }
        }
    }

    if let Some(line) = framer.finish() {
        forward(&events, &line);
    }
    let _ = events.send(AppEvent::DecoderExited);
}

fn forward(events: &mpsc::UnboundedSender<AppEvent>, line: &str) -> bool {
    debug!(line, "decoder >");
    events.send(AppEvent::Decoder(status::parse(line))).is_ok()
}

async fn write_commands<W>(mut input: W, mut commands: mpsc::UnboundedReceiver<DecoderCommand>)
where
    W: AsyncWrite + Unpin,
{
    while let Some(command) = commands.recv().await {
        debug!(%command, "decoder <");
        let line = format!("{}\n", command);
        let written = match input.write_all(line.as_bytes()).await {
            Ok(()) => input.flush().await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            // dropping the receiver makes every later send fail
            warn!(error = %e, "decoder input closed");
            break;
        }
    }
}
