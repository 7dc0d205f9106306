use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use tokio::sync::mpsc;

use pancake::config::{DecoderConfig, PlayerConfig};
use pancake::decoder::{CommandSink, DecoderCommand, DecoderProcess, PlaybackEvent};
use pancake::event::AppEvent;
use pancake::player::{PlayerController, PlayerState};
use pancake::playlist::{Feedback, Station, Track, TrackSource};
use pancake::{Error, Result};

#[derive(Clone, Debug, Default)]
struct Recorder(Rc<RefCell<Vec<DecoderCommand>>>);

impl Recorder {
    fn loads(&self) -> Vec<String> {
        self.0
            .borrow()
            .iter()
            .filter_map(|c| match c {
                DecoderCommand::Load(source) => Some(source.clone()),
                _ => None,
            })
            .collect()
    }
}

impl CommandSink for Recorder {
    fn send(&mut self, command: DecoderCommand) -> Result<()> {
        self.0.borrow_mut().push(command);
        Ok(())
    }
}

/// Hands out prepared batches, then nothing.
#[derive(Debug)]
struct Scripted {
    batches: VecDeque<Vec<Track>>,
}

impl Scripted {
    fn new(batches: &[&[&str]]) -> Box<dyn Station> {
        let batches = batches
            .iter()
            .map(|b| b.iter().map(|n| Track::new(format!("{n}.mp3"), *n)).collect())
            .collect();
        Box::new(Self { batches })
    }
}

impl TrackSource for Scripted {
    fn next_batch(&mut self) -> Result<Vec<Track>> {
        Ok(self.batches.pop_front().unwrap_or_default())
    }
}

impl Station for Scripted {
    fn name(&self) -> &str {
        "scripted"
    }

    fn feedback(&mut self, _track: &Track, _feedback: Feedback) -> Result<()> {
        Ok(())
    }
}

fn controller() -> (PlayerController<Recorder>, Recorder, mpsc::UnboundedReceiver<AppEvent>) {
    let recorder = Recorder::default();
    let (tx, rx) = mpsc::unbounded_channel();
    let player = PlayerController::new(recorder.clone(), tx, &PlayerConfig::default());
    (player, recorder, rx)
}

fn start(player: &mut PlayerController<Recorder>) {
    player.handle_event(PlaybackEvent::Paused).unwrap();
    assert_eq!(player.state(), PlayerState::Playing);
}

#[tokio::test]
async fn station_plays_across_empty_batches() {
    let (mut player, recorder, _rx) = controller();
    player.play_station(Scripted::new(&[&["a", "b"], &[], &["c"]])).unwrap();

    for _ in 0..2 {
        start(&mut player);
        player.handle_event(PlaybackEvent::Stopped).unwrap();
    }
    assert_eq!(recorder.loads(), vec!["a.mp3", "b.mp3", "c.mp3"]);
    assert_eq!(player.current_track().unwrap().title, "c");
}

#[tokio::test]
async fn duplicate_stop_advances_once() {
    let (mut player, recorder, _rx) = controller();
    player.play_station(Scripted::new(&[&["a", "b", "c"]])).unwrap();
    start(&mut player);

    player.handle_event(PlaybackEvent::Stopped).unwrap();
    player.handle_event(PlaybackEvent::Stopped).unwrap();

    assert_eq!(recorder.loads(), vec!["a.mp3", "b.mp3"]);
    assert_eq!(player.generation(), 2);
}

#[tokio::test]
async fn skip_matches_natural_end() {
    let (mut natural, natural_rec, _rx1) = controller();
    natural.play_station(Scripted::new(&[&["a", "b"]])).unwrap();
    start(&mut natural);
    natural.handle_event(PlaybackEvent::Stopped).unwrap();

    let (mut skipped, skipped_rec, _rx2) = controller();
    skipped.play_station(Scripted::new(&[&["a", "b"]])).unwrap();
    start(&mut skipped);
    skipped.skip().unwrap();
    assert_eq!(skipped.state(), PlayerState::Ending);
    skipped.handle_event(PlaybackEvent::Stopped).unwrap();

    assert_eq!(natural_rec.loads(), skipped_rec.loads());
    assert_eq!(natural.current_track(), skipped.current_track());
    assert_eq!(natural.state(), skipped.state());
    assert_eq!(natural.generation(), skipped.generation());
}

#[tokio::test]
async fn stopped_station_does_not_pull() {
    let (mut player, recorder, _rx) = controller();
    player.play_station(Scripted::new(&[&["a", "b"]])).unwrap();
    start(&mut player);

    player.stop_station().unwrap();
    player.handle_event(PlaybackEvent::Stopped).unwrap();

    assert_eq!(recorder.loads(), vec!["a.mp3"]);
    assert!(!player.is_queue_active());
    assert!(player.current_track().is_none());
    assert_eq!(player.state(), PlayerState::Idle);
}

#[tokio::test]
async fn empty_station_is_exhausted() {
    let (mut player, recorder, _rx) = controller();
    let err = player.play_station(Scripted::new(&[])).unwrap_err();

    assert!(matches!(err, Error::ProviderExhausted { attempts: 5 }));
    assert!(!player.is_queue_active());
    assert!(recorder.loads().is_empty());
}

#[tokio::test]
async fn exhaustion_after_last_track_stops_queue() {
    let (mut player, _recorder, _rx) = controller();
    player.play_station(Scripted::new(&[&["a"]])).unwrap();
    start(&mut player);

    let err = player.handle_event(PlaybackEvent::Stopped).unwrap_err();
    assert!(matches!(err, Error::ProviderExhausted { .. }));
    assert_eq!(player.state(), PlayerState::Idle);
    assert!(player.current_track().is_none());
}

async fn next_decoder_event(rx: &mut mpsc::UnboundedReceiver<AppEvent>) -> AppEvent {
    loop {
        let event = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("decoder went quiet")
            .expect("event channel closed");
        if !matches!(event, AppEvent::Tick(_)) {
            return event;
        }
    }
}

#[tokio::test]
async fn drives_a_scripted_decoder() {
    let script = r#"while read cmd arg; do
        case "$cmd" in
            load) printf '@P 2\n@F 10 0 30.00 120.00\n@P 0\n' ;;
            quit) exit 0 ;;
        esac
    done"#;
    let config = DecoderConfig {
        program: "sh".into(),
        args: vec!["-c".into(), script.into()],
    };
    let (tx, mut rx) = mpsc::unbounded_channel();
    let decoder = DecoderProcess::spawn(&config, tx.clone()).unwrap();
    let mut player = PlayerController::new(decoder.handle(), tx, &PlayerConfig::default());

    player.play(Track::new("a.mp3", "a")).unwrap();

    let mut seen = Vec::new();
    while player.state() != PlayerState::Idle || seen.is_empty() {
        let AppEvent::Decoder(event) = next_decoder_event(&mut rx).await else {
            panic!("decoder exited early");
        };
        seen.push(event.clone());
        player.handle_event(event).unwrap();
    }

    assert_eq!(seen.len(), 3);
    assert_eq!(seen[0], PlaybackEvent::Paused);
    assert!(matches!(seen[1], PlaybackEvent::FrameProgress { total_frames: 0, .. }));
    assert_eq!(seen[2], PlaybackEvent::Stopped);
    assert!(player.current_track().is_none());

    decoder.handle().send(DecoderCommand::Quit).unwrap();
    assert_eq!(next_decoder_event(&mut rx).await, AppEvent::DecoderExited);
    decoder.shutdown().await;
}
