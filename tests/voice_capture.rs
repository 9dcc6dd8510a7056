use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::time::Instant;

use viator::api::{
    Geocoder, PositionSource, QueryAPI, Router, SpeechCapture, SpeechSink, VoiceAPI,
};
use viator::config::Config;
use viator::engine::Engine;
use viator::entities::{Coordinates, Place, QueryRole, Route};
use viator::error::{not_found_error, Error};

struct NoGeocoder;

#[async_trait]
impl Geocoder for NoGeocoder {
    async fn resolve(&self, _query: &str) -> Result<Place, Error> {
        Err(not_found_error())
    }
}

struct NoRouter;

#[async_trait]
impl Router for NoRouter {
    async fn create_route(&self, _origin: Place, _destination: Place) -> Result<Route, Error> {
        Err(not_found_error())
    }
}

struct NullSink;

#[async_trait]
impl SpeechSink for NullSink {
    async fn enqueue(&self, _utterance: &str) -> Result<(), Error> {
        Ok(())
    }
}

struct NoPositions;

impl PositionSource for NoPositions {
    fn watch(&self) -> BoxStream<'static, Result<Coordinates, Error>> {
        stream::empty().boxed()
    }
}

/// Recognizer driven by the test through a shared watch sender.
struct ManualCapture {
    tx: Mutex<Option<watch::Sender<String>>>,
    heard: Mutex<String>,
}

impl ManualCapture {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            tx: Mutex::new(None),
            heard: Mutex::new(String::new()),
        })
    }

    async fn say(&self, text: &str) {
        *self.heard.lock().await = text.to_string();

        if let Some(tx) = &*self.tx.lock().await {
            tx.send(text.to_string()).ok();
        }
    }
}

#[async_trait]
impl SpeechCapture for ManualCapture {
    async fn begin_capture(&self) -> Result<watch::Receiver<String>, Error> {
        let (tx, rx) = watch::channel(String::new());

        *self.heard.lock().await = String::new();
        *self.tx.lock().await = Some(tx);

        Ok(rx)
    }

    async fn end_capture(&self) -> Result<String, Error> {
        *self.tx.lock().await = None;

        Ok(self.heard.lock().await.clone())
    }
}

fn engine_with(capture: Arc<ManualCapture>) -> Arc<Engine> {
    Arc::new(Engine::new(
        Arc::new(NoGeocoder),
        Arc::new(NoRouter),
        Arc::new(NullSink),
        capture,
        Arc::new(NoPositions),
        Config::default(),
    ))
}

#[tokio::test(start_paused = true)]
async fn capture_commits_at_the_window_deadline() {
    let capture = ManualCapture::new();
    let engine = engine_with(capture.clone());

    let started = Instant::now();

    let task = {
        let engine = engine.clone();
        tokio::spawn(async move { engine.capture_query(QueryRole::Origin).await })
    };

    tokio::task::yield_now().await;
    capture.say("Chennai").await;
    tokio::task::yield_now().await;
    capture.say("Chennai Central").await;

    let committed = task.await.unwrap().unwrap();

    assert_eq!(committed, "Chennai Central");
    assert_eq!(started.elapsed(), Duration::from_millis(3000));

    let snapshot = engine.snapshot().await;
    assert_eq!(snapshot.transcript, "Chennai Central");
}

#[tokio::test(start_paused = true)]
async fn silent_window_commits_an_empty_transcript() {
    let capture = ManualCapture::new();
    let engine = engine_with(capture);

    engine
        .set_query(QueryRole::Destination, "typed earlier".into())
        .await;

    let committed = engine.capture_query(QueryRole::Destination).await.unwrap();

    // The prior text is overwritten, not preserved.
    assert_eq!(committed, "");

    let snapshot = engine.snapshot().await;
    assert_eq!(snapshot.transcript, "");
    assert_eq!(snapshot.destination_query, "");
}

#[tokio::test(start_paused = true)]
async fn capture_overwrites_the_role_query() {
    let capture = ManualCapture::new();
    let engine = engine_with(capture.clone());

    engine
        .set_query(QueryRole::Origin, "typed origin".into())
        .await;

    let task = {
        let engine = engine.clone();
        tokio::spawn(async move { engine.capture_query(QueryRole::Origin).await })
    };

    tokio::task::yield_now().await;
    capture.say("spoken origin").await;

    let committed = task.await.unwrap().unwrap();

    assert_eq!(committed, "spoken origin");
    assert_eq!(engine.snapshot().await.origin_query, "spoken origin");
}
