//! Stand-ins for the device primitives: a jittered position feed and a
//! scripted recognizer, used by the demo binary and exercised in tests.

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use rand_distr::{Distribution, Normal};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};

use crate::api::{PositionSource, SpeechCapture};
use crate::entities::Coordinates;
use crate::error::{position_error, Error};

/// Emits a random walk around an anchor at a fixed cadence.
pub struct SimulatedPositionSource {
    anchor: Coordinates,
    interval: Duration,
}

impl SimulatedPositionSource {
    pub fn new(anchor: Coordinates, interval: Duration) -> Self {
        Self { anchor, interval }
    }
}

impl PositionSource for SimulatedPositionSource {
    fn watch(&self) -> BoxStream<'static, Result<Coordinates, Error>> {
        let interval = self.interval;
        let jitter = Normal::new(0.0, 0.0005).unwrap();

        stream::unfold(self.anchor, move |current| async move {
            tokio::time::sleep(interval).await;

            let (dlat, dlon) = {
                let mut rng = rand::thread_rng();
                (jitter.sample(&mut rng), jitter.sample(&mut rng))
            };

            let next = Coordinates::new(
                (current.latitude + dlat).clamp(-90.0, 90.0),
                (current.longitude + dlon).clamp(-180.0, 180.0),
            );

            match next {
                Ok(next) => Some((Ok(next), next)),
                Err(_) => Some((
                    Err(position_error("simulated fix out of range".into())),
                    current,
                )),
            }
        })
        .boxed()
    }
}

/// Replays canned phrases word by word, the way a live recognizer refines
/// its transcript while listening.
pub struct ScriptedCapture {
    phrases: Mutex<VecDeque<String>>,
    partial: Arc<Mutex<String>>,
    word_delay: Duration,
}

impl ScriptedCapture {
    pub fn new(phrases: Vec<String>) -> Self {
        Self {
            phrases: Mutex::new(phrases.into()),
            partial: Arc::new(Mutex::new(String::new())),
            word_delay: Duration::from_millis(400),
        }
    }
}

#[async_trait]
impl SpeechCapture for ScriptedCapture {
    async fn begin_capture(&self) -> Result<watch::Receiver<String>, Error> {
        let phrase = self.phrases.lock().await.pop_front().unwrap_or_default();

        *self.partial.lock().await = String::new();

        let (tx, rx) = watch::channel(String::new());
        let partial = self.partial.clone();
        let word_delay = self.word_delay;

        tokio::spawn(async move {
            let mut heard = String::new();

            for word in phrase.split_whitespace() {
                tokio::time::sleep(word_delay).await;

                if !heard.is_empty() {
                    heard.push(' ');
                }
                heard.push_str(word);

                *partial.lock().await = heard.clone();

                if tx.send(heard.clone()).is_err() {
                    return;
                }
            }
        });

        Ok(rx)
    }

    async fn end_capture(&self) -> Result<String, Error> {
        Ok(self.partial.lock().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn simulated_positions_stay_near_the_anchor() {
        let anchor = Coordinates::new(13.0827, 80.2707).unwrap();
        let source = SimulatedPositionSource::new(anchor, Duration::from_millis(1));

        let mut updates = source.watch();

        for _ in 0..5 {
            let fix = updates.next().await.unwrap().unwrap();

            assert!((fix.latitude - anchor.latitude).abs() < 0.1);
            assert!((fix.longitude - anchor.longitude).abs() < 0.1);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn scripted_capture_accumulates_words() {
        let capture = ScriptedCapture::new(vec!["Chennai Central".into()]);

        let mut rx = capture.begin_capture().await.unwrap();

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), "Chennai");

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), "Chennai Central");

        assert_eq!(capture.end_capture().await.unwrap(), "Chennai Central");
    }
}
