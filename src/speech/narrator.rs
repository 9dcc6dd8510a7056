use async_trait::async_trait;

use crate::api::{DynSpeechSink, SpeechSink};
use crate::entities::RouteLeg;
use crate::error::Error;

/// Spoken when a leg arrives with no maneuvers.
pub const FALLBACK_ANNOUNCEMENT: &str =
    "Route calculated. Follow the highlighted path on the map.";

/// Turns a route leg into ordered utterances. The sink serializes
/// playback; narration itself is fire-and-forget.
pub struct Narrator {
    sink: DynSpeechSink,
}

impl Narrator {
    pub fn new(sink: DynSpeechSink) -> Self {
        Self { sink }
    }

    #[tracing::instrument(skip_all)]
    pub async fn narrate(&self, leg: &RouteLeg) {
        if leg.maneuvers.is_empty() {
            self.speak(FALLBACK_ANNOUNCEMENT).await;
            return;
        }

        for maneuver in &leg.maneuvers {
            self.speak(&maneuver.instruction).await;
        }
    }

    async fn speak(&self, utterance: &str) {
        if let Err(err) = self.sink.enqueue(utterance).await {
            tracing::warn!("dropping utterance: {}", err.message);
        }
    }
}

/// Sink that prints utterances instead of synthesizing audio.
pub struct ConsoleSpeech;

#[async_trait]
impl SpeechSink for ConsoleSpeech {
    async fn enqueue(&self, utterance: &str) -> Result<(), Error> {
        println!("[voice] {}", utterance);
        Ok(())
    }
}
