use async_trait::async_trait;
use futures::stream::BoxStream;
use std::sync::Arc;
use tokio::sync::watch;

use crate::entities::{Coordinates, Place, QueryRole, Route, Snapshot};
use crate::error::Error;

#[async_trait]
pub trait Geocoder {
    async fn resolve(&self, query: &str) -> Result<Place, Error>;
}

#[async_trait]
pub trait Router {
    async fn create_route(&self, origin: Place, destination: Place) -> Result<Route, Error>;
}

/// A queued text-to-speech primitive: playback order is submission order.
#[async_trait]
pub trait SpeechSink {
    async fn enqueue(&self, utterance: &str) -> Result<(), Error>;
}

/// A live speech-to-text primitive. Duration policy lives in the engine,
/// not here.
#[async_trait]
pub trait SpeechCapture {
    async fn begin_capture(&self) -> Result<watch::Receiver<String>, Error>;
    async fn end_capture(&self) -> Result<String, Error>;
}

/// A continuous high-accuracy position feed. Errors are delivered as
/// stream items and do not terminate the stream.
pub trait PositionSource {
    fn watch(&self) -> BoxStream<'static, Result<Coordinates, Error>>;
}

pub type DynGeocoder = Arc<dyn Geocoder + Send + Sync>;
pub type DynRouter = Arc<dyn Router + Send + Sync>;
pub type DynSpeechSink = Arc<dyn SpeechSink + Send + Sync>;
pub type DynSpeechCapture = Arc<dyn SpeechCapture + Send + Sync>;
pub type DynPositionSource = Arc<dyn PositionSource + Send + Sync>;

#[async_trait]
pub trait QueryAPI {
    async fn set_query(&self, role: QueryRole, text: String);
    async fn snapshot(&self) -> Snapshot;
}

#[async_trait]
pub trait SearchAPI {
    /// Runs geocode -> route -> narrate. `Ok(None)` means the search was
    /// superseded by a newer one and wrote no state.
    async fn search(&self) -> Result<Option<Route>, Error>;
}

#[async_trait]
pub trait VoiceAPI {
    async fn capture_query(&self, role: QueryRole) -> Result<String, Error>;
}

#[async_trait]
pub trait TrackingAPI {
    async fn start_watching(&self) -> Result<(), Error>;
    async fn stop_watching(&self);
}

pub trait EventAPI {
    fn events(&self) -> async_channel::Receiver<SessionEvent>;
}

pub trait API: QueryAPI + SearchAPI + VoiceAPI + TrackingAPI + EventAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;

/// Signals raised for the presentation shell.
#[derive(Clone, Debug)]
pub enum SessionEvent {
    QueryUpdated { role: QueryRole, text: String },
    PlaceResolved { role: QueryRole, place: Place },
    /// Geocoding produced no candidate for this role.
    PlaceNotFound { role: QueryRole },
    RouteUpdated { route: Route },
    /// The current route was discarded after a failed search.
    RouteCleared,
    /// The view should recenter on the live position at a fixed zoom.
    Recentered { center: Coordinates, zoom: u8 },
    PositionError { message: String },
    TranscriptUpdated { text: String },
    /// A capture window closed and its transcript was committed.
    TranscriptCommitted { role: QueryRole, text: String },
}
