mod query_api;
mod search_api;
mod tracking_api;
mod voice_api;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::api::{
    DynGeocoder, DynPositionSource, DynRouter, DynSpeechCapture, DynSpeechSink, EventAPI,
    SessionEvent, API,
};
use crate::config::Config;
use crate::entities::SessionState;
use crate::speech::Narrator;

/// Single authority over session state. Sequences geocode -> route ->
/// narrate; the live-position watch runs on its own task and never waits
/// on the pipeline.
pub struct Engine {
    geocoder: DynGeocoder,
    router: DynRouter,
    narrator: Narrator,
    capture: DynSpeechCapture,
    positions: DynPositionSource,
    config: Config,
    state: Arc<Mutex<SessionState>>,
    events: async_channel::Sender<SessionEvent>,
    event_rx: async_channel::Receiver<SessionEvent>,
    search_generation: AtomicU64,
    search_lock: Mutex<()>,
    capture_lock: Mutex<()>,
    watch_task: Mutex<Option<JoinHandle<()>>>,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub fn new(
        geocoder: DynGeocoder,
        router: DynRouter,
        speech: DynSpeechSink,
        capture: DynSpeechCapture,
        positions: DynPositionSource,
        config: Config,
    ) -> Self {
        let (events, event_rx) = async_channel::bounded(256);

        Self {
            geocoder,
            router,
            narrator: Narrator::new(speech),
            capture,
            positions,
            config,
            state: Arc::new(Mutex::new(SessionState::new())),
            events,
            event_rx,
            search_generation: AtomicU64::new(0),
            search_lock: Mutex::new(()),
            capture_lock: Mutex::new(()),
            watch_task: Mutex::new(None),
        }
    }

    /// Each search takes a fresh generation; a pipeline whose generation
    /// is no longer current discards its results instead of writing state.
    fn next_generation(&self) -> u64 {
        self.search_generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, generation: u64) -> bool {
        self.search_generation.load(Ordering::SeqCst) == generation
    }

    fn emit(&self, event: SessionEvent) {
        emit_event(&self.events, event);
    }
}

/// Emission must never block orchestration; overflow is dropped.
fn emit_event(events: &async_channel::Sender<SessionEvent>, event: SessionEvent) {
    if events.try_send(event).is_err() {
        tracing::debug!("event channel full, dropping event");
    }
}

impl EventAPI for Engine {
    fn events(&self) -> async_channel::Receiver<SessionEvent> {
        self.event_rx.clone()
    }
}

impl API for Engine {}

impl Drop for Engine {
    fn drop(&mut self) {
        // Release the position subscription however the session ends.
        if let Ok(mut slot) = self.watch_task.try_lock() {
            if let Some(handle) = slot.take() {
                handle.abort();
            }
        }
    }
}
