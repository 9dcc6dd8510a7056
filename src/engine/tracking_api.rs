use super::{emit_event, Engine};

use async_trait::async_trait;
use futures::StreamExt;

use crate::api::{SessionEvent, TrackingAPI};
use crate::entities::LivePosition;
use crate::error::{invalid_invocation_error, Error};

#[async_trait]
impl TrackingAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn start_watching(&self) -> Result<(), Error> {
        let mut slot = self.watch_task.lock().await;

        if slot.is_some() {
            return Err(invalid_invocation_error());
        }

        let mut updates = self.positions.watch();
        let state = self.state.clone();
        let events = self.events.clone();
        let zoom = self.config.recenter_zoom;

        let handle = tokio::spawn(async move {
            while let Some(update) = updates.next().await {
                match update {
                    Ok(coordinates) => {
                        {
                            let mut state = state.lock().await;
                            state.live_position = Some(LivePosition::new(coordinates));
                        }

                        emit_event(
                            &events,
                            SessionEvent::Recentered {
                                center: coordinates,
                                zoom,
                            },
                        );
                    }
                    Err(err) => {
                        // Non-fatal: report and keep watching.
                        tracing::warn!("position source error: {}", err.message);

                        emit_event(
                            &events,
                            SessionEvent::PositionError {
                                message: err.message,
                            },
                        );
                    }
                }
            }

            tracing::info!("position stream ended");
        });

        *slot = Some(handle);

        tracing::info!("watching live position");

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn stop_watching(&self) {
        if let Some(handle) = self.watch_task.lock().await.take() {
            handle.abort();
            tracing::info!("stopped watching live position");
        }
    }
}
