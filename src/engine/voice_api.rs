use super::Engine;

use async_trait::async_trait;

use crate::api::{SessionEvent, VoiceAPI};
use crate::entities::QueryRole;
use crate::error::Error;

#[async_trait]
impl VoiceAPI for Engine {
    /// Fixed-cutoff capture: the window always runs to its deadline, then
    /// whatever transcript exists is committed to the role's query field,
    /// even an empty one.
    #[tracing::instrument(skip(self))]
    async fn capture_query(&self, role: QueryRole) -> Result<String, Error> {
        let _guard = self.capture_lock.lock().await;

        let mut transcript_rx = self.capture.begin_capture().await?;

        let deadline = tokio::time::sleep(self.config.capture_window);
        tokio::pin!(deadline);

        loop {
            tokio::select! {
                _ = &mut deadline => break,
                changed = transcript_rx.changed() => {
                    if changed.is_err() {
                        // Recognizer went away early; the window still
                        // runs to its deadline.
                        deadline.as_mut().await;
                        break;
                    }

                    let text = transcript_rx.borrow().clone();

                    {
                        let mut state = self.state.lock().await;
                        state.transcript = text.clone();
                    }

                    self.emit(SessionEvent::TranscriptUpdated { text });
                }
            }
        }

        let text = self.capture.end_capture().await?;

        {
            let mut state = self.state.lock().await;
            state.set_query(role, text.clone());
            state.transcript = text.clone();
        }

        tracing::info!("capture window closed, committing transcript");

        self.emit(SessionEvent::TranscriptCommitted {
            role,
            text: text.clone(),
        });

        Ok(text)
    }
}
