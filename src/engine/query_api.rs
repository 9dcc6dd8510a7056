use super::Engine;

use async_trait::async_trait;

use crate::api::{QueryAPI, SessionEvent};
use crate::entities::{QueryRole, Snapshot};

#[async_trait]
impl QueryAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn set_query(&self, role: QueryRole, text: String) {
        {
            let mut state = self.state.lock().await;
            state.set_query(role, text.clone());
        }

        self.emit(SessionEvent::QueryUpdated { role, text });
    }

    #[tracing::instrument(skip(self))]
    async fn snapshot(&self) -> Snapshot {
        self.state.lock().await.snapshot()
    }
}
