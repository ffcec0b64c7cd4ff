use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use thiserror::Error;
use uuid::Uuid;

use crate::core::controller::{SessionController, SwipeTiming};
use crate::core::random::RandomSource;
use crate::core::session::SessionRules;
use crate::core::share::Sharer;

/// Errors raised by the session registry
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(Uuid),
}

/// In-memory registry of live swipe sessions
///
/// Idle sessions are evicted after `idle_secs`; dropping the last handle to a
/// controller cancels its pending timers.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Cache<Uuid, Arc<SessionController>>,
    rng: Arc<dyn RandomSource>,
    rules: SessionRules,
    timing: SwipeTiming,
    sharer: Sharer,
}

impl SessionStore {
    pub fn new(
        rng: Arc<dyn RandomSource>,
        rules: SessionRules,
        timing: SwipeTiming,
        sharer: Sharer,
        max_sessions: u64,
        idle_secs: u64,
    ) -> Self {
        let sessions = Cache::builder()
            .max_capacity(max_sessions)
            .time_to_idle(Duration::from_secs(idle_secs))
            .eviction_listener(|id, controller: Arc<SessionController>, cause| {
                tracing::debug!("Evicting session {} ({:?})", id, cause);
                controller.shutdown();
            })
            .build();

        Self {
            sessions,
            rng,
            rules,
            timing,
            sharer,
        }
    }

    /// Start a new session, optionally overriding the batch size
    pub async fn create(&self, batch_size: Option<usize>) -> Arc<SessionController> {
        let rules = SessionRules {
            batch_size: batch_size.unwrap_or(self.rules.batch_size),
            ..self.rules
        };
        let controller = Arc::new(SessionController::new(
            self.rng.clone(),
            rules,
            self.timing,
            self.sharer.clone(),
        ));

        self.sessions.insert(controller.id(), controller.clone()).await;
        tracing::info!("Created session {}", controller.id());
        controller
    }

    pub async fn get(&self, id: &Uuid) -> Result<Arc<SessionController>, SessionError> {
        self.sessions
            .get(id)
            .await
            .ok_or(SessionError::NotFound(*id))
    }

    /// Tear a session down
    pub async fn remove(&self, id: &Uuid) -> Result<(), SessionError> {
        match self.sessions.remove(id).await {
            Some(controller) => {
                controller.shutdown();
                tracing::info!("Removed session {}", id);
                Ok(())
            }
            None => Err(SessionError::NotFound(*id)),
        }
    }

    /// Approximate number of live sessions
    pub fn len(&self) -> u64 {
        self.sessions.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn sharer(&self) -> &Sharer {
        &self.sharer
    }
}
