//! Swipe session controller.
//!
//! Owns one [`SwipeSession`] and the continuations that move it through its
//! phases. Continuations hold a weak reference to the session and are aborted
//! on teardown, so they never act on a session nobody is looking at.

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::core::random::RandomSource;
use crate::core::session::{MatchId, SessionRules, SwipeSession};
use crate::core::share::{ShareOutcome, Sharer};
use crate::models::{Direction, Profile, SessionView};

/// Delays that pace a swipe and a match overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwipeTiming {
    /// Exit animation; the cursor advances when it elapses
    pub exit_delay: Duration,
    /// Tail of the exit animation before the next swipe is accepted
    pub settle_delay: Duration,
    /// How long a match overlay stays up without being dismissed
    pub match_expiry: Duration,
}

impl Default for SwipeTiming {
    fn default() -> Self {
        Self {
            exit_delay: Duration::from_millis(500),
            settle_delay: Duration::from_millis(200),
            match_expiry: Duration::from_secs(8),
        }
    }
}

struct Inner {
    session: SwipeSession,
    swipe_timer: Option<JoinHandle<()>>,
    match_timer: Option<(MatchId, JoinHandle<()>)>,
}

impl Inner {
    fn cancel_timers(&mut self) {
        if let Some(handle) = self.swipe_timer.take() {
            handle.abort();
        }
        if let Some((_, handle)) = self.match_timer.take() {
            handle.abort();
        }
    }
}

/// Drives a swipe session from user intents and timer expiry
///
/// Must be used from within a Tokio runtime: accepted swipes spawn their
/// continuation onto it.
pub struct SessionController {
    id: Uuid,
    inner: Arc<Mutex<Inner>>,
    timing: SwipeTiming,
    sharer: Sharer,
}

impl SessionController {
    pub fn new(
        rng: Arc<dyn RandomSource>,
        rules: SessionRules,
        timing: SwipeTiming,
        sharer: Sharer,
    ) -> Self {
        let id = rng.uuid_v4();
        let session = SwipeSession::new(rng, rules);

        tracing::debug!("Session {} started with {} profiles", id, session.total());

        Self {
            id,
            inner: Arc::new(Mutex::new(Inner {
                session,
                swipe_timer: None,
                match_timer: None,
            })),
            timing,
            sharer,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn timing(&self) -> SwipeTiming {
        self.timing
    }

    /// Current derived state
    pub fn view(&self) -> SessionView {
        self.inner.lock().session.view()
    }

    pub fn current_profile(&self) -> Option<Profile> {
        self.inner.lock().session.current_profile().cloned()
    }

    pub fn matched_profile(&self) -> Option<Profile> {
        self.inner.lock().session.matched_profile().cloned()
    }

    /// Swipe the current card
    ///
    /// Returns `false` when a swipe is already in flight; the intent is dropped
    /// and no continuation is scheduled.
    pub fn handle_swipe(&self, direction: Direction) -> bool {
        let mut inner = self.inner.lock();

        if !inner.session.begin_swipe(direction) {
            tracing::debug!("Session {} locked, dropping {} swipe", self.id, direction);
            return false;
        }

        let task = run_swipe(Arc::downgrade(&self.inner), self.id, self.timing);
        inner.swipe_timer = Some(tokio::spawn(task));
        true
    }

    /// Share the card currently on top
    pub fn handle_share(&self) -> Option<ShareOutcome> {
        let profile = self.current_profile()?;
        Some(self.sharer.share(&profile))
    }

    /// Share the matched profile
    pub fn handle_share_match(&self) -> Option<ShareOutcome> {
        let profile = self.matched_profile()?;
        Some(self.sharer.share(&profile))
    }

    /// Dismiss the match overlay and cancel its auto-expiry
    pub fn handle_close_match(&self) -> bool {
        let mut inner = self.inner.lock();

        if let Some((_, handle)) = inner.match_timer.take() {
            handle.abort();
        }

        match inner.session.close_match() {
            Some(id) => {
                tracing::debug!("Session {} closed match {:?}", self.id, id);
                true
            }
            None => false,
        }
    }

    /// Cancel every pending continuation
    pub fn shutdown(&self) {
        self.inner.lock().cancel_timers();
        tracing::debug!("Session {} shut down", self.id);
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        self.inner.lock().cancel_timers();
    }
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("id", &self.id)
            .field("timing", &self.timing)
            .field("sharer", &self.sharer)
            .finish_non_exhaustive()
    }
}

/// Exit phase then settle phase of one accepted swipe
async fn run_swipe(inner: Weak<Mutex<Inner>>, session_id: Uuid, timing: SwipeTiming) {
    tokio::time::sleep(timing.exit_delay).await;

    {
        let Some(strong) = inner.upgrade() else {
            return;
        };
        let mut guard = strong.lock();

        if let Some(match_id) = guard.session.complete_exit() {
            tracing::info!("Session {} found a match", session_id);

            // A newer match supersedes the old overlay and its timer
            if let Some((_, old)) = guard.match_timer.take() {
                old.abort();
            }
            let expiry = expire_match(Arc::downgrade(&strong), session_id, match_id, timing.match_expiry);
            guard.match_timer = Some((match_id, tokio::spawn(expiry)));
        }
    }

    tokio::time::sleep(timing.settle_delay).await;

    let Some(strong) = inner.upgrade() else {
        return;
    };
    let mut guard = strong.lock();
    guard.session.settle();
    guard.swipe_timer = None;
}

/// Auto-hide one specific match instance
async fn expire_match(inner: Weak<Mutex<Inner>>, session_id: Uuid, match_id: MatchId, after: Duration) {
    tokio::time::sleep(after).await;

    let Some(strong) = inner.upgrade() else {
        return;
    };
    let mut guard = strong.lock();

    if guard.session.expire_match(match_id) {
        tracing::debug!("Session {} match {:?} expired", session_id, match_id);
    }
    if matches!(guard.match_timer, Some((id, _)) if id == match_id) {
        guard.match_timer = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::SeededRandom;
    use crate::core::share::{ShareLinks, DEFAULT_NAMESPACE};

    fn controller() -> SessionController {
        SessionController::new(
            Arc::new(SeededRandom::new(21)),
            SessionRules {
                match_probability: 0.0,
                ..SessionRules::default()
            },
            SwipeTiming::default(),
            Sharer::new(ShareLinks::new("http://localhost:8080", DEFAULT_NAMESPACE)),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_swipe_completes_after_both_delays() {
        let c = controller();

        assert!(c.handle_swipe(Direction::Left));
        assert!(c.view().locked);

        tokio::time::sleep(Duration::from_millis(501)).await;
        let mid = c.view();
        assert_eq!(mid.cursor, 1);
        assert!(mid.locked);
        assert_eq!(mid.swipe_direction, Some(Direction::Left));

        tokio::time::sleep(Duration::from_millis(200)).await;
        let done = c.view();
        assert!(!done.locked);
        assert_eq!(done.swipe_direction, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_cancels_pending_swipe() {
        let c = controller();
        assert!(c.handle_swipe(Direction::Right));

        c.shutdown();
        tokio::time::sleep(Duration::from_secs(2)).await;

        assert_eq!(c.view().cursor, 0);
    }

    #[tokio::test]
    async fn test_share_current_profile() {
        let c = controller();
        let outcome = c.handle_share().unwrap();

        assert!(matches!(outcome, ShareOutcome::OpenLink { .. }));
        assert!(outcome.url().starts_with("http://localhost:8080/uuid/"));
        assert!(c.handle_share_match().is_none());
    }
}
