//! Swipe session state machine.
//!
//! Pure and synchronous: it knows nothing about timers. The controller drives
//! the transitions when its scheduled continuations fire.
//!
//! ```text
//! Idle --begin_swipe--> Exiting(d) --complete_exit--> Settling(d) --settle--> Idle
//! ```

use std::sync::Arc;

use crate::core::generator::ProfileGenerator;
use crate::core::random::RandomSource;
use crate::models::{Direction, Profile, SessionView};

pub const DEFAULT_BATCH_SIZE: usize = 5;
pub const DEFAULT_REFILL_THRESHOLD: usize = 2;
pub const DEFAULT_MATCH_PROBABILITY: f64 = 0.25;

/// Tunables for a swipe session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionRules {
    /// Profiles generated at start and on every refill
    pub batch_size: usize,
    /// Refill when this many or fewer unconsumed profiles remain
    pub refill_threshold: usize,
    /// Chance that a right swipe is a match
    pub match_probability: f64,
    /// Consumed profiles kept behind the cursor; `None` keeps everything
    pub history_limit: Option<usize>,
}

impl Default for SessionRules {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            refill_threshold: DEFAULT_REFILL_THRESHOLD,
            match_probability: DEFAULT_MATCH_PROBABILITY,
            history_limit: None,
        }
    }
}

/// Where the session is in the swipe cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Accepting swipes
    Idle,
    /// Card is animating out; the cursor has not moved yet
    Exiting(Direction),
    /// Cursor advanced; exit animation finishing
    Settling(Direction),
}

impl Phase {
    pub fn is_locked(&self) -> bool {
        !matches!(self, Phase::Idle)
    }

    pub fn direction(&self) -> Option<Direction> {
        match self {
            Phase::Idle => None,
            Phase::Exiting(d) | Phase::Settling(d) => Some(*d),
        }
    }
}

/// Identity of one match instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchId(u64);

#[derive(Debug, Clone)]
struct MatchRecord {
    id: MatchId,
    profile: Profile,
    visible: bool,
}

/// Ordered, append-only profile list with a cursor and match state
///
/// `cursor` and [`total`](Self::total) are absolute positions. With a history
/// limit the oldest consumed profiles are dropped from memory, but neither
/// value ever moves backwards.
pub struct SwipeSession {
    rules: SessionRules,
    rng: Arc<dyn RandomSource>,
    generator: ProfileGenerator,
    profiles: Vec<Profile>,
    dropped: usize,
    cursor: usize,
    phase: Phase,
    current_match: Option<MatchRecord>,
    next_match_id: u64,
}

impl SwipeSession {
    /// Start a session seeded with one batch of profiles
    pub fn new(rng: Arc<dyn RandomSource>, rules: SessionRules) -> Self {
        let rules = SessionRules {
            batch_size: rules.batch_size.max(1),
            ..rules
        };
        let generator = ProfileGenerator::new(rng.clone());
        let profiles = generator.generate_batch(rules.batch_size);

        let mut session = Self {
            rules,
            rng,
            generator,
            profiles,
            dropped: 0,
            cursor: 0,
            phase: Phase::Idle,
            current_match: None,
            next_match_id: 0,
        };
        session.ensure_stock();
        session
    }

    pub fn rules(&self) -> &SessionRules {
        &self.rules
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_locked(&self) -> bool {
        self.phase.is_locked()
    }

    pub fn swipe_direction(&self) -> Option<Direction> {
        self.phase.direction()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of profiles ever appended to the session
    pub fn total(&self) -> usize {
        self.dropped + self.profiles.len()
    }

    /// Profiles not yet swiped past
    pub fn remaining(&self) -> usize {
        self.total() - self.cursor
    }

    /// Profiles still held in memory
    pub fn retained(&self) -> usize {
        self.profiles.len()
    }

    pub fn current_profile(&self) -> Option<&Profile> {
        self.profiles.get(self.cursor - self.dropped)
    }

    pub fn matched_profile(&self) -> Option<&Profile> {
        self.current_match.as_ref().map(|m| &m.profile)
    }

    pub fn show_match(&self) -> bool {
        self.current_match.as_ref().map_or(false, |m| m.visible)
    }

    pub fn current_match_id(&self) -> Option<MatchId> {
        self.current_match.as_ref().map(|m| m.id)
    }

    /// Idle -> Exiting. Returns `false` (and changes nothing) while locked.
    pub fn begin_swipe(&mut self, direction: Direction) -> bool {
        if self.phase.is_locked() {
            return false;
        }
        self.phase = Phase::Exiting(direction);
        true
    }

    /// Exiting -> Settling: roll for a match, advance the cursor, refill.
    ///
    /// Returns the id of a newly created match. Does nothing outside Exiting.
    pub fn complete_exit(&mut self) -> Option<MatchId> {
        let Phase::Exiting(direction) = self.phase else {
            return None;
        };

        // Only right swipes draw from the random source
        let matched = direction == Direction::Right
            && self.rng.unit() < self.rules.match_probability;

        let new_match = if matched {
            self.current_profile().cloned().map(|profile| {
                let id = MatchId(self.next_match_id);
                self.next_match_id += 1;
                tracing::debug!("Matched with {} ({:?})", profile.uuid, id);
                self.current_match = Some(MatchRecord {
                    id,
                    profile,
                    visible: true,
                });
                id
            })
        } else {
            None
        };

        if self.cursor < self.total() {
            self.cursor += 1;
        }
        self.ensure_stock();
        self.prune_history();

        self.phase = Phase::Settling(direction);
        new_match
    }

    /// Settling -> Idle. Returns `false` outside Settling.
    pub fn settle(&mut self) -> bool {
        if !matches!(self.phase, Phase::Settling(_)) {
            return false;
        }
        self.phase = Phase::Idle;
        true
    }

    /// Dismiss the match, clearing both visibility and the matched profile
    pub fn close_match(&mut self) -> Option<MatchId> {
        self.current_match.take().map(|m| m.id)
    }

    /// Hide the match overlay if `id` is still the live, visible match
    pub fn expire_match(&mut self, id: MatchId) -> bool {
        match self.current_match.as_mut() {
            Some(record) if record.id == id && record.visible => {
                record.visible = false;
                true
            }
            _ => false,
        }
    }

    /// Append batches until more than `refill_threshold` profiles remain
    fn ensure_stock(&mut self) -> usize {
        let mut appended = 0;
        while self.remaining() <= self.rules.refill_threshold {
            let batch = self.generator.generate_batch(self.rules.batch_size);
            appended += batch.len();
            self.profiles.extend(batch);
        }
        if appended > 0 {
            tracing::debug!("Refilled {} profiles (cursor {}, total {})", appended, self.cursor, self.total());
        }
        appended
    }

    fn prune_history(&mut self) {
        let Some(limit) = self.rules.history_limit else {
            return;
        };
        let consumed = self.cursor - self.dropped;
        if consumed > limit {
            let excess = consumed - limit;
            self.profiles.drain(..excess);
            self.dropped += excess;
        }
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            current_profile: self.current_profile().cloned(),
            swipe_direction: self.swipe_direction(),
            locked: self.is_locked(),
            show_match: self.show_match(),
            matched_profile: self.matched_profile().cloned(),
            cursor: self.cursor,
            remaining: self.remaining(),
            total: self.total(),
        }
    }
}

impl std::fmt::Debug for SwipeSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwipeSession")
            .field("rules", &self.rules)
            .field("cursor", &self.cursor)
            .field("total", &self.total())
            .field("phase", &self.phase)
            .field("match", &self.current_match_id())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::SeededRandom;

    /// Seeded bytes, but the match roll is pinned
    struct PinnedRoll {
        inner: SeededRandom,
        roll: f64,
    }

    impl RandomSource for PinnedRoll {
        fn fill_bytes(&self, buffer: &mut [u8]) {
            self.inner.fill_bytes(buffer);
        }

        fn unit(&self) -> f64 {
            self.roll
        }
    }

    fn session(roll: f64) -> SwipeSession {
        let rng = Arc::new(PinnedRoll {
            inner: SeededRandom::new(1),
            roll,
        });
        SwipeSession::new(rng, SessionRules::default())
    }

    fn swipe(session: &mut SwipeSession, direction: Direction) -> Option<MatchId> {
        assert!(session.begin_swipe(direction));
        let id = session.complete_exit();
        assert!(session.settle());
        id
    }

    #[test]
    fn test_seeded_with_one_batch() {
        let s = session(0.9);
        assert_eq!(s.total(), DEFAULT_BATCH_SIZE);
        assert_eq!(s.cursor(), 0);
        assert_eq!(s.phase(), Phase::Idle);
        assert!(s.current_profile().is_some());
    }

    #[test]
    fn test_phase_transitions() {
        let mut s = session(0.9);

        assert!(s.begin_swipe(Direction::Left));
        assert_eq!(s.phase(), Phase::Exiting(Direction::Left));
        assert!(s.is_locked());
        assert_eq!(s.cursor(), 0);

        s.complete_exit();
        assert_eq!(s.phase(), Phase::Settling(Direction::Left));
        assert!(s.is_locked());
        assert_eq!(s.cursor(), 1);

        assert!(s.settle());
        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(s.swipe_direction(), None);
    }

    #[test]
    fn test_swipe_while_locked_is_noop() {
        let mut s = session(0.0);
        assert!(s.begin_swipe(Direction::Right));
        let before = s.view();

        assert!(!s.begin_swipe(Direction::Left));
        assert_eq!(s.view(), before);

        s.complete_exit();
        let before = s.view();
        assert!(!s.begin_swipe(Direction::Left));
        assert_eq!(s.view(), before);
    }

    #[test]
    fn test_out_of_order_transitions_ignored() {
        let mut s = session(0.0);
        assert_eq!(s.complete_exit(), None);
        assert!(!s.settle());
        assert_eq!(s.cursor(), 0);
    }

    #[test]
    fn test_match_captures_profile_before_advance() {
        let mut s = session(0.0);
        let before = s.current_profile().cloned();

        let id = swipe(&mut s, Direction::Right);
        assert!(id.is_some());
        assert!(s.show_match());
        assert_eq!(s.matched_profile().cloned(), before);
        assert_ne!(s.current_profile().cloned(), before);
    }

    #[test]
    fn test_left_swipe_never_matches() {
        let mut s = session(0.0);
        assert_eq!(swipe(&mut s, Direction::Left), None);
        assert!(!s.show_match());
    }

    #[test]
    fn test_roll_at_probability_is_not_a_match() {
        let mut s = session(DEFAULT_MATCH_PROBABILITY);
        assert_eq!(swipe(&mut s, Direction::Right), None);
    }

    #[test]
    fn test_refill_fires_at_threshold() {
        let mut s = session(0.9);

        swipe(&mut s, Direction::Right);
        swipe(&mut s, Direction::Right);
        assert_eq!(s.cursor(), 2);
        assert_eq!(s.total(), 5);

        // 5 - 3 = 2 remaining hits the threshold
        swipe(&mut s, Direction::Right);
        assert_eq!(s.cursor(), 3);
        assert_eq!(s.total(), 10);
        assert!(!s.show_match());
    }

    #[test]
    fn test_small_batches_still_clear_threshold() {
        let rng = Arc::new(SeededRandom::new(3));
        let rules = SessionRules {
            batch_size: 1,
            ..SessionRules::default()
        };
        let mut s = SwipeSession::new(rng, rules);
        assert_eq!(s.remaining(), 3);

        for _ in 0..10 {
            swipe(&mut s, Direction::Left);
            assert!(s.remaining() > rules.refill_threshold);
        }
    }

    #[test]
    fn test_expire_only_hides_matching_instance() {
        let mut s = session(0.0);
        let first = swipe(&mut s, Direction::Right).unwrap();
        let second = swipe(&mut s, Direction::Right).unwrap();
        assert_ne!(first, second);

        // stale id from the first match leaves the second untouched
        assert!(!s.expire_match(first));
        assert!(s.show_match());

        assert!(s.expire_match(second));
        assert!(!s.show_match());
        assert!(s.matched_profile().is_some());
        assert!(!s.expire_match(second));
    }

    #[test]
    fn test_close_match_clears_both() {
        let mut s = session(0.0);
        let id = swipe(&mut s, Direction::Right);

        assert_eq!(s.close_match(), id);
        assert!(!s.show_match());
        assert!(s.matched_profile().is_none());
        assert_eq!(s.close_match(), None);
    }

    #[test]
    fn test_history_limit_keeps_cursor_monotonic() {
        let rng = Arc::new(SeededRandom::new(5));
        let rules = SessionRules {
            history_limit: Some(2),
            ..SessionRules::default()
        };
        let mut s = SwipeSession::new(rng, rules);

        let mut last_cursor = 0;
        for _ in 0..25 {
            swipe(&mut s, Direction::Left);
            assert!(s.cursor() > last_cursor);
            last_cursor = s.cursor();
            assert!(s.cursor() <= s.total());
            assert!(s.retained() <= 2 + s.remaining());
            assert!(s.current_profile().is_some());
        }
        assert_eq!(s.cursor(), 25);
    }
}
