// Unit tests for UUID Matcher

use std::sync::Arc;

use uuid_matcher::core::generator::{FUN_FACTS, MAX_AGE, MIN_AGE, STAR_SIGNS, VERSIONS};
use uuid_matcher::core::share::{encode_full_payload, fallback_payload};
use uuid_matcher::core::{
    classify_drag, decode_payload, encode_payload, ProfileGenerator, RandomSource, SeededRandom,
    SessionRules, SharedPayload, SwipeSession, ThreadRandom,
};
use uuid_matcher::{Direction, Profile};

fn is_v4_identifier(id: &str) -> bool {
    let bytes = id.as_bytes();
    id.len() == 36
        && [8, 13, 18, 23].iter().all(|&i| bytes[i] == b'-')
        && bytes[14] == b'4'
        && matches!(bytes[19], b'8' | b'9' | b'a' | b'b')
        && id
            .chars()
            .enumerate()
            .all(|(i, c)| [8, 13, 18, 23].contains(&i) || (c.is_ascii_hexdigit() && !c.is_ascii_uppercase()))
}

#[test]
fn test_generated_profiles_respect_pools() {
    let generator = ProfileGenerator::new(Arc::new(ThreadRandom));

    for profile in generator.generate_batch(1000) {
        assert!((MIN_AGE..=MAX_AGE).contains(&profile.age));
        assert!(VERSIONS.contains(&profile.version.as_str()));
        assert!(FUN_FACTS.contains(&profile.fun_fact.as_str()));
        assert!(STAR_SIGNS.contains(&profile.star_sign.as_str()));
        assert!(is_v4_identifier(&profile.uuid), "bad identifier {}", profile.uuid);
    }
}

#[test]
fn test_pool_sizes() {
    assert_eq!(VERSIONS.len(), 5);
    assert_eq!(FUN_FACTS.len(), 30);
    assert_eq!(STAR_SIGNS.len(), 16);
}

#[test]
fn test_share_round_trip_both_forms() {
    let generator = ProfileGenerator::new(Arc::new(SeededRandom::new(1234)));

    for profile in generator.generate_batch(200) {
        let full = encode_payload(&profile);
        assert_eq!(decode_payload(&full), SharedPayload::Profile(profile.clone()));

        let short = fallback_payload(&profile.uuid);
        assert_eq!(decode_payload(&short).identifier(), profile.uuid);
    }
}

#[test]
fn test_fallback_used_when_full_encoding_fails() {
    let profile = Profile {
        uuid: "5d1c2b7a-0e9f-4a38-b6c4-91d2e3f4a5b6".to_string(),
        age: 7,
        version: "v4 (Quantum resistant)".to_string(),
        fun_fact: "a".repeat(10_000),
        star_sign: "Null Moon".to_string(),
    };

    assert!(encode_full_payload(&profile).is_err());
    let payload = encode_payload(&profile);
    assert_eq!(payload, "5d1c2b7a_0e9f_4a38_b6c4_91d2e3f4a5b6");
    assert_eq!(
        decode_payload(&payload),
        SharedPayload::Identifier(profile.uuid.clone())
    );
}

#[test]
fn test_drag_classification() {
    assert_eq!(classify_drag(51.0, 0.0), Some(Direction::Right));
    assert_eq!(classify_drag(-51.0, 0.0), Some(Direction::Left));
    assert_eq!(classify_drag(20.0, 501.0), Some(Direction::Right));
    assert_eq!(classify_drag(49.0, 499.0), None);
}

#[test]
fn test_refill_invariant_over_many_swipes() {
    let rng: Arc<dyn RandomSource> = Arc::new(SeededRandom::new(77));
    let mut session = SwipeSession::new(rng, SessionRules::default());

    for i in 0..200 {
        let direction = if i % 3 == 0 { Direction::Left } else { Direction::Right };
        assert!(session.begin_swipe(direction));
        session.complete_exit();
        assert!(session.settle());

        assert_eq!(session.cursor(), i + 1);
        assert!(session.cursor() <= session.total());
        assert!(session.remaining() >= 3);
    }
}

#[test]
fn test_match_frequency_is_roughly_a_quarter() {
    let rng: Arc<dyn RandomSource> = Arc::new(SeededRandom::new(2024));
    let mut session = SwipeSession::new(rng, SessionRules::default());
    let mut matches = 0;

    for _ in 0..4000 {
        session.begin_swipe(Direction::Right);
        if session.complete_exit().is_some() {
            matches += 1;
        }
        session.settle();
    }

    let rate = matches as f64 / 4000.0;
    assert!((0.2..0.3).contains(&rate), "match rate {}", rate);
}
