//! Injectable randomness.
//!
//! Everything random in the crate (identifier bytes, pool selection, the
//! match roll) is drawn through [`RandomSource`] so tests can pin outcomes
//! without touching global state. [`SourceRng`] exposes a source to the
//! `rand` sampling API.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use uuid::Uuid;

/// Source of randomness for profile generation and match rolls.
///
/// Only [`fill_bytes`](RandomSource::fill_bytes) is required. Implementations
/// may override [`unit`](RandomSource::unit) independently to force match
/// outcomes.
pub trait RandomSource: Send + Sync + 'static {
    /// Fills the buffer with random bytes.
    fn fill_bytes(&self, buffer: &mut [u8]);

    /// Uniform value in `[0, 1)`, used for the match roll.
    fn unit(&self) -> f64 {
        SourceRng::new(self).gen::<f64>()
    }

    /// Version-4 UUID built from 16 random bytes.
    fn uuid_v4(&self) -> Uuid {
        let mut bytes = [0u8; 16];
        self.fill_bytes(&mut bytes);
        uuid::Builder::from_random_bytes(bytes).into_uuid()
    }
}

/// `RngCore` view over a [`RandomSource`]
pub struct SourceRng<'a, R: ?Sized> {
    source: &'a R,
}

impl<'a, R: RandomSource + ?Sized> SourceRng<'a, R> {
    pub fn new(source: &'a R) -> Self {
        Self { source }
    }
}

impl<R: RandomSource + ?Sized> RngCore for SourceRng<'_, R> {
    fn next_u32(&mut self) -> u32 {
        let mut bytes = [0u8; 4];
        self.source.fill_bytes(&mut bytes);
        u32::from_le_bytes(bytes)
    }

    fn next_u64(&mut self) -> u64 {
        let mut bytes = [0u8; 8];
        self.source.fill_bytes(&mut bytes);
        u64::from_le_bytes(bytes)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.source.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.source.fill_bytes(dest);
        Ok(())
    }
}

/// Production source backed by the thread-local OS-seeded generator
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn fill_bytes(&self, buffer: &mut [u8]) {
        rand::thread_rng().fill_bytes(buffer);
    }
}

/// Deterministic source for tests and reproducible runs
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn fill_bytes(&self, buffer: &mut [u8]) {
        self.rng.lock().fill_bytes(buffer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::seq::SliceRandom;

    #[test]
    fn test_unit_in_range() {
        let rng = SeededRandom::new(7);
        for _ in 0..1000 {
            let value = rng.unit();
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn test_adapter_samples_whole_range() {
        let source = SeededRandom::new(11);
        let mut rng = SourceRng::new(&source);
        let mut seen = [false; 5];
        for _ in 0..500 {
            seen[rng.gen_range(0..5)] = true;
        }
        assert!(seen.iter().all(|s| *s));

        let empty: [u8; 0] = [];
        assert!(empty.choose(&mut rng).is_none());
    }

    #[test]
    fn test_adapter_over_trait_object() {
        let source: Box<dyn RandomSource> = Box::new(SeededRandom::new(3));
        let value: u8 = SourceRng::new(&*source).gen_range(1..=120);
        assert!((1..=120).contains(&value));
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let a = SeededRandom::new(42);
        let b = SeededRandom::new(42);
        assert_eq!(a.uuid_v4(), b.uuid_v4());
        assert_eq!(a.unit(), b.unit());
    }

    #[test]
    fn test_uuid_is_version_four() {
        let uuid = ThreadRandom.uuid_v4();
        assert_eq!(uuid.get_version_num(), 4);
        assert_eq!(uuid.get_variant(), uuid::Variant::RFC4122);
    }
}
