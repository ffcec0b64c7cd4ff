use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::random::{RandomSource, SourceRng};
use crate::models::Profile;

/// Youngest and oldest synthetic age, inclusive
pub const MIN_AGE: u8 = 1;
pub const MAX_AGE: u8 = 120;

pub const VERSIONS: [&str; 5] = [
    "v4 (Random)",
    "v4 (Random with timestamp)",
    "v4 (RFC 4122 compliant)",
    "v4 (Cryptographically secure)",
    "v4 (Quantum resistant)",
];

pub const FUN_FACTS: [&str; 30] = [
    "This UUID has enough entropy to be practically collision-free",
    "If every person on Earth generated 1 billion UUIDs, the chance of collision would still be almost zero",
    "This UUID is using a cryptographically secure random number generator",
    "UUIDs can be used for 10 billion years before having a 50% chance of a single collision",
    "This UUID consumes 128 bits of entropy from the universe",
    "This UUID helps maintain causality in distributed systems",
    "This UUID was born to be unique, just like you",
    "UUIDs are used by spacecraft to identify objects in space",
    "This UUID contains the meaning of life, but in hexadecimal",
    "If this UUID was printed on paper, it would be longer than your grocery receipt",
    "This UUID probably contains your birthday somewhere in its digits",
    "UUIDs were standardized in 2005, making them older than TikTok",
    "This UUID is unique across all time and space (probably)",
    "This UUID contains more randomness than a cat's behavior",
    "Only 122 of this UUID's 128 bits are random; the other 6 are pure commitment",
    "This UUID has never been used as a primary key. It is saving itself for you",
    "This UUID would take longer to guess than the heat death of the universe",
    "This UUID enjoys long walks through B-tree indexes",
    "This UUID has been lovingly hand-picked by a pseudo-random number generator",
    "This UUID's favorite number is 4, for obvious reasons",
    "This UUID is fluent in both uppercase and lowercase hex",
    "This UUID once appeared in a log file and nobody noticed",
    "This UUID has exactly four hyphens and zero regrets",
    "This UUID is compatible with every database you have ever loved",
    "This UUID is too shy to be sequential",
    "No other UUID in history has had these exact digits",
    "This UUID fits in a single SSE register with room for your feelings",
    "This UUID will never be reissued, even if you ask nicely",
    "This UUID is certified organic, free-range entropy",
    "This UUID thinks your session ID is kind of cute",
];

pub const STAR_SIGNS: [&str; 16] = [
    "Aries",
    "Taurus",
    "Gemini",
    "Cancer",
    "Leo",
    "Virgo",
    "Libra",
    "Scorpio",
    "Sagittarius",
    "Capricorn",
    "Aquarius",
    "Pisces",
    "Ophiuchus",
    "Hexadecimal Rising",
    "Null Moon",
    "Big Endian",
];

/// Produces identifier profiles on demand
///
/// Stateless apart from the randomness it consumes; cheap to clone.
#[derive(Clone)]
pub struct ProfileGenerator {
    rng: Arc<dyn RandomSource>,
}

impl ProfileGenerator {
    pub fn new(rng: Arc<dyn RandomSource>) -> Self {
        Self { rng }
    }

    /// Generate one profile with a fresh identifier
    pub fn generate(&self) -> Profile {
        let uuid = self.rng.uuid_v4().to_string();
        self.generate_with_identifier(uuid)
    }

    /// Generate a profile that carries the given identifier
    ///
    /// Metadata is drawn exactly as in [`generate`](Self::generate). Used when a
    /// shared link only carries the identifier.
    pub fn generate_with_identifier(&self, uuid: impl Into<String>) -> Profile {
        let age = SourceRng::new(&*self.rng).gen_range(MIN_AGE..=MAX_AGE);

        Profile {
            uuid: uuid.into(),
            age,
            version: self.pick(&VERSIONS).to_string(),
            fun_fact: self.pick(&FUN_FACTS).to_string(),
            star_sign: self.pick(&STAR_SIGNS).to_string(),
        }
    }

    /// Generate `count` independent profiles
    pub fn generate_batch(&self, count: usize) -> Vec<Profile> {
        (0..count).map(|_| self.generate()).collect()
    }

    /// Uniformly pick one entry from a fixed pool; empty for an empty pool
    pub fn pick<'a>(&self, pool: &[&'a str]) -> &'a str {
        pool.choose(&mut SourceRng::new(&*self.rng))
            .copied()
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for ProfileGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileGenerator").finish_non_exhaustive()
    }
}
