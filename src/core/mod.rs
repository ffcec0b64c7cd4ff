// Core exports
pub mod controller;
pub mod generator;
pub mod gesture;
pub mod preview;
pub mod random;
pub mod session;
pub mod share;

pub use controller::{SessionController, SwipeTiming};
pub use generator::ProfileGenerator;
pub use gesture::classify_drag;
pub use preview::{preview_metadata, shared_profile, PreviewMetadata, SharedProfileView};
pub use random::{RandomSource, SeededRandom, SourceRng, ThreadRandom};
pub use session::{MatchId, Phase, SessionRules, SwipeSession};
pub use share::{decode_payload, encode_payload, NativeShare, ShareError, ShareLinks, ShareOutcome, SharedPayload, Sharer};
