use serde::{Deserialize, Serialize};

use crate::core::generator::ProfileGenerator;
use crate::core::share::{decode_payload, ShareLinks, SharedPayload};
use crate::models::Profile;

const PREVIEW_DESCRIPTION: &str =
    "You've found your perfect UUID! It's a match made in digital heaven. Share this unique identifier with the world!";
const CARD_TITLE: &str = "Perfect UUID Match - UUIDMatcher";
const CARD_DESCRIPTION: &str = "You've found your perfect UUID! Share this unique identifier with the world!";

pub const PERFECT_MATCH_PHRASES: [&str; 5] = [
    "You've found your perfect UUID! It's like finding a digital soulmate.",
    "This UUID was waiting for you all along. It's a perfect match!",
    "Some UUIDs are meant to be. This one had your name on it!",
    "Out of trillions of possibilities, you found the one. Destiny!",
    "What are the odds? You and this UUID are meant for each other!",
];

/// Link-preview metadata for a shared payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewMetadata {
    pub title: String,
    pub description: String,
    #[serde(rename = "openGraph")]
    pub open_graph: OpenGraph,
    pub twitter: TwitterCard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwitterCard {
    pub card: String,
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
}

/// Page model for someone opening a shared link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedProfileView {
    pub profile: Profile,
    pub phrase: String,
    /// Whether the link carried the full profile or only the identifier
    #[serde(rename = "fullPayload")]
    pub full_payload: bool,
}

/// First eight characters of an identifier, for titles
fn short_identifier(identifier: &str) -> &str {
    match identifier.char_indices().nth(8) {
        Some((idx, _)) => &identifier[..idx],
        None => identifier,
    }
}

/// Build link-preview metadata for a payload path segment
pub fn preview_metadata(links: &ShareLinks, payload: &str) -> PreviewMetadata {
    let decoded = decode_payload(payload);
    let short = short_identifier(decoded.identifier());
    let image = format!("{}/opengraph-image", links.path_for_payload(payload));

    PreviewMetadata {
        title: format!("Perfect UUID Match Found - {}...", short),
        description: PREVIEW_DESCRIPTION.to_string(),
        open_graph: OpenGraph {
            title: CARD_TITLE.to_string(),
            description: CARD_DESCRIPTION.to_string(),
            images: vec![image.clone()],
            kind: "website".to_string(),
        },
        twitter: TwitterCard {
            card: "summary_large_image".to_string(),
            title: CARD_TITLE.to_string(),
            description: CARD_DESCRIPTION.to_string(),
            images: vec![image],
        },
    }
}

/// Resolve a payload into a full card
///
/// An identifier-only payload gets freshly generated metadata around the
/// recovered identifier.
pub fn shared_profile(generator: &ProfileGenerator, payload: &str) -> SharedProfileView {
    let (profile, full_payload) = match decode_payload(payload) {
        SharedPayload::Profile(profile) => (profile, true),
        SharedPayload::Identifier(id) => (generator.generate_with_identifier(id), false),
    };

    SharedProfileView {
        profile,
        phrase: generator.pick(&PERFECT_MATCH_PHRASES).to_string(),
        full_payload,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::SeededRandom;
    use crate::core::share::{encode_payload, fallback_payload, DEFAULT_NAMESPACE};
    use std::sync::Arc;

    fn setup() -> (ShareLinks, ProfileGenerator) {
        let links = ShareLinks::new("https://example.com", DEFAULT_NAMESPACE);
        let generator = ProfileGenerator::new(Arc::new(SeededRandom::new(9)));
        (links, generator)
    }

    #[test]
    fn test_metadata_title_uses_short_identifier() {
        let (links, generator) = setup();
        let profile = generator.generate();
        let payload = encode_payload(&profile);

        let meta = preview_metadata(&links, &payload);
        assert_eq!(meta.title, format!("Perfect UUID Match Found - {}...", &profile.uuid[..8]));
        assert_eq!(meta.open_graph.images, vec![format!("/uuid/{}/opengraph-image", payload)]);
        assert_eq!(meta.twitter.card, "summary_large_image");
    }

    #[test]
    fn test_metadata_for_fallback_payload() {
        let (links, generator) = setup();
        let profile = generator.generate();
        let payload = fallback_payload(&profile.uuid);

        let meta = preview_metadata(&links, &payload);
        assert!(meta.title.contains(&profile.uuid[..8]));
    }

    #[test]
    fn test_short_identifier() {
        assert_eq!(short_identifier("abc"), "abc");
        assert_eq!(short_identifier("0123456789"), "01234567");
    }

    #[test]
    fn test_shared_profile_full_payload() {
        let (_, generator) = setup();
        let profile = generator.generate();

        let view = shared_profile(&generator, &encode_payload(&profile));
        assert!(view.full_payload);
        assert_eq!(view.profile, profile);
        assert!(PERFECT_MATCH_PHRASES.contains(&view.phrase.as_str()));
    }

    #[test]
    fn test_shared_profile_from_identifier() {
        let (_, generator) = setup();
        let id = "3f2b8c1e-9d4a-4b6f-8e21-7c5d0a9f1b3e";

        let view = shared_profile(&generator, &fallback_payload(id));
        assert!(!view.full_payload);
        assert_eq!(view.profile.uuid, id);
    }
}
