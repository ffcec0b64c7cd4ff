//! Share links and the share action.
//!
//! A link has the form `<origin>/<namespace>/<payload>`. The payload is either
//! the whole profile as URL-safe base64 JSON, or, when that cannot be built,
//! the bare identifier with `-` swapped for `_`. The identifier alphabet is
//! `[0-9a-f-]`, so `_` never collides and the swap reverses cleanly.

use std::sync::Arc;

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, URL_SAFE_NO_PAD};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Profile;

pub const DEFAULT_NAMESPACE: &str = "uuid";
pub const SHARE_TITLE: &str = "My Perfect UUID Match";
pub const SHARE_TEXT: &str = "I found my perfect UUID match! Check it out:";
pub const SHARE_FAILED_ALERT: &str = "Sharing failed. Please try again or share the URL manually.";

/// Longest full payload we are willing to put in a path segment
pub const MAX_PAYLOAD_LEN: usize = 2048;

const SEPARATOR: char = '-';
const SUBSTITUTE: char = '_';

const PADDING_INDIFFERENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, PADDING_INDIFFERENT);
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, PADDING_INDIFFERENT);

/// Errors raised while sharing
#[derive(Debug, Error)]
pub enum ShareError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Payload too long: {0} bytes")]
    PayloadTooLong(usize),

    #[error("Share was cancelled")]
    Cancelled,
}

/// Encode the full profile as a path-safe payload
pub fn encode_full_payload(profile: &Profile) -> Result<String, ShareError> {
    let json = serde_json::to_vec(profile)?;
    let encoded = URL_SAFE_NO_PAD.encode(json);

    if encoded.len() > MAX_PAYLOAD_LEN {
        return Err(ShareError::PayloadTooLong(encoded.len()));
    }

    Ok(encoded)
}

/// Identifier-only payload
pub fn fallback_payload(identifier: &str) -> String {
    identifier.replace(SEPARATOR, &SUBSTITUTE.to_string())
}

/// Encode a profile for a share link, falling back to the identifier alone
pub fn encode_payload(profile: &Profile) -> String {
    match encode_full_payload(profile) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::debug!("Full share payload unavailable for {} ({}), using identifier", profile.uuid, e);
            fallback_payload(&profile.uuid)
        }
    }
}

/// What a share link payload turned out to contain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SharedPayload {
    Profile(Profile),
    Identifier(String),
}

impl SharedPayload {
    /// Identifier carried by the payload, whichever form it took
    pub fn identifier(&self) -> &str {
        match self {
            SharedPayload::Profile(profile) => &profile.uuid,
            SharedPayload::Identifier(id) => id,
        }
    }
}

/// Reverse [`encode_payload`]
///
/// Never fails: anything that is not base64 JSON of a profile is read as an
/// identifier payload.
pub fn decode_payload(segment: &str) -> SharedPayload {
    // Path extractors decode everything except `%2F`, which a standard-base64
    // `/` arrives as. Our own payloads contain no `%`, so this is a no-op for them.
    let segment = urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string());

    let bytes = URL_SAFE_LENIENT
        .decode(&segment)
        .or_else(|_| STANDARD_LENIENT.decode(&segment));

    if let Ok(bytes) = bytes {
        if let Ok(profile) = serde_json::from_slice::<Profile>(&bytes) {
            return SharedPayload::Profile(profile);
        }
    }

    SharedPayload::Identifier(segment.replace(SUBSTITUTE, &SEPARATOR.to_string()))
}

/// Builds share links under a fixed origin and namespace
#[derive(Debug, Clone)]
pub struct ShareLinks {
    origin: String,
    namespace: String,
}

impl ShareLinks {
    pub fn new(origin: impl Into<String>, namespace: impl Into<String>) -> Self {
        let origin = origin.into();
        let namespace = namespace.into();
        Self {
            origin: origin.trim_end_matches('/').to_string(),
            namespace: namespace.trim_matches('/').to_string(),
        }
    }

    /// `/<namespace>/<payload>`
    pub fn path(&self, profile: &Profile) -> String {
        self.path_for_payload(&encode_payload(profile))
    }

    pub fn path_for_payload(&self, payload: &str) -> String {
        format!("/{}/{}", self.namespace, payload)
    }

    /// Absolute link for a profile
    pub fn url(&self, profile: &Profile) -> String {
        format!("{}{}", self.origin, self.path(profile))
    }
}

/// Content handed to a native share sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareRequest {
    pub title: String,
    pub text: String,
    pub url: String,
}

/// Platform share capability
pub trait NativeShare: Send + Sync {
    fn share(&self, request: &ShareRequest) -> Result<(), ShareError>;
}

/// Result of a share action, for the presentation layer to act on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ShareOutcome {
    /// Handed to the native share sheet
    Shared { url: String },
    /// Native share failed; show a blocking alert
    Alert { message: String, url: String },
    /// No native share; open the link in a new context
    OpenLink { url: String },
}

impl ShareOutcome {
    pub fn url(&self) -> &str {
        match self {
            ShareOutcome::Shared { url }
            | ShareOutcome::Alert { url, .. }
            | ShareOutcome::OpenLink { url } => url,
        }
    }
}

/// Performs the share action for a profile
#[derive(Clone)]
pub struct Sharer {
    links: ShareLinks,
    native: Option<Arc<dyn NativeShare>>,
}

impl Sharer {
    pub fn new(links: ShareLinks) -> Self {
        Self { links, native: None }
    }

    pub fn with_native(links: ShareLinks, native: Arc<dyn NativeShare>) -> Self {
        Self {
            links,
            native: Some(native),
        }
    }

    pub fn links(&self) -> &ShareLinks {
        &self.links
    }

    /// Share a profile
    ///
    /// There is no clipboard fallback: a failed native share becomes an alert.
    pub fn share(&self, profile: &Profile) -> ShareOutcome {
        let url = self.links.url(profile);

        let Some(native) = &self.native else {
            return ShareOutcome::OpenLink { url };
        };

        let request = ShareRequest {
            title: SHARE_TITLE.to_string(),
            text: SHARE_TEXT.to_string(),
            url: url.clone(),
        };

        match native.share(&request) {
            Ok(()) => ShareOutcome::Shared { url },
            Err(e) => {
                tracing::warn!("Error sharing UUID {}: {}", profile.uuid, e);
                ShareOutcome::Alert {
                    message: SHARE_FAILED_ALERT.to_string(),
                    url,
                }
            }
        }
    }
}

impl std::fmt::Debug for Sharer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sharer")
            .field("links", &self.links)
            .field("native", &self.native.is_some())
            .finish()
    }
}
