use serde::{Deserialize, Serialize};

use crate::core::share::ShareOutcome;
use crate::models::domain::SessionView;

/// Response carrying a session snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub view: SessionView,
}

/// Response to a swipe or drag intent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwipeResponse {
    /// `false` when the session was locked or the drag was too short
    pub accepted: bool,
    pub view: SessionView,
}

/// Response to a share intent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareResponse {
    #[serde(flatten)]
    pub outcome: ShareOutcome,
    pub title: String,
    pub text: String,
}

/// Response to closing a match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloseMatchResponse {
    pub closed: bool,
    pub view: SessionView,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub sessions: u64,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
