use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier profile shown on a swipe card
///
/// Created only by the generator (or recovered from a share link) and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub uuid: String,
    pub age: u8,
    pub version: String,
    #[serde(rename = "funFact")]
    pub fun_fact: String,
    #[serde(rename = "starSign", default)]
    pub star_sign: String,
}

/// Direction of a swipe gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of a swipe session as seen by the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionView {
    #[serde(rename = "currentProfile")]
    pub current_profile: Option<Profile>,
    #[serde(rename = "swipeDirection")]
    pub swipe_direction: Option<Direction>,
    pub locked: bool,
    #[serde(rename = "showMatch")]
    pub show_match: bool,
    #[serde(rename = "matchedProfile")]
    pub matched_profile: Option<Profile>,
    pub cursor: usize,
    pub remaining: usize,
    pub total: usize,
}
