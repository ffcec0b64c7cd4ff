use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::Direction;

/// Request to start a new swipe session
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateSessionRequest {
    /// Overrides the configured batch size for this session
    #[validate(range(min = 1, max = 50))]
    #[serde(alias = "batch_size", rename = "batchSize", default)]
    pub batch_size: Option<usize>,
}

/// Request to swipe the current card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwipeRequest {
    pub direction: Direction,
}

/// Raw end-of-drag measurements from a card gesture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DragRequest {
    #[serde(alias = "offset_x", rename = "offsetX")]
    pub offset_x: f64,
    #[serde(alias = "velocity_x", rename = "velocityX", default)]
    pub velocity_x: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_size_range() {
        let ok = CreateSessionRequest { batch_size: Some(5) };
        assert!(ok.validate().is_ok());

        let zero = CreateSessionRequest { batch_size: Some(0) };
        assert!(zero.validate().is_err());

        let unset = CreateSessionRequest::default();
        assert!(unset.validate().is_ok());
    }

    #[test]
    fn test_drag_request_aliases() {
        let req: DragRequest = serde_json::from_str(r#"{"offset_x": 80.0}"#).unwrap();
        assert_eq!(req.offset_x, 80.0);
        assert_eq!(req.velocity_x, 0.0);
    }
}
