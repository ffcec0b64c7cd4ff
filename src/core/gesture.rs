use crate::models::Direction;

/// Minimum horizontal drag distance (px) that counts as a swipe
pub const SWIPE_OFFSET_THRESHOLD: f64 = 50.0;

/// Minimum horizontal release velocity (px/s) that counts as a swipe
pub const SWIPE_VELOCITY_THRESHOLD: f64 = 500.0;

/// Classify the end of a card drag
///
/// A short but fast flick still counts. Returns `None` when neither threshold
/// is crossed, in which case the card snaps back and no intent is issued.
pub fn classify_drag(offset_x: f64, velocity_x: f64) -> Option<Direction> {
    let swiped = offset_x.abs() > SWIPE_OFFSET_THRESHOLD
        || velocity_x.abs() > SWIPE_VELOCITY_THRESHOLD;

    if !swiped {
        return None;
    }

    if offset_x > 0.0 {
        Some(Direction::Right)
    } else {
        Some(Direction::Left)
    }
}
