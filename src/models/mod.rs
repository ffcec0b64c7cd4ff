// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Direction, Profile, SessionView};
pub use requests::{CreateSessionRequest, DragRequest, SwipeRequest};
pub use responses::{CloseMatchResponse, ErrorResponse, HealthResponse, SessionResponse, ShareResponse, SwipeResponse};
