use actix_web::{web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

use crate::core::classify_drag;
use crate::core::generator::ProfileGenerator;
use crate::core::share::{ShareOutcome, SHARE_TEXT, SHARE_TITLE};
use crate::models::{
    CloseMatchResponse, CreateSessionRequest, DragRequest, HealthResponse, SessionResponse,
    ShareResponse, SwipeRequest, SwipeResponse,
};
use crate::routes::ApiError;
use crate::services::SessionStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    pub generator: ProfileGenerator,
}

/// Configure all session routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/sessions", web::post().to(create_session))
        .route("/sessions/{id}", web::get().to(get_session))
        .route("/sessions/{id}", web::delete().to(delete_session))
        .route("/sessions/{id}/swipe", web::post().to(swipe))
        .route("/sessions/{id}/drag", web::post().to(drag))
        .route("/sessions/{id}/share", web::post().to(share_current))
        .route("/sessions/{id}/match/share", web::post().to(share_match))
        .route("/sessions/{id}/match/close", web::post().to(close_match));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        sessions: state.sessions.len(),
        timestamp: chrono::Utc::now(),
    })
}

/// Start a swipe session
///
/// POST /api/v1/sessions
///
/// Request body (optional, an empty body uses the defaults):
/// ```json
/// { "batchSize": 5 }
/// ```
async fn create_session(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let req = if body.iter().all(u8::is_ascii_whitespace) {
        CreateSessionRequest::default()
    } else {
        serde_json::from_slice::<CreateSessionRequest>(&body)?
    };
    req.validate()?;

    let controller = state.sessions.create(req.batch_size).await;

    Ok(HttpResponse::Created().json(SessionResponse {
        session_id: controller.id().to_string(),
        view: controller.view(),
    }))
}

async fn get_session(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let controller = state.sessions.get(&id).await?;

    Ok(HttpResponse::Ok().json(SessionResponse {
        session_id: controller.id().to_string(),
        view: controller.view(),
    }))
}

async fn delete_session(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    state.sessions.remove(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Swipe the current card
///
/// POST /api/v1/sessions/{id}/swipe
///
/// Request body:
/// ```json
/// { "direction": "left|right" }
/// ```
async fn swipe(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    req: web::Json<SwipeRequest>,
) -> Result<HttpResponse, ApiError> {
    let controller = state.sessions.get(&id).await?;
    let accepted = controller.handle_swipe(req.direction);

    Ok(HttpResponse::Ok().json(SwipeResponse {
        accepted,
        view: controller.view(),
    }))
}

/// Classify a finished drag and swipe if it qualifies
///
/// POST /api/v1/sessions/{id}/drag
///
/// Request body:
/// ```json
/// { "offsetX": 120.0, "velocityX": 300.0 }
/// ```
async fn drag(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    req: web::Json<DragRequest>,
) -> Result<HttpResponse, ApiError> {
    let controller = state.sessions.get(&id).await?;

    let accepted = match classify_drag(req.offset_x, req.velocity_x) {
        Some(direction) => controller.handle_swipe(direction),
        None => {
            tracing::trace!("Drag of {:.0}px below swipe thresholds", req.offset_x);
            false
        }
    };

    Ok(HttpResponse::Ok().json(SwipeResponse {
        accepted,
        view: controller.view(),
    }))
}

fn share_response(outcome: ShareOutcome) -> HttpResponse {
    HttpResponse::Ok().json(ShareResponse {
        outcome,
        title: SHARE_TITLE.to_string(),
        text: SHARE_TEXT.to_string(),
    })
}

async fn share_current(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let controller = state.sessions.get(&id).await?;
    let outcome = controller
        .handle_share()
        .ok_or(ApiError::NothingToShare("no profile on top of the stack"))?;

    Ok(share_response(outcome))
}

async fn share_match(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let controller = state.sessions.get(&id).await?;
    let outcome = controller
        .handle_share_match()
        .ok_or(ApiError::NothingToShare("no active match"))?;

    Ok(share_response(outcome))
}

async fn close_match(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let controller = state.sessions.get(&id).await?;
    let closed = controller.handle_close_match();

    Ok(HttpResponse::Ok().json(CloseMatchResponse {
        closed,
        view: controller.view(),
    }))
}
