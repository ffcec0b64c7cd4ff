use actix_web::{web, HttpResponse, Responder};

use crate::core::preview::{preview_metadata, shared_profile};
use crate::routes::AppState;

/// Configure shared-link routes (mounted under the share namespace)
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/{payload}", web::get().to(shared_page))
        .route("/{payload}/metadata", web::get().to(shared_metadata));
}

/// Page model for an opened share link
///
/// GET /uuid/{payload}
async fn shared_page(state: web::Data<AppState>, payload: web::Path<String>) -> impl Responder {
    let view = shared_profile(&state.generator, &payload);
    tracing::debug!("Opened shared link for {} (full payload: {})", view.profile.uuid, view.full_payload);
    HttpResponse::Ok().json(view)
}

/// Link-preview metadata for an opened share link
///
/// GET /uuid/{payload}/metadata
async fn shared_metadata(state: web::Data<AppState>, payload: web::Path<String>) -> impl Responder {
    HttpResponse::Ok().json(preview_metadata(state.sessions.sharer().links(), &payload))
}
