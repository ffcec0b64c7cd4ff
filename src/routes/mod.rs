// Route exports
pub mod error;
pub mod sessions;
pub mod shared;

use actix_web::web;

pub use error::ApiError;
pub use sessions::AppState;

/// Register the session API under `/api/v1` and shared-link pages under `/<namespace>`
pub fn configure_routes(cfg: &mut web::ServiceConfig, namespace: &str) {
    cfg.service(
        web::scope("/api/v1")
            .configure(sessions::configure),
    )
    .service(
        web::scope(&format!("/{}", namespace))
            .configure(shared::configure),
    );
}
