use actix_cors::Cors;
use actix_web::{error, middleware, web, App, HttpResponse, HttpServer};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use uuid_matcher::config::Settings;
use uuid_matcher::core::{ProfileGenerator, RandomSource, ShareLinks, Sharer, ThreadRandom};
use uuid_matcher::models::ErrorResponse;
use uuid_matcher::routes::{self, AppState};
use uuid_matcher::services::SessionStore;

/// Handle JSON payload errors
fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    let body = ErrorResponse {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    };
    error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration before logging so the level can come from it
    let settings = Settings::load();

    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| {
        settings
            .as_ref()
            .map(|s| s.logging.level.clone())
            .unwrap_or_else(|_| "info".to_string())
    });
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| {
        settings
            .as_ref()
            .map(|s| s.logging.format.clone())
            .unwrap_or_else(|_| "compact".to_string())
    });

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }

    info!("Starting UUID Matcher...");

    let settings = match settings {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    info!("Configuration loaded successfully");

    let rng: Arc<dyn RandomSource> = Arc::new(ThreadRandom);
    let links = ShareLinks::new(settings.share.origin.clone(), settings.share.namespace.clone());
    let rules = settings.session.rules();
    let timing = settings.session.timing();

    let sessions = SessionStore::new(
        rng.clone(),
        rules,
        timing,
        Sharer::new(links),
        settings.registry.max_sessions,
        settings.registry.idle_secs,
    );

    info!(
        "Session rules: batch {}, refill at <= {}, match probability {}",
        rules.batch_size, rules.refill_threshold, rules.match_probability
    );

    let app_state = AppState {
        sessions,
        generator: ProfileGenerator::new(rng),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);
    let namespace = settings.share.namespace.clone();

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();
        let namespace = namespace.clone();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(move |cfg| routes::configure_routes(cfg, &namespace))
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
