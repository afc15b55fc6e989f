use actix_cors::Cors;
use actix_web::middleware::NormalizePath;
use actix_web::{web, App, HttpServer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use livechat_ai_bridge::config::Config;
use livechat_ai_bridge::handlers;
use livechat_ai_bridge::state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,livechat_ai_bridge=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().expect("Failed to load configuration from environment");
    let port = config.port;

    info!("Completion model: {}", config.openai_model);
    info!("LiveChat organization: {}", config.livechat_org_id);

    let app_state = web::Data::new(AppState::new(config).expect("Failed to build HTTP clients"));

    info!("Listening on {}", port);
    HttpServer::new(move || {
        App::new()
            .wrap(NormalizePath::trim())
            .wrap(Cors::permissive())
            .app_data(app_state.clone())
            .route("/", web::get().to(handlers::index))
            .route("/health", web::get().to(handlers::health_check))
            .route(
                "/webhooks/livechat",
                web::post().to(handlers::webhook::livechat),
            )
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
