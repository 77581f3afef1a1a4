use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use event_rsvp_service::infra::config;
use event_rsvp_service::infra::passninja::PassNinjaIssuer;
use event_rsvp_service::infra::recaptcha::RecaptchaVerifier;
use event_rsvp_service::transport;
use event_rsvp_service::{PostgresRsvpStore, ResponseStore, SubmissionService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("connecting to database");
    let store: Arc<dyn ResponseStore> = Arc::new(PostgresRsvpStore::new().await?);

    let verifier = Arc::new(RecaptchaVerifier::from_env());
    if config::recaptcha_secret().is_none() {
        tracing::warn!("RECAPTCHA_SECRET_KEY is not set; all submissions will be rejected");
    }
    let issuer = Arc::new(PassNinjaIssuer::from_env());

    let submissions = Arc::new(SubmissionService::new(
        store.clone(),
        verifier,
        issuer,
        config::event_details(),
    ));

    let app_state = transport::http::AppState {
        submissions,
        store,
    };

    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);
    let app = transport::http::create_router(app_state)
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()),
        )
        .layer(cors);

    let addr = config::bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "RSVP service listening");

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received");
        }
    }

    Ok(())
}
