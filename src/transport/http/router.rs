use crate::domain::model::{DeviceClass, PassReference, RsvpDisplay, RsvpRecord, RsvpResponse};
use crate::transport::http::handlers::{display, health, rsvp};
use crate::transport::http::types::{ApiResponse, SubmitRsvpRequest};
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        rsvp::submit_rsvp_handler,
        rsvp::get_rsvp_by_phone_handler,
        display::get_displays_handler
    ),
    components(schemas(
        ApiResponse,
        SubmitRsvpRequest,
        RsvpRecord,
        RsvpResponse,
        DeviceClass,
        PassReference,
        RsvpDisplay
    ))
)]
#[allow(dead_code)]
pub struct ApiDoc;

pub fn create_router(app_state: crate::transport::http::types::AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route("/api/rsvps", post(rsvp::submit_rsvp_handler))
        .route("/api/rsvps/:phone", get(rsvp::get_rsvp_by_phone_handler))
        .route("/api/displays", get(display::get_displays_handler))
        .with_state(app_state)
}
