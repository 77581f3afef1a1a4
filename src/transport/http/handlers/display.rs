use crate::domain::model::RsvpDisplay;
use crate::transport::http::types::{ApiResponse, AppState};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/api/displays",
    responses(
        (status = 200, description = "Public roster of respondents", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn get_displays_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.list_all().await {
        Ok(records) => {
            let displays: Vec<RsvpDisplay> = records.iter().map(RsvpDisplay::from).collect();
            (
                StatusCode::OK,
                Json(ApiResponse {
                    success: true,
                    data: Some(serde_json::json!({ "displays": displays })),
                    error: None,
                }),
            )
                .into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse {
                success: false,
                data: None,
                error: Some(e.to_string()),
            }),
        )
            .into_response(),
    }
}
