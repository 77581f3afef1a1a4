use crate::app::submission::SubmissionError;
use crate::transport::http::types::{json_422, ApiResponse, AppState, SubmitRsvpRequest};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    post,
    path = "/api/rsvps",
    request_body = SubmitRsvpRequest,
    responses(
        (status = 200, description = "RSVP recorded (wallet_pass may be null)", body = ApiResponse),
        (status = 400, description = "Field validation failed", body = ApiResponse),
        (status = 403, description = "Token verification failed", body = ApiResponse),
        (status = 409, description = "An RSVP already exists for this phone number", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn submit_rsvp_handler(
    State(state): State<AppState>,
    request: Result<Json<SubmitRsvpRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "{\"phone_number\": ..., \"response\": ...}").into_response(),
    };

    if let Err(msg) = request.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse {
                success: false,
                data: None,
                error: Some(msg),
            }),
        )
            .into_response();
    }

    let (input, token) = request.into_parts();
    match state.submissions.submit(input, &token).await {
        Ok(result) => {
            let response_data = serde_json::json!({
                "rsvp": result.rsvp,
                "wallet_pass": result.wallet_pass,
            });
            (
                StatusCode::OK,
                Json(ApiResponse {
                    success: true,
                    data: Some(response_data),
                    error: None,
                }),
            )
                .into_response()
        }
        Err(e) => {
            let status = match &e {
                SubmissionError::VerificationFailed => StatusCode::FORBIDDEN,
                SubmissionError::DuplicateSubmission => StatusCode::CONFLICT,
                SubmissionError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (
                status,
                Json(ApiResponse {
                    success: false,
                    data: None,
                    error: Some(e.to_string()),
                }),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/rsvps/{phone}",
    params(
        ("phone" = String, Path, description = "10-digit phone number")
    ),
    responses(
        (status = 200, description = "RSVP found", body = ApiResponse),
        (status = 404, description = "No RSVP for this phone number", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn get_rsvp_by_phone_handler(
    State(state): State<AppState>,
    Path(phone): Path<String>,
) -> impl IntoResponse {
    match state.store.find_by_phone(&phone).await {
        Ok(Some(record)) => (
            StatusCode::OK,
            Json(ApiResponse {
                success: true,
                data: Some(serde_json::json!({ "rsvp": record })),
                error: None,
            }),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse {
                success: false,
                data: None,
                error: Some("No RSVP found for this phone number".to_string()),
            }),
        )
            .into_response(),
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
