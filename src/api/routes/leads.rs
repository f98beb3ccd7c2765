//! Lead handlers: email-gated download and CSV export.

use super::{DownloadRequest, DownloadResponse};
use crate::api::AppState;
use crate::error::Result;
use crate::gateway::export::CSV_FILE_NAME;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::header,
    response::IntoResponse,
};

/// POST /api/download - Record a lead and email the business case
#[utoipa::path(
    post,
    path = "/api/download",
    tag = "leads",
    request_body = DownloadRequest,
    responses(
        (status = 200, description = "Lead recorded and email sent", body = DownloadResponse),
        (status = 400, description = "Invalid email or unknown business case", body = crate::error::ApiError),
        (status = 500, description = "Lead could not be recorded or email could not be sent", body = crate::error::ApiError)
    )
)]
pub async fn download_business_case(
    State(state): State<AppState>,
    payload: std::result::Result<Json<DownloadRequest>, JsonRejection>,
) -> Result<Json<DownloadResponse>> {
    // An unreadable body is treated like an empty one and fails validation
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "unreadable download request body");
            DownloadRequest::default()
        }
    };

    state
        .gateway
        .handle_download(&request.email, &request.business_case_id)
        .await?;

    Ok(Json(DownloadResponse { success: true }))
}

/// GET /api/leads - Export all leads as CSV
#[utoipa::path(
    get,
    path = "/api/leads",
    tag = "leads",
    responses(
        (status = 200, description = "All leads as a CSV attachment", body = String, content_type = "text/csv")
    )
)]
pub async fn export_leads(State(state): State<AppState>) -> impl IntoResponse {
    let csv = state.gateway.export_csv().await;

    (
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={CSV_FILE_NAME}"),
            ),
        ],
        csv,
    )
}
