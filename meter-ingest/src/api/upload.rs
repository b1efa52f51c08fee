//! Meter reading upload endpoint
//!
//! `POST /api/meter-reading-uploads` takes a multipart form whose `file` part
//! is the CSV. Responses:
//! - 200 with `{"successCount": n, "failureCount": m}`
//! - 400 with `csv file required` when the part is missing or not `*.csv`
//! - 500 with an empty body when processing fails

use axum::{
    extract::{
        multipart::{Multipart, MultipartRejection},
        State,
    },
    routing::post,
    Json, Router,
};
use tracing::warn;

use crate::error::{UploadError, UploadResponseResult};
use crate::models::UploadResult;
use crate::services::UploadedFile;
use crate::AppState;

/// Multipart part carrying the CSV
pub const FILE_FIELD: &str = "file";

/// POST /api/meter-reading-uploads
pub async fn upload_meter_readings(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> UploadResponseResult<Json<UploadResult>> {
    let file = match multipart {
        Ok(mut multipart) => read_file_part(&mut multipart).await?,
        Err(rejection) => {
            warn!("Upload request is not multipart: {}", rejection);
            None
        }
    };

    let result = state.pipeline.upload(file).await?;
    Ok(Json(result))
}

/// First part named `file`, if any
async fn read_file_part(multipart: &mut Multipart) -> Result<Option<UploadedFile>, UploadError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        return Ok(Some(UploadedFile::new(file_name, bytes.to_vec())));
    }

    Ok(None)
}

/// Build upload routes
pub fn upload_routes() -> Router<AppState> {
    Router::new().route("/api/meter-reading-uploads", post(upload_meter_readings))
}
