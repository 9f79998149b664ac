//! Activity file uploads.
//!
//! Uploads go to the fixed `uploads` endpoint as a multipart body with
//! three fields: `activity_type`, `file`, and `data_type`. The API signals
//! acceptance with HTTP 201; anything else carries an error `message`.

use std::path::Path;

use reqwest::multipart;
use tracing::info;

use crate::config::UPLOADS_ENDPOINT;
use crate::error::{Error, Result};
use crate::transport::ApiClient;

/// Upload a pre-generated activity file.
///
/// Reads the file from disk and posts it along with the activity and data
/// type strings (e.g. `"ride"`, `"gpx"`). Returns the decoded upload status
/// body on success.
///
/// # Errors
///
/// - [`Error::UploadRejected`] with the server's message on any non-201
/// - [`Error::AuthorizationExpired`] if the API rejects the token
/// - [`Error::Io`] if the local file cannot be read
pub async fn upload_activity(
    http: &ApiClient,
    path: &Path,
    activity_type: &str,
    data_type: &str,
) -> Result<serde_json::Value> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "activity".to_string());

    let file_part = multipart::Part::bytes(bytes)
        .file_name(file_name)
        .mime_str("application/xml")
        .map_err(Error::Network)?;

    let form = multipart::Form::new()
        .text("activity_type", activity_type.to_string())
        .part("file", file_part)
        .text("data_type", data_type.to_string());

    let (status, body) = http.post_multipart(UPLOADS_ENDPOINT, form).await?;

    // 201 - CREATED
    if status.as_u16() != 201 {
        let message = body
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("upload failed")
            .to_string();
        return Err(Error::UploadRejected { message });
    }

    info!(activity_type, data_type, "Activity uploaded");
    Ok(body)
}
