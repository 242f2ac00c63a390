//! Handler for `POST /uploads/{purpose}`: avatars and PDF documents.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use cfomatch_core::activity::{self, entity};
use cfomatch_core::upload::{sanitize_original_name, storage_path, validate_upload, UploadPurpose};
use cfomatch_db::models::activity::CreateActivity;
use cfomatch_db::models::stored_file::{CreateStoredFile, StoredFile};
use cfomatch_db::repositories::{ProfileRepo, StoredFileRepo};
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::extract::{AppMultipart, AppPath};
use crate::handlers::activities;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/uploads/{purpose}
///
/// Accepts a multipart form with a required `file` field. The file is
/// validated against the purpose's type and size limits, written to object
/// storage under a server-generated key, and recorded in `stored_files`.
/// Uploading an avatar also points the caller's profile at it.
pub async fn upload_file(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(purpose): AppPath<String>,
    AppMultipart(mut multipart): AppMultipart,
) -> AppResult<(StatusCode, Json<DataResponse<StoredFile>>)> {
    let purpose: UploadPurpose = purpose.parse()?;

    let mut file_data = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let original_name = sanitize_original_name(field.file_name().unwrap_or(""));
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field.bytes().await?;
        file_data = Some((original_name, content_type, data));
    }

    let (original_name, content_type, data) =
        file_data.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;

    let ext = validate_upload(purpose, &content_type, data.len())?;
    let key = storage_path(purpose, user.user_id, ext);
    let size_bytes = data.len() as i64;

    state
        .storage
        .put(&key, &content_type, data)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;

    let stored = match StoredFileRepo::create(
        &state.pool,
        &CreateStoredFile {
            owner_id: user.user_id,
            purpose,
            storage_path: key.clone(),
            content_type,
            size_bytes,
            original_name,
        },
    )
    .await
    {
        Ok(stored) => stored,
        Err(e) => {
            if let Err(cleanup) = state.storage.delete(&key).await {
                tracing::warn!(error = %cleanup, key = %key, "Failed to remove orphaned upload");
            }
            return Err(e.into());
        }
    };

    if purpose == UploadPurpose::Avatar {
        ProfileRepo::set_avatar(&state.pool, user.user_id, &stored.storage_path).await?;
    }

    tracing::info!(
        file_id = stored.id,
        user_id = user.user_id,
        purpose = %purpose,
        size_bytes,
        "File uploaded"
    );
    activities::record(
        &state,
        CreateActivity::new(user.user_id, activity::FILE_UPLOADED)
            .entity(entity::FILE, stored.id)
            .metadata(json!({ "purpose": purpose })),
    )
    .await;

    Ok((StatusCode::CREATED, Json(DataResponse::new(stored))))
}
