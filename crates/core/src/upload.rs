//! Upload validation and object-storage path generation.
//!
//! The storage key is derived from the owner and a fresh UUID. The client's
//! filename is kept only as display metadata.

use uuid::Uuid;

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum avatar size (5 MiB).
pub const MAX_AVATAR_BYTES: usize = 5 * 1024 * 1024;

/// Maximum document size (10 MiB).
pub const MAX_DOCUMENT_BYTES: usize = 10 * 1024 * 1024;

/// Maximum stored length of the client-supplied filename.
pub const MAX_ORIGINAL_NAME_CHARS: usize = 255;

const AVATAR_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];
const DOCUMENT_TYPES: &[&str] = &["application/pdf"];

text_enum! {
    /// What an uploaded file is for (`stored_files.purpose`).
    UploadPurpose("upload purpose") {
        Avatar => "avatar",
        Document => "document",
    }
}

impl UploadPurpose {
    pub fn allowed_content_types(self) -> &'static [&'static str] {
        match self {
            UploadPurpose::Avatar => AVATAR_TYPES,
            UploadPurpose::Document => DOCUMENT_TYPES,
        }
    }

    pub fn max_bytes(self) -> usize {
        match self {
            UploadPurpose::Avatar => MAX_AVATAR_BYTES,
            UploadPurpose::Document => MAX_DOCUMENT_BYTES,
        }
    }

    /// Top-level folder inside the bucket.
    pub fn folder(self) -> &'static str {
        match self {
            UploadPurpose::Avatar => "avatars",
            UploadPurpose::Document => "documents",
        }
    }
}

/// File extension for an accepted content type.
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        "application/pdf" => Some("pdf"),
        _ => None,
    }
}

/// Validate an upload and return the extension to store it under.
pub fn validate_upload(
    purpose: UploadPurpose,
    content_type: &str,
    size: usize,
) -> Result<&'static str, CoreError> {
    if size == 0 {
        return Err(CoreError::Validation("Uploaded file is empty".into()));
    }
    if size > purpose.max_bytes() {
        return Err(CoreError::Validation(format!(
            "File exceeds the {} MiB limit for {purpose} uploads",
            purpose.max_bytes() / (1024 * 1024)
        )));
    }
    if !purpose.allowed_content_types().contains(&content_type) {
        return Err(CoreError::Validation(format!(
            "Unsupported content type '{content_type}' for {purpose} uploads. Allowed: {}",
            purpose.allowed_content_types().join(", ")
        )));
    }
    extension_for(content_type).ok_or_else(|| {
        CoreError::Internal(format!("No extension mapping for '{content_type}'"))
    })
}

/// Object key: `<folder>/<owner_id>/<uuid>.<ext>`.
pub fn storage_path(purpose: UploadPurpose, owner_id: DbId, ext: &str) -> String {
    format!("{}/{owner_id}/{}.{ext}", purpose.folder(), Uuid::new_v4())
}

/// Strip directory components and cap length of a client filename.
pub fn sanitize_original_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or("").trim();
    let base = if base.is_empty() { "upload" } else { base };
    base.chars().take(MAX_ORIGINAL_NAME_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_avatar_accepted() {
        assert_eq!(
            validate_upload(UploadPurpose::Avatar, "image/png", 1024).unwrap(),
            "png"
        );
    }

    #[test]
    fn png_document_rejected() {
        let err = validate_upload(UploadPurpose::Document, "image/png", 1024).unwrap_err();
        assert!(err.to_string().contains("Unsupported content type"));
    }

    #[test]
    fn pdf_document_accepted() {
        assert_eq!(
            validate_upload(UploadPurpose::Document, "application/pdf", 2048).unwrap(),
            "pdf"
        );
    }

    #[test]
    fn empty_file_rejected() {
        assert!(validate_upload(UploadPurpose::Avatar, "image/png", 0).is_err());
    }

    #[test]
    fn size_limits_are_per_purpose() {
        assert!(validate_upload(UploadPurpose::Avatar, "image/jpeg", MAX_AVATAR_BYTES).is_ok());
        assert!(
            validate_upload(UploadPurpose::Avatar, "image/jpeg", MAX_AVATAR_BYTES + 1).is_err()
        );
        assert!(validate_upload(
            UploadPurpose::Document,
            "application/pdf",
            MAX_AVATAR_BYTES + 1
        )
        .is_ok());
    }

    #[test]
    fn storage_path_layout() {
        let path = storage_path(UploadPurpose::Document, 42, "pdf");
        assert!(path.starts_with("documents/42/"));
        assert!(path.ends_with(".pdf"));
        // documents/42/<36-char uuid>.pdf
        assert_eq!(path.len(), "documents/42/".len() + 36 + ".pdf".len());
    }

    #[test]
    fn storage_paths_are_unique() {
        let a = storage_path(UploadPurpose::Avatar, 1, "png");
        let b = storage_path(UploadPurpose::Avatar, 1, "png");
        assert_ne!(a, b);
    }

    #[test]
    fn original_name_loses_directories() {
        assert_eq!(sanitize_original_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_original_name("C:\\docs\\請求書.pdf"), "請求書.pdf");
        assert_eq!(sanitize_original_name(""), "upload");
    }
}
