//! Supabase Storage backend (REST API).

use std::time::Duration;

use async_trait::async_trait;
use axum::body::Bytes;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};

use super::{check_key, ObjectStorage, StorageError};

/// HTTP timeout for a single storage request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Writes objects to a Supabase Storage bucket with the service-role key.
pub struct SupabaseStorage {
    client: reqwest::Client,
    /// `{SUPABASE_URL}/storage/v1/object/{bucket}`
    object_base: String,
    service_key: String,
}

impl SupabaseStorage {
    pub fn new(url: &str, service_key: &str, bucket: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            object_base: format!("{}/storage/v1/object/{bucket}", url.trim_end_matches('/')),
            service_key: service_key.to_string(),
        }
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/{key}", self.object_base)
    }

    async fn check_status(response: reqwest::Response) -> Result<(), StorageError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(StorageError::HttpStatus {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl ObjectStorage for SupabaseStorage {
    async fn put(&self, key: &str, content_type: &str, data: Bytes) -> Result<(), StorageError> {
        check_key(key)?;
        let response = self
            .client
            .post(self.object_url(key))
            .header(AUTHORIZATION, format!("Bearer {}", self.service_key))
            .header("apikey", &self.service_key)
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(data)
            .send()
            .await?;
        Self::check_status(response).await?;
        tracing::debug!(key, "Stored object in Supabase Storage");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        check_key(key)?;
        let response = self
            .client
            .delete(self.object_url(key))
            .header(AUTHORIZATION, format!("Bearer {}", self.service_key))
            .header("apikey", &self.service_key)
            .send()
            .await?;
        match Self::check_status(response).await {
            Err(StorageError::HttpStatus { status: 404, .. }) => {
                tracing::warn!(key, "Object already gone");
                Ok(())
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_url_joins_base_bucket_and_key() {
        let storage = SupabaseStorage::new("https://abc.supabase.co/", "key", "uploads");
        assert_eq!(
            storage.object_url("documents/1/a.pdf"),
            "https://abc.supabase.co/storage/v1/object/uploads/documents/1/a.pdf"
        );
    }

    #[test]
    fn http_status_error_display() {
        let err = StorageError::HttpStatus {
            status: 409,
            body: "Duplicate".into(),
        };
        assert_eq!(err.to_string(), "Storage returned HTTP 409: Duplicate");
    }
}
