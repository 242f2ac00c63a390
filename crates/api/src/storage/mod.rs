//! Object storage for uploaded files.
//!
//! Handlers only see [`ObjectStorage`]; the backend is chosen at startup
//! from `STORAGE_BACKEND`.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Bytes;

pub mod local;
pub mod supabase;

pub use local::LocalStorage;
pub use supabase::SupabaseStorage;

/// Errors raised by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote store answered with a non-2xx status.
    #[error("Storage returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Invalid object key: {0}")]
    InvalidKey(String),
}

/// A flat key/value store for file bodies.
///
/// Keys are relative, `/`-separated paths such as
/// `documents/42/<uuid>.pdf`.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `data` under `key`. Fails if the key already exists.
    async fn put(&self, key: &str, content_type: &str, data: Bytes) -> Result<(), StorageError>;

    /// Remove the object at `key`. Missing objects are not an error.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}

/// Which storage backend to use, loaded from the environment.
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// Files under a directory on the local filesystem.
    Local { root: PathBuf },
    /// Supabase Storage over its REST API.
    Supabase {
        url: String,
        service_key: String,
        bucket: String,
    },
}

impl StorageConfig {
    /// Load storage configuration from environment variables.
    ///
    /// | Env Var                | Required             | Default   |
    /// |------------------------|----------------------|-----------|
    /// | `STORAGE_BACKEND`      | no                   | `local`   |
    /// | `STORAGE_LOCAL_ROOT`   | no                   | `storage` |
    /// | `SUPABASE_URL`         | when `supabase`      | --        |
    /// | `SUPABASE_SERVICE_KEY` | when `supabase`      | --        |
    /// | `STORAGE_BUCKET`       | no                   | `uploads` |
    ///
    /// # Panics
    ///
    /// Panics on an unknown backend or missing Supabase credentials.
    pub fn from_env() -> Self {
        let backend = std::env::var("STORAGE_BACKEND").unwrap_or_else(|_| "local".into());
        match backend.as_str() {
            "local" => StorageConfig::Local {
                root: std::env::var("STORAGE_LOCAL_ROOT")
                    .unwrap_or_else(|_| "storage".into())
                    .into(),
            },
            "supabase" => StorageConfig::Supabase {
                url: std::env::var("SUPABASE_URL")
                    .expect("SUPABASE_URL must be set when STORAGE_BACKEND=supabase"),
                service_key: std::env::var("SUPABASE_SERVICE_KEY")
                    .expect("SUPABASE_SERVICE_KEY must be set when STORAGE_BACKEND=supabase"),
                bucket: std::env::var("STORAGE_BUCKET").unwrap_or_else(|_| "uploads".into()),
            },
            other => panic!("Invalid STORAGE_BACKEND '{other}'. Must be one of: local, supabase"),
        }
    }

    /// Short backend name for logs. Never includes credentials.
    pub fn backend_name(&self) -> &'static str {
        match self {
            StorageConfig::Local { .. } => "local",
            StorageConfig::Supabase { .. } => "supabase",
        }
    }

    /// Instantiate the configured backend.
    pub fn build(&self) -> Arc<dyn ObjectStorage> {
        match self {
            StorageConfig::Local { root } => Arc::new(LocalStorage::new(root.clone())),
            StorageConfig::Supabase {
                url,
                service_key,
                bucket,
            } => Arc::new(SupabaseStorage::new(url, service_key, bucket)),
        }
    }
}

/// Reject keys that could escape the storage root or address a directory.
pub(crate) fn check_key(key: &str) -> Result<(), StorageError> {
    let bad = key.is_empty()
        || key.starts_with('/')
        || key.ends_with('/')
        || key.contains('\\')
        || key.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..");
    if bad {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}
