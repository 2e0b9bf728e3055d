pub mod blogs;
pub mod keywords;
pub mod leads;
pub mod settings;

use std::io::ErrorKind;
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::errors::AppError;

/// Reads a JSON document, falling back to `T::default()` when the file
/// does not exist yet. A file that exists but cannot be read or parsed is
/// logged and treated as empty instead of taking the API down.
pub(crate) async fn load_or<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    match tokio::fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Failed to parse {}: {e}; using defaults", path.display());
                T::default()
            }
        },
        Err(e) if e.kind() == ErrorKind::NotFound => T::default(),
        Err(e) => {
            tracing::warn!("Failed to read {}: {e}; using defaults", path.display());
            T::default()
        }
    }
}

/// Writes a JSON document as pretty-printed UTF-8, creating the data
/// directory on first use.
pub(crate) async fn write_pretty<T>(path: &Path, value: &T) -> Result<(), AppError>
where
    T: Serialize,
{
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let json = serde_json::to_string_pretty(value)?;
    tokio::fs::write(path, json).await?;
    Ok(())
}
