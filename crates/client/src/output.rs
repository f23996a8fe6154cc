//! Write-through persistence of result payloads.

use std::path::Path;
use tracing::info;

use crate::error::{ClientError, Result};

/// Write `bytes` to `path` unmodified, creating or truncating the file.
///
/// # Errors
///
/// Returns [`ClientError::Persist`] if the file cannot be created or written.
pub async fn persist_results(path: &Path, bytes: &[u8]) -> Result<()> {
    tokio::fs::write(path, bytes)
        .await
        .map_err(|source| ClientError::Persist {
            path: path.to_path_buf(),
            source,
        })?;

    info!(path = %path.display(), bytes = bytes.len(), "Results written");
    Ok(())
}
