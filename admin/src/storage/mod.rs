//! Object Storage
//!
//! Best-effort removal of files that belong to deleted accounts.

mod s3;

use std::time::Duration;

pub use s3::{S3Client, S3Error};
use tracing::{info, warn};

use crate::config::Config;

/// Upper bound on any single storage call made after a deletion has committed.
pub const STORAGE_TIMEOUT: Duration = Duration::from_secs(10);

/// Prefix under which profile avatars are uploaded.
const AVATAR_PREFIX: &str = "avatars/";

/// Turn a stored avatar reference into an object key.
///
/// Profiles may hold either a bare key (`avatars/7/me.png`) or a full URL to
/// the object; for URLs the key starts at the avatar prefix.
pub fn avatar_object_key(stored: &str) -> Option<String> {
    let stored = stored.trim();
    if stored.is_empty() {
        return None;
    }

    if stored.contains("://") {
        return stored
            .find(AVATAR_PREFIX)
            .map(|pos| stored[pos..].split(['?', '#']).next().unwrap_or_default())
            .filter(|key| key.len() > AVATAR_PREFIX.len())
            .map(str::to_string);
    }

    Some(stored.trim_start_matches('/').to_string())
}

/// Connect to object storage if it is configured and reachable.
///
/// Returns `None` (cleanup disabled) rather than failing the command.
pub async fn connect(config: &Config) -> Option<S3Client> {
    if !config.has_storage() {
        return None;
    }

    let client = match S3Client::new(config) {
        Ok(client) => client,
        Err(e) => {
            warn!("S3 client initialization failed: {}. Avatar cleanup disabled.", e);
            return None;
        }
    };

    let health = tokio::time::timeout(STORAGE_TIMEOUT, client.health_check())
        .await
        .unwrap_or_else(|_| Err(S3Error::Timeout));

    match health {
        Ok(()) => {
            info!(bucket = %client.bucket(), "S3 storage connected");
            Some(client)
        }
        Err(e) => {
            warn!("S3 health check failed: {}. Avatar cleanup disabled.", e);
            None
        }
    }
}
