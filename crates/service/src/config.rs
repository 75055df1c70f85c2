use std::path::PathBuf;

use rentswipe_core::constants::{DEFAULT_IMAGE_BASE_URL, DEFAULT_NOTIFICATION_CAPACITY};
use rentswipe_core::{UserId, env_parse_with_default};
use rentswipe_remote::RemoteConfig;

const DB_PATH_ENV: &str = "RENTSWIPE_DB_PATH";

/// Everything needed to open a session against real backends.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub user: UserId,
    /// `None` runs against an in-memory like authority.
    pub remote: Option<RemoteConfig>,
    /// `None` keeps dislikes in memory only.
    pub db_path: Option<PathBuf>,
    pub image_base_url: String,
    pub notification_capacity: usize,
}

impl SessionConfig {
    #[must_use]
    pub fn new(user: UserId) -> Self {
        Self {
            user,
            remote: None,
            db_path: None,
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_owned(),
            notification_capacity: DEFAULT_NOTIFICATION_CAPACITY,
        }
    }

    /// Session settings from `RENTSWIPE_*` environment variables, with the
    /// database defaulting to the platform data directory.
    #[must_use]
    pub fn from_env(user: UserId) -> Self {
        let image_base_url = std::env::var("RENTSWIPE_IMAGE_BASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_IMAGE_BASE_URL.to_owned());
        let raw_capacity = env_parse_with_default(
            "RENTSWIPE_NOTIFICATION_CAPACITY",
            DEFAULT_NOTIFICATION_CAPACITY,
        );
        let notification_capacity = raw_capacity.max(1);
        if notification_capacity != raw_capacity {
            tracing::warn!(
                original = raw_capacity,
                clamped = notification_capacity,
                "RENTSWIPE_NOTIFICATION_CAPACITY clamped to at least 1"
            );
        }
        Self {
            user,
            remote: RemoteConfig::from_env(),
            db_path: Some(default_db_path()),
            image_base_url,
            notification_capacity,
        }
    }

    #[must_use]
    pub fn with_remote(mut self, remote: RemoteConfig) -> Self {
        self.remote = Some(remote);
        self
    }

    #[must_use]
    pub fn with_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.db_path = Some(path.into());
        self
    }
}

/// `RENTSWIPE_DB_PATH`, else `<data_local_dir>/rentswipe/state.db`.
#[must_use]
pub fn default_db_path() -> PathBuf {
    std::env::var(DB_PATH_ENV).map_or_else(
        |_| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("rentswipe")
                .join("state.db")
        },
        PathBuf::from,
    )
}
