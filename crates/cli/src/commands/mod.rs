pub(crate) mod judge;
pub(crate) mod listings;

use std::path::Path;

use anyhow::{Context, Result};
use rentswipe_core::UserId;
use rentswipe_service::{SessionConfig, SwipeSession};

/// Who the command acts for and which like authority it talks to.
pub(crate) struct Target {
    pub(crate) user: Option<String>,
    pub(crate) offline: bool,
}

/// Connect a session from the environment and run its first build.
pub(crate) async fn open_session(target: &Target) -> Result<SwipeSession> {
    let raw_user = target
        .user
        .clone()
        .context("a user is required: pass --user or set RENTSWIPE_USER_ID")?;
    let user = UserId::new(raw_user)?;

    let mut config = SessionConfig::from_env(user);
    if target.offline {
        config.remote = None;
    } else if config.remote.is_none() {
        anyhow::bail!("RENTSWIPE_API_URL must be set (or pass --offline)");
    }
    if let Some(parent) = config.db_path.as_deref().and_then(Path::parent) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let session = SwipeSession::connect(config)?;
    session.start().await;
    Ok(session)
}

pub(crate) fn load_catalog(session: &SwipeSession, path: &Path) -> Result<usize> {
    let payload = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog {}", path.display()))?;
    let count = session
        .replace_catalog_json(&payload)
        .with_context(|| format!("invalid catalog {}", path.display()))?;
    tracing::debug!(count, path = %path.display(), "Catalog loaded");
    Ok(count)
}

pub(crate) fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
