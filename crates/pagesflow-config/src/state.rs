//! Site state management
//!
//! Manages `state.json` in the config directory, which records whether the
//! static site has been generated and how the last deploy ended, and the
//! `deploy.lock` file that keeps generate and deploy runs from overlapping.

use crate::error::{ConfigError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

const STATE_VERSION: u32 = 1;
const STATE_FILE: &str = "state.json";
const STATE_BACKUP: &str = "state.json.backup";
const LOCK_FILE: &str = "deploy.lock";

/// Locks older than this are considered abandoned
const STALE_LOCK_HOURS: i64 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteState {
    pub version: u32,

    /// Set after a successful static generation; deploy is offered only then
    #[serde(default)]
    pub generation_completed: bool,

    #[serde(default)]
    pub generated_at: Option<DateTime<Utc>>,

    /// Base URL the last generation crawled
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default)]
    pub last_deploy: Option<DeployRecord>,
}

impl Default for SiteState {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            generation_completed: false,
            generated_at: None,
            base_url: None,
            last_deploy: None,
        }
    }
}

impl SiteState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_generated(&mut self, base_url: impl Into<String>) {
        self.generation_completed = true;
        self.generated_at = Some(Utc::now());
        self.base_url = Some(base_url.into());
    }

    pub fn clear_generated(&mut self) {
        self.generation_completed = false;
        self.generated_at = None;
    }

    pub fn record_deploy(&mut self, record: DeployRecord) {
        self.last_deploy = Some(record);
    }
}

/// Summary of one deploy attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployRecord {
    pub at: DateTime<Utc>,
    pub project_name: String,
    pub success: bool,
    pub exit_code: i32,
    pub kind: String,
}

impl DeployRecord {
    pub fn now(
        project_name: impl Into<String>,
        success: bool,
        exit_code: i32,
        kind: impl ToString,
    ) -> Self {
        Self {
            at: Utc::now(),
            project_name: project_name.into(),
            success,
            exit_code,
            kind: kind.to_string(),
        }
    }
}

/// State manager for reading/writing the state file
pub struct StateManager {
    dir: PathBuf,
}

impl StateManager {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn state_path(&self) -> PathBuf {
        self.dir.join(STATE_FILE)
    }

    fn backup_path(&self) -> PathBuf {
        self.dir.join(STATE_BACKUP)
    }

    fn lock_path(&self) -> PathBuf {
        self.dir.join(LOCK_FILE)
    }

    async fn ensure_dir(&self) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).await?;
            tracing::debug!("Created state directory: {}", self.dir.display());
        }
        Ok(())
    }

    /// Load the current state
    pub async fn load(&self) -> Result<SiteState> {
        let path = self.state_path();
        if !path.exists() {
            tracing::debug!("State file not found, returning empty state");
            return Ok(SiteState::new());
        }

        let content = fs::read_to_string(&path).await?;
        let state: SiteState = serde_json::from_str(&content)?;

        if state.version > STATE_VERSION {
            return Err(ConfigError::UnsupportedStateVersion {
                found: state.version,
                supported: STATE_VERSION,
            });
        }

        Ok(state)
    }

    /// Save the state, keeping the previous file as a backup
    pub async fn save(&self, state: &SiteState) -> Result<()> {
        self.ensure_dir().await?;

        let path = self.state_path();
        let backup = self.backup_path();

        if path.exists() {
            if backup.exists() {
                fs::remove_file(&backup).await?;
            }
            fs::rename(&path, &backup).await?;
        }

        let content = serde_json::to_string_pretty(state)?;
        fs::write(&path, content).await?;

        tracing::debug!("Saved site state");
        Ok(())
    }

    /// Acquire the deploy lock
    ///
    /// The lock file is created exclusively, so at most one caller wins.
    /// Fails while another process holds a lock younger than one hour; an
    /// older lock is removed and creation is retried once.
    pub async fn acquire_lock(&self) -> Result<DeployLock> {
        self.ensure_dir().await?;

        let lock_path = self.lock_path();

        match self.create_lock_file(&lock_path).await {
            Ok(lock) => return Ok(lock),
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
            Err(e) => return Err(e),
        }

        let existing = self.read_lock_info(&lock_path).await?;
        let age = Utc::now().signed_duration_since(existing.acquired_at);
        if age.num_hours() < STALE_LOCK_HOURS {
            return Err(ConfigError::DeployLocked {
                holder: existing.holder,
                since: existing.acquired_at.to_rfc3339(),
            });
        }

        tracing::warn!("Removing stale deploy lock from {}", existing.holder);
        match fs::remove_file(&lock_path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        match self.create_lock_file(&lock_path).await {
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                let current = self.read_lock_info(&lock_path).await?;
                Err(ConfigError::DeployLocked {
                    holder: current.holder,
                    since: current.acquired_at.to_rfc3339(),
                })
            }
            other => other,
        }
    }

    async fn create_lock_file(&self, lock_path: &Path) -> Result<DeployLock> {
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(lock_path)
            .await?;

        // Drop removes the file again if writing fails
        let lock = DeployLock {
            lock_path: lock_path.to_path_buf(),
            released: false,
        };

        let lock_info = LockInfo {
            holder: format!(
                "{}:{}",
                std::env::var("HOSTNAME")
                    .or_else(|_| std::env::var("HOST"))
                    .unwrap_or_else(|_| "unknown".to_string()),
                std::process::id()
            ),
            acquired_at: Utc::now(),
        };

        let content = serde_json::to_string_pretty(&lock_info)?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;

        tracing::debug!("Acquired deploy lock");
        Ok(lock)
    }

    /// Read an existing lock
    ///
    /// A lock that cannot be parsed (for example one still being written)
    /// is dated by the file's modification time.
    async fn read_lock_info(&self, lock_path: &Path) -> Result<LockInfo> {
        let content = match fs::read_to_string(lock_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };

        if let Ok(info) = serde_json::from_str::<LockInfo>(&content) {
            return Ok(info);
        }

        let acquired_at = match fs::metadata(lock_path).await {
            Ok(metadata) => metadata.modified().map(DateTime::<Utc>::from)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Utc::now(),
            Err(e) => return Err(e.into()),
        };

        Ok(LockInfo {
            holder: "unknown".to_string(),
            acquired_at,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct LockInfo {
    holder: String,
    acquired_at: DateTime<Utc>,
}

/// RAII guard for the deploy lock
pub struct DeployLock {
    lock_path: PathBuf,
    released: bool,
}

impl DeployLock {
    pub async fn release(mut self) -> Result<()> {
        if !self.released {
            if self.lock_path.exists() {
                fs::remove_file(&self.lock_path).await?;
                tracing::debug!("Released deploy lock");
            }
            self.released = true;
        }
        Ok(())
    }
}

impl Drop for DeployLock {
    fn drop(&mut self) {
        if !self.released && self.lock_path.exists() {
            let _ = std::fs::remove_file(&self.lock_path);
        }
    }
}
