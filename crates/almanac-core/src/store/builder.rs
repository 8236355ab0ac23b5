//! Builder for creating and configuring ScheduleStore instances.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use super::{run_blocking, ScheduleStore};
use crate::error::{AlmanacError, Result};

/// Submission timeout used unless configured otherwise.
pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(30);

/// Builder for creating and configuring ScheduleStore instances.
#[derive(Debug, Clone)]
pub struct ScheduleStoreBuilder {
    database_path: Option<PathBuf>,
    submit_timeout: Duration,
}

impl ScheduleStoreBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
            submit_timeout: DEFAULT_SUBMIT_TIMEOUT,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/almanac/almanac.db` or `~/.local/share/almanac/almanac.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets how long a submission may take.
    pub fn with_submit_timeout(mut self, timeout: Duration) -> Self {
        self.submit_timeout = timeout;
        self
    }

    /// Builds the configured store, creating the database if needed.
    ///
    /// # Errors
    ///
    /// Returns `AlmanacError::Configuration` for a zero timeout,
    /// `AlmanacError::FileSystem` if the database directory cannot be created
    /// and `AlmanacError::Database` if schema initialization fails.
    pub async fn build(self) -> Result<ScheduleStore> {
        if self.submit_timeout.is_zero() {
            return Err(AlmanacError::Configuration {
                message: "Submission timeout must be greater than zero".to_string(),
            });
        }

        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| AlmanacError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        run_blocking(db_path.clone(), |_db| Ok(())).await?;
        log::debug!("Using database at {}", db_path.display());

        Ok(ScheduleStore::new(db_path, self.submit_timeout))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("almanac")
            .place_data_file("almanac.db")
            .map_err(|e| AlmanacError::XdgDirectory(e.to_string()))
    }
}

impl Default for ScheduleStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}
