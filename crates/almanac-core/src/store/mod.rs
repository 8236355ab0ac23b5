//! Async facade over the local SQLite store.
//!
//! [`ScheduleStore`] is the entry point for front ends. It owns no
//! connection; each operation opens the database on the blocking thread pool,
//! so the store is cheap to clone and safe to share between tasks.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  ScheduleStore  │    │ spawn_blocking  │    │    Database     │
//! │  (async ops)    │───▶│                 │───▶│   (via db/)     │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: configuration (database path, submission timeout)
//! - [`registry_ops`]: snapshot import, devices, jobs and the agenda
//! - [`session_ops`]: persisting the wizard session between invocations
//! - [`local_api`]: [`ScheduleApi`](crate::api::ScheduleApi) backed by the
//!   jobs table
//!
//! # Examples
//!
//! ```rust,no_run
//! use almanac_core::{params::AgendaQuery, ScheduleStoreBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = ScheduleStoreBuilder::new()
//!     .with_database_path(Some("/tmp/almanac.db"))
//!     .build()
//!     .await?;
//!
//! let agenda = store.agenda(&AgendaQuery::default()).await?;
//! println!("{agenda}");
//! # Ok(())
//! # }
//! ```

use std::{path::PathBuf, time::Duration};

use tokio::task;

use crate::{
    db::Database,
    error::{AlmanacError, Result},
};

pub mod builder;
pub mod local_api;
pub mod registry_ops;
pub mod session_ops;

#[cfg(test)]
mod tests;

pub use builder::{ScheduleStoreBuilder, DEFAULT_SUBMIT_TIMEOUT};

/// Main interface to stored schedules and the wizard session.
#[derive(Debug, Clone)]
pub struct ScheduleStore {
    pub(crate) db_path: PathBuf,
    pub(crate) submit_timeout: Duration,
}

impl ScheduleStore {
    pub(crate) fn new(db_path: PathBuf, submit_timeout: Duration) -> Self {
        Self {
            db_path,
            submit_timeout,
        }
    }

    /// Path of the SQLite database file.
    pub fn database_path(&self) -> &std::path::Path {
        &self.db_path
    }

    /// How long a submission may take before it is abandoned.
    pub fn submit_timeout(&self) -> Duration {
        self.submit_timeout
    }

    /// Runs `op` against a fresh connection on the blocking thread pool.
    pub(crate) async fn with_db<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        run_blocking(self.db_path.clone(), op).await
    }
}

pub(crate) async fn run_blocking<T, F>(db_path: PathBuf, op: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
{
    task::spawn_blocking(move || {
        let mut db = Database::new(&db_path)?;
        op(&mut db)
    })
    .await
    .map_err(|e| AlmanacError::Configuration {
        message: format!("Task join error: {e}"),
    })?
}
