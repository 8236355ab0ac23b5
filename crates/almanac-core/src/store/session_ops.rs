//! Wizard session persistence.
//!
//! Front ends that live for a single command load the session, apply one
//! operation and save it again. Only one session exists at a time.

use super::ScheduleStore;
use crate::{
    error::{AlmanacError, Result},
    params::Id,
    wizard::ScheduleWizard,
};

impl ScheduleStore {
    /// The stored session, if one is in progress.
    pub async fn load_session(&self) -> Result<Option<ScheduleWizard>> {
        self.with_db(|db| db.load_session()).await
    }

    /// The stored session, or a fresh one.
    pub async fn session(&self) -> Result<ScheduleWizard> {
        Ok(self.load_session().await?.unwrap_or_default())
    }

    pub async fn save_session(&self, wizard: &ScheduleWizard) -> Result<()> {
        let wizard = wizard.clone();
        self.with_db(move |db| db.save_session(&wizard)).await
    }

    /// Discards the stored session. Returns `false` when there was none.
    pub async fn clear_session(&self) -> Result<bool> {
        self.with_db(|db| db.clear_session()).await
    }

    /// Starts a fresh create-mode session, replacing any stored one.
    pub async fn start_session(&self) -> Result<ScheduleWizard> {
        let wizard = ScheduleWizard::new();
        self.save_session(&wizard).await?;
        log::info!("Started a new schedule");
        Ok(wizard)
    }

    /// Starts an edit session for a stored job, replacing any stored one.
    ///
    /// # Errors
    ///
    /// Returns `AlmanacError::JobNotFound` or `AlmanacError::DeviceNotFound`
    /// for dangling references.
    pub async fn start_edit_session(&self, params: &Id) -> Result<ScheduleWizard> {
        let job = self
            .get_job(params)
            .await?
            .ok_or(AlmanacError::JobNotFound { id: params.id })?;
        let device = self
            .get_device(&Id { id: job.device_id })
            .await?
            .ok_or(AlmanacError::DeviceNotFound { id: job.device_id })?;

        let wizard = ScheduleWizard::edit(&job, &device)?;
        self.save_session(&wizard).await?;
        log::info!("Editing schedule {}", job.id);
        Ok(wizard)
    }

    /// Submits the stored session to this store.
    ///
    /// On success the session is cleared; on failure it is saved with the
    /// error message so the summary can show it.
    ///
    /// # Errors
    ///
    /// Returns `AlmanacError::InvalidInput` when no session is stored, and
    /// any error from [`ScheduleWizard::submit`].
    pub async fn submit_session(&self) -> Result<u64> {
        let mut wizard = self.load_session().await?.ok_or_else(|| {
            AlmanacError::invalid_input("session").with_reason("No schedule is in progress")
        })?;

        match wizard.submit(self, self.submit_timeout).await {
            Ok(id) => {
                self.clear_session().await?;
                Ok(id)
            }
            Err(e) => {
                self.save_session(&wizard).await?;
                Err(e)
            }
        }
    }
}
