//! Snapshot import, registry lookups, jobs and the agenda.

use jiff::Timestamp;

use super::ScheduleStore;
use crate::{
    agenda::{partition_jobs, Agenda},
    error::{AlmanacError, Result},
    models::{
        available_actions, index_by_id, Device, Gateway, ImportSummary, Job, Method, Snapshot,
    },
    params::{AgendaQuery, Id},
};

impl ScheduleStore {
    /// Writes a snapshot of gateways, devices and jobs.
    pub async fn import_snapshot(&self, snapshot: Snapshot) -> Result<ImportSummary> {
        let summary = self.with_db(move |db| db.import_snapshot(&snapshot)).await?;
        log::info!(
            "Imported {} gateways, {} devices and {} schedules",
            summary.gateways,
            summary.devices,
            summary.jobs
        );
        Ok(summary)
    }

    pub async fn list_jobs(&self) -> Result<Vec<Job>> {
        self.with_db(|db| db.list_jobs()).await
    }

    pub async fn get_job(&self, params: &Id) -> Result<Option<Job>> {
        let id = params.id;
        self.with_db(move |db| db.get_job(id)).await
    }

    /// Deletes a job.
    ///
    /// # Errors
    ///
    /// Returns `AlmanacError::JobNotFound` when no job has the ID.
    pub async fn delete_job(&self, params: &Id) -> Result<()> {
        let id = params.id;
        if self.with_db(move |db| db.delete_job(id)).await? {
            log::info!("Deleted schedule {id}");
            Ok(())
        } else {
            Err(AlmanacError::JobNotFound { id })
        }
    }

    pub async fn get_device(&self, params: &Id) -> Result<Option<Device>> {
        let id = params.id;
        self.with_db(move |db| db.get_device(id)).await
    }

    pub async fn list_devices(&self) -> Result<Vec<Device>> {
        self.with_db(|db| db.list_devices()).await
    }

    pub async fn get_gateway(&self, params: &Id) -> Result<Option<Gateway>> {
        let id = params.id;
        self.with_db(move |db| db.get_gateway(id)).await
    }

    pub async fn list_gateways(&self) -> Result<Vec<Gateway>> {
        self.with_db(|db| db.list_gateways()).await
    }

    /// Actions offered for a stored device.
    ///
    /// # Errors
    ///
    /// Returns `AlmanacError::DeviceNotFound` for an unknown device.
    pub async fn available_actions(&self, params: &Id) -> Result<Vec<Method>> {
        let device = self
            .get_device(params)
            .await?
            .ok_or(AlmanacError::DeviceNotFound { id: params.id })?;
        Ok(available_actions(device.capability()))
    }

    /// Partitions the stored jobs into the eight display buckets.
    pub async fn agenda(&self, params: &AgendaQuery) -> Result<Agenda> {
        let show_inactive = params.show_inactive;
        let now = params.now.unwrap_or_else(Timestamp::now);

        self.with_db(move |db| {
            let jobs = db.list_jobs()?;
            let devices = index_by_id(db.list_devices()?);
            let gateways = index_by_id(db.list_gateways()?);
            Ok(partition_jobs(&jobs, &devices, &gateways, show_inactive, now))
        })
        .await
    }
}
