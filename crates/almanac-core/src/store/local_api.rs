//! Local implementation of the schedule API.

use std::future::Future;

use super::{run_blocking, ScheduleStore};
use crate::{
    api::ScheduleApi,
    db::Database,
    error::Result,
    models::{SaveResponse, SchedulePayload},
};

impl ScheduleApi for ScheduleStore {
    fn save_schedule(
        &self,
        payload: &SchedulePayload,
    ) -> impl Future<Output = Result<SaveResponse>> + Send {
        let db_path = self.db_path.clone();
        let payload = payload.clone();
        async move { run_blocking(db_path, move |db| save_locally(db, &payload)).await }
    }
}

/// Applies the checks the remote service makes, then stores the schedule.
///
/// Refusals come back as [`SaveResponse::Rejected`] with a message for the
/// user, mirroring the remote contract.
fn save_locally(db: &mut Database, payload: &SchedulePayload) -> Result<SaveResponse> {
    let Some(device) = db.get_device(payload.device_id)? else {
        return Ok(SaveResponse::rejected(format!(
            "Device {} is not registered",
            payload.device_id
        )));
    };
    if !device
        .capability()
        .is_some_and(|capability| capability.supports(payload.method))
    {
        return Ok(SaveResponse::rejected(format!(
            "{} does not support {}",
            device.name,
            payload.method.label()
        )));
    }

    match payload.id {
        Some(id) if db.update_job(id, payload)? => {
            log::info!("Updated schedule {id}");
            Ok(SaveResponse::Saved { id })
        }
        Some(id) => Ok(SaveResponse::rejected(format!(
            "Schedule {id} no longer exists"
        ))),
        None => {
            let id = db.insert_job(payload)?;
            log::info!("Created schedule {id}");
            Ok(SaveResponse::Saved { id })
        }
    }
}
