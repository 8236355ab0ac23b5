//! The seam to whatever stores schedules.
//!
//! The wizard hands finished drafts to a [`ScheduleApi`]. The remote service
//! answers with either the new schedule ID or a message explaining why the
//! schedule was refused; [`crate::store::ScheduleStore`] implements the same
//! contract locally.

use std::future::Future;

use crate::{
    error::Result,
    models::{SaveResponse, SchedulePayload},
};

/// Accepts finished schedules.
pub trait ScheduleApi {
    /// Saves a schedule, inserting it or replacing the one named by
    /// `payload.id`.
    ///
    /// A refusal is reported as [`SaveResponse::Rejected`]; `Err` is kept
    /// for transport and storage failures.
    fn save_schedule(
        &self,
        payload: &SchedulePayload,
    ) -> impl Future<Output = Result<SaveResponse>> + Send;
}
