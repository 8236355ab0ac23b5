//! Serialising and submitting the draft.

use std::time::Duration;

use log::{info, warn};

use super::{ScheduleWizard, WizardMode, WizardStep};
use crate::{
    api::ScheduleApi,
    error::{AlmanacError, Result},
    models::{SaveResponse, SchedulePayload, DEFAULT_REJECTION_MESSAGE},
};

impl ScheduleWizard {
    /// The draft in the shape the schedule API expects.
    ///
    /// Weekdays are emitted as 1-based indexes, the offset is omitted for
    /// fixed-time triggers and hour/minute for sun triggers. Edit sessions
    /// carry the ID of the schedule being replaced.
    ///
    /// # Errors
    ///
    /// Returns `AlmanacError::IncompleteDraft` naming the first missing
    /// choice.
    pub fn to_submission_payload(&self) -> Result<SchedulePayload> {
        let draft = &self.draft;
        let device_id = draft
            .device_id
            .ok_or(AlmanacError::IncompleteDraft { field: "device" })?;
        let method = draft
            .method
            .ok_or(AlmanacError::IncompleteDraft { field: "action" })?;
        if method.requires_value() && draft.method_value.is_none() {
            return Err(AlmanacError::IncompleteDraft {
                field: "action value",
            });
        }
        let trigger = draft
            .trigger
            .ok_or(AlmanacError::IncompleteDraft { field: "time" })?;
        if draft.weekdays.is_empty() {
            return Err(AlmanacError::IncompleteDraft { field: "days" });
        }

        let clock = trigger.clock();
        Ok(SchedulePayload {
            id: match self.mode {
                WizardMode::Edit { job_id } => Some(job_id),
                WizardMode::Create => None,
            },
            device_id,
            method,
            method_value: draft.method_value.clone(),
            kind: trigger.kind(),
            hour: clock.map(|(hour, _)| hour),
            minute: clock.map(|(_, minute)| minute),
            offset: trigger.offset(),
            random_interval: draft.random_interval,
            weekdays: draft.weekdays,
            active: draft.active,
            retries: draft.advanced.retries,
            retry_interval: draft.advanced.retry_interval,
            reps: draft.advanced.reps,
        })
    }

    /// Submits the draft from the summary step.
    ///
    /// On success the session is reset and the schedule ID returned. On a
    /// refusal, a transport error or a timeout the draft is kept on the
    /// summary step with the message recorded for display; nothing is
    /// retried.
    ///
    /// # Errors
    ///
    /// Returns `AlmanacError::WrongStep` off the summary step,
    /// `AlmanacError::IncompleteDraft` for an unfinished draft,
    /// `AlmanacError::SubmissionRejected`, `AlmanacError::SubmissionTimeout`,
    /// or the API's own error.
    pub async fn submit<A: ScheduleApi>(&mut self, api: &A, timeout: Duration) -> Result<u64> {
        self.require_step(|s| s == WizardStep::Summary, "submit")?;
        let payload = self.to_submission_payload()?;

        let outcome = match tokio::time::timeout(timeout, api.save_schedule(&payload)).await {
            Ok(Ok(SaveResponse::Saved { id })) => Ok(id),
            Ok(Ok(SaveResponse::Rejected { message })) => {
                let message = if message.trim().is_empty() {
                    DEFAULT_REJECTION_MESSAGE.to_string()
                } else {
                    message
                };
                Err(AlmanacError::SubmissionRejected { message })
            }
            Ok(Err(e)) => Err(e),
            Err(_) => Err(AlmanacError::SubmissionTimeout {
                seconds: timeout.as_secs(),
            }),
        };

        match outcome {
            Ok(id) => {
                info!("Schedule {} saved for device {}", id, payload.device_id);
                self.reset();
                Ok(id)
            }
            Err(e) => {
                warn!("Schedule submission failed: {}", e);
                self.last_error = Some(match &e {
                    AlmanacError::SubmissionRejected { message } => message.clone(),
                    other => other.to_string(),
                });
                Err(e)
            }
        }
    }
}
