//! Result wrapper types for displaying operation outcomes.
//!
//! A saved schedule is shown as a confirmation line followed by the stored
//! job, so the user sees exactly what the store accepted.

use std::fmt;

use crate::models::{ImportSummary, Job};

/// Wrapper for a newly created schedule.
///
/// # Examples
///
/// ```rust
/// use almanac_core::{display::CreateResult, models::Job};
///
/// let job: Job = serde_json::from_str(
///     r#"{"id": 7, "deviceId": 10, "method": 1, "type": "time",
///         "hour": 6, "minute": 30, "active": true, "weekdays": [1]}"#,
/// )?;
/// let output = CreateResult::new(job).to_string();
/// assert!(output.starts_with("Created schedule with ID: 7"));
/// # Result::<(), serde_json::Error>::Ok(())
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Job> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created schedule with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper for an edited schedule.
pub struct UpdateResult<T> {
    pub resource: T,
}

impl<T> UpdateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for UpdateResult<Job> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated schedule with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper for a removed schedule.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<Job> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted schedule {} of device {}",
            self.resource.id, self.resource.device_id
        )
    }
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Imported {} gateway(s), {} device(s) and {} schedule(s)",
            self.gateways, self.devices, self.jobs
        )
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn create_test_job() -> Job {
        serde_json::from_value(json!({
            "id": 3, "deviceId": 10, "method": 2, "type": "sunrise",
            "offset": 15, "active": true, "weekdays": [6, 7]
        }))
        .unwrap()
    }

    #[test]
    fn test_create_and_update_results() {
        let created = CreateResult::new(create_test_job()).to_string();
        assert!(created.starts_with("Created schedule with ID: 3\n\n### Schedule 3"));
        assert!(created.contains("- Action: Turn off"));

        let updated = UpdateResult::new(create_test_job()).to_string();
        assert!(updated.starts_with("Updated schedule with ID: 3"));
        assert!(updated.contains("- Days: Weekends"));
    }

    #[test]
    fn test_delete_result() {
        let output = DeleteResult::new(create_test_job()).to_string();
        assert_eq!(output, "Deleted schedule 3 of device 10\n");
    }

    #[test]
    fn test_import_summary_display() {
        let summary = ImportSummary {
            gateways: 1,
            devices: 4,
            jobs: 9,
        };
        assert_eq!(
            summary.to_string(),
            "Imported 1 gateway(s), 4 device(s) and 9 schedule(s)\n"
        );
    }
}
