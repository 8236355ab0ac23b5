//! Wire shapes exchanged with the schedule API.

use serde::{Deserialize, Serialize};

use super::{Method, MethodValue, TriggerKind, WeekdaySet};

/// Message used when the remote side rejects a schedule without saying why.
pub const DEFAULT_REJECTION_MESSAGE: &str = "Could not save the schedule. Please try again later.";

/// A finished schedule as submitted to the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePayload {
    /// Set when an existing schedule is being replaced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub device_id: u64,
    pub method: Method,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_value: Option<MethodValue>,
    #[serde(rename = "type")]
    pub kind: TriggerKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hour: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minute: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<i32>,
    pub random_interval: u32,
    /// 1-based ISO day indexes
    pub weekdays: WeekdaySet,
    pub active: bool,
    pub retries: u32,
    pub retry_interval: u32,
    pub reps: u32,
}

/// Outcome reported by the API for a submitted schedule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum SaveResponse {
    /// Stored under the given schedule ID
    Saved { id: u64 },
    /// Refused, with a user-facing explanation
    Rejected {
        #[serde(default)]
        message: String,
    },
}

impl SaveResponse {
    /// A rejection carrying `message`, or the default text when it is blank.
    pub fn rejected(message: impl Into<String>) -> Self {
        let message = message.into();
        SaveResponse::Rejected {
            message: if message.trim().is_empty() {
                DEFAULT_REJECTION_MESSAGE.to_string()
            } else {
                message
            },
        }
    }
}
