//! Parameter structures shared by the store, the wizard and the CLI.
//!
//! These types carry no framework derives beyond serde. Interface layers wrap
//! them in their own argument types (clap derives in the CLI) and convert with
//! `From`/`Into`:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Core Params    │
//! │  (clap derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘
//! ```

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::models::TriggerKind;

/// Generic parameters for operations requiring just an ID.
///
/// Used for show_job, delete_job, edit_job and device lookups.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Trigger choice made on the wizard's time step.
///
/// Which fields are required depends on `kind`: `time` needs `hour` and
/// `minute`, `sunrise`/`sunset` need `offset`. Fields that do not apply are
/// dropped when the trigger is recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectTime {
    pub kind: TriggerKind,
    pub hour: Option<u8>,
    pub minute: Option<u8>,
    /// Minutes relative to the sun event
    pub offset: Option<i32>,
    /// Minutes of jitter, 0..=1440
    #[serde(default)]
    pub random_interval: u32,
}

impl SelectTime {
    /// A fixed wall-clock trigger.
    pub fn at(hour: u8, minute: u8) -> Self {
        Self {
            kind: TriggerKind::Time,
            hour: Some(hour),
            minute: Some(minute),
            offset: None,
            random_interval: 0,
        }
    }

    /// A sunrise or sunset trigger.
    pub fn sun(kind: TriggerKind, offset: i32) -> Self {
        Self {
            kind,
            hour: None,
            minute: None,
            offset: Some(offset),
            random_interval: 0,
        }
    }

    pub fn with_random_interval(mut self, minutes: u32) -> Self {
        self.random_interval = minutes;
        self
    }
}

/// Parameters for partitioning the stored jobs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgendaQuery {
    /// Include jobs that are switched off
    #[serde(default)]
    pub show_inactive: bool,
    /// Reference instant; the current time when unset
    #[serde(default)]
    pub now: Option<Timestamp>,
}
