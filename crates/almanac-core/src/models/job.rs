//! Persisted schedules and the registries they reference.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::{Capability, Method, Trigger, TriggerKind, WeekdaySet};
use crate::error::Result;

/// A home hub supplying time zone and sun-event data to its devices.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Gateway {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    /// IANA time zone name
    pub timezone: String,
    /// Today's sunrise as epoch seconds
    pub sunrise: i64,
    /// Today's sunset as epoch seconds
    pub sunset: i64,
}

/// A controllable device attached to a gateway.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    /// ID of the gateway the device belongs to
    pub client_id: u64,
    /// Bitmask of supported method codes
    #[serde(default)]
    pub supported_methods: u32,
}

impl Device {
    pub fn capability(&self) -> Option<Capability> {
        Capability::classify(self.supported_methods)
    }
}

/// A persisted schedule as returned by the job listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: u64,
    pub device_id: u64,
    /// Raw method code; unknown codes are kept for display
    pub method: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_value: Option<Value>,
    #[serde(rename = "type")]
    pub kind: TriggerKind,
    #[serde(default)]
    pub hour: u8,
    #[serde(default)]
    pub minute: u8,
    #[serde(default)]
    pub offset: i32,
    #[serde(default)]
    pub random_interval: u32,
    #[serde(default)]
    pub retries: u32,
    #[serde(default)]
    pub retry_interval: u32,
    #[serde(default)]
    pub reps: u32,
    #[serde(default)]
    pub active: bool,
    /// 1-based ISO days; `None` when the received data was unreadable
    #[serde(default, deserialize_with = "lenient_weekdays")]
    pub weekdays: Option<Vec<i64>>,
}

impl Job {
    /// The job's trigger, validated.
    pub fn trigger(&self) -> Result<Trigger> {
        match self.kind {
            TriggerKind::Time => Trigger::at(self.hour, self.minute),
            kind => Trigger::sun(kind, self.offset),
        }
    }

    /// The job's action, if the code is known.
    pub fn method(&self) -> Option<Method> {
        Method::try_from(self.method).ok()
    }

    /// The job's days, or `None` for missing or malformed data.
    pub fn weekday_set(&self) -> Option<WeekdaySet> {
        WeekdaySet::from_wire(self.weekdays.as_deref())
    }
}

/// A "list jobs" response together with the device and gateway registries.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    #[serde(default)]
    pub gateways: Vec<Gateway>,
    #[serde(default)]
    pub devices: Vec<Device>,
    #[serde(default)]
    pub jobs: Vec<Job>,
}

/// How many records an import wrote.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImportSummary {
    pub gateways: usize,
    pub devices: usize,
    pub jobs: usize,
}

/// Something with a registry identifier.
pub trait Identified {
    fn id(&self) -> u64;
}

impl Identified for Gateway {
    fn id(&self) -> u64 {
        self.id
    }
}

impl Identified for Device {
    fn id(&self) -> u64 {
        self.id
    }
}

impl Identified for Job {
    fn id(&self) -> u64 {
        self.id
    }
}

/// Builds a `byId` lookup table.
pub fn index_by_id<T, I>(items: I) -> HashMap<u64, T>
where
    T: Identified,
    I: IntoIterator<Item = T>,
{
    items.into_iter().map(|item| (item.id(), item)).collect()
}

/// Accepts `[1, 2]`, `"1,2"`, or `null`; anything unreadable becomes `None`.
fn lenient_weekdays<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items.iter().map(Value::as_i64).collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(|day| day.trim().parse::<i64>().ok())
            .collect(),
        _ => None,
    })
}
