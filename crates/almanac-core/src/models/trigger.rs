//! Trigger kinds and validated trigger descriptors.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AlmanacError, Result};

/// Largest absolute sunrise/sunset offset in minutes.
pub const MAX_OFFSET_MINUTES: i32 = 1439;

/// Largest random interval in minutes.
pub const MAX_RANDOM_INTERVAL: u32 = 1440;

/// What a schedule's firing time is anchored to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TriggerKind {
    Sunrise,
    Sunset,
    Time,
}

impl TriggerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerKind::Sunrise => "sunrise",
            TriggerKind::Sunset => "sunset",
            TriggerKind::Time => "time",
        }
    }
}

impl FromStr for TriggerKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sunrise" => Ok(TriggerKind::Sunrise),
            "sunset" => Ok(TriggerKind::Sunset),
            "time" => Ok(TriggerKind::Time),
            _ => Err(format!("Invalid trigger type: {s}")),
        }
    }
}

/// A schedule's trigger with only the fields meaningful for its kind.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trigger {
    /// Minutes relative to the gateway's sunrise
    Sunrise { offset: i32 },
    /// Minutes relative to the gateway's sunset
    Sunset { offset: i32 },
    /// Fixed wall-clock time in the gateway's time zone
    Time { hour: u8, minute: u8 },
}

impl Trigger {
    /// Builds a fixed-time trigger.
    ///
    /// # Errors
    ///
    /// Returns `AlmanacError::InvalidInput` when hour or minute is out of range.
    pub fn at(hour: u8, minute: u8) -> Result<Self> {
        if hour > 23 {
            return Err(AlmanacError::invalid_input("hour")
                .with_reason(format!("Hour {hour} is outside 0..=23")));
        }
        if minute > 59 {
            return Err(AlmanacError::invalid_input("minute")
                .with_reason(format!("Minute {minute} is outside 0..=59")));
        }
        Ok(Trigger::Time { hour, minute })
    }

    /// Builds a sunrise or sunset trigger.
    ///
    /// # Errors
    ///
    /// Returns `AlmanacError::InvalidInput` when `kind` is `Time` or the offset
    /// exceeds a day.
    pub fn sun(kind: TriggerKind, offset: i32) -> Result<Self> {
        if !(-MAX_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(&offset) {
            return Err(AlmanacError::invalid_input("offset").with_reason(format!(
                "Offset {offset} is outside -{MAX_OFFSET_MINUTES}..={MAX_OFFSET_MINUTES}"
            )));
        }
        match kind {
            TriggerKind::Sunrise => Ok(Trigger::Sunrise { offset }),
            TriggerKind::Sunset => Ok(Trigger::Sunset { offset }),
            TriggerKind::Time => Err(AlmanacError::invalid_input("offset")
                .with_reason("A fixed-time trigger has no offset; give hour and minute")),
        }
    }

    pub fn kind(&self) -> TriggerKind {
        match self {
            Trigger::Sunrise { .. } => TriggerKind::Sunrise,
            Trigger::Sunset { .. } => TriggerKind::Sunset,
            Trigger::Time { .. } => TriggerKind::Time,
        }
    }

    /// Offset in minutes for sun-relative triggers.
    pub fn offset(&self) -> Option<i32> {
        match *self {
            Trigger::Sunrise { offset } | Trigger::Sunset { offset } => Some(offset),
            Trigger::Time { .. } => None,
        }
    }

    /// Hour and minute for fixed-time triggers.
    pub fn clock(&self) -> Option<(u8, u8)> {
        match *self {
            Trigger::Time { hour, minute } => Some((hour, minute)),
            _ => None,
        }
    }
}

/// Validates a random interval in minutes.
pub fn check_random_interval(random_interval: u32) -> Result<u32> {
    if random_interval > MAX_RANDOM_INTERVAL {
        return Err(AlmanacError::invalid_input("random_interval").with_reason(format!(
            "Random interval {random_interval} is outside 0..={MAX_RANDOM_INTERVAL}"
        )));
    }
    Ok(random_interval)
}
