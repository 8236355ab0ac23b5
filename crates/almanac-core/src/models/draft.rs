//! The in-progress schedule record and the action payloads it carries.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::{Method, Trigger, WeekdaySet};
use crate::error::{AlmanacError, Result};

/// Thermostat modes that never carry a target temperature.
const TEMPERATURE_LESS_MODES: [&str; 2] = ["off", "fan"];

/// Thermostat action payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ThermostatValue {
    /// Device mode to switch to, as advertised by the thermostat
    pub mode: String,
    /// Target temperature, only sent when `change_temp` is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Whether the mode should be changed
    #[serde(deserialize_with = "bool_or_int")]
    pub change_mode: bool,
    /// Whether the temperature should be changed
    #[serde(deserialize_with = "bool_or_int")]
    pub change_temp: bool,
}

impl ThermostatValue {
    /// Applies the payload rules before storing or sending the value.
    ///
    /// `off` and `fan` modes force `change_temp` off, and no temperature is
    /// sent unless the temperature is being changed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use almanac_core::models::ThermostatValue;
    ///
    /// let value = ThermostatValue {
    ///     mode: "off".to_string(),
    ///     temperature: Some(21.0),
    ///     change_mode: true,
    ///     change_temp: true,
    /// }
    /// .normalized();
    /// assert!(!value.change_temp);
    /// assert_eq!(value.temperature, None);
    /// ```
    pub fn normalized(mut self) -> Self {
        if TEMPERATURE_LESS_MODES.contains(&self.mode.to_lowercase().as_str()) {
            self.change_temp = false;
        }
        if !self.change_temp {
            self.temperature = None;
        }
        self
    }
}

/// Payload for parameterised actions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MethodValue {
    /// Dim level 0..=255
    Dim(u8),
    /// `#RRGGBB` colour
    Color(String),
    Thermostat(ThermostatValue),
}

impl MethodValue {
    /// The method this payload belongs to.
    pub fn method(&self) -> Method {
        match self {
            MethodValue::Dim(_) => Method::Dim,
            MethodValue::Color(_) => Method::Rgb,
            MethodValue::Thermostat(_) => Method::Thermostat,
        }
    }

    /// Checks the payload and applies normalisation rules.
    ///
    /// # Errors
    ///
    /// Returns `AlmanacError::InvalidInput` for malformed colours.
    pub fn validated(self) -> Result<Self> {
        match self {
            MethodValue::Color(color) => parse_hex_color(&color).map(MethodValue::Color),
            MethodValue::Thermostat(value) => Ok(MethodValue::Thermostat(value.normalized())),
            dim @ MethodValue::Dim(_) => Ok(dim),
        }
    }

    /// Decodes a stored `methodValue` for a given method.
    ///
    /// The remote API hands values back loosely typed: dim levels as numbers
    /// or numeric strings, thermostat payloads as objects or JSON strings.
    /// Methods without a payload yield `None` whatever was stored.
    pub fn from_wire(method: Method, value: &Value) -> Result<Option<Self>> {
        let invalid = || {
            AlmanacError::invalid_input("method_value")
                .with_reason(format!("Cannot read {value} as a {} value", method.as_str()))
        };
        let decoded = match (method, value) {
            (Method::Dim, Value::Number(n)) => n
                .as_u64()
                .and_then(|n| u8::try_from(n).ok())
                .map(MethodValue::Dim)
                .ok_or_else(invalid)?,
            (Method::Dim, Value::String(s)) => {
                MethodValue::Dim(s.trim().parse::<u8>().map_err(|_| invalid())?)
            }
            (Method::Rgb, Value::String(s)) => MethodValue::Color(parse_hex_color(s)?),
            (Method::Thermostat, Value::Object(_)) => {
                MethodValue::Thermostat(serde_json::from_value(value.clone())?)
            }
            (Method::Thermostat, Value::String(s)) => {
                MethodValue::Thermostat(serde_json::from_str(s)?)
            }
            (m, _) if !m.requires_value() => return Ok(None),
            _ => return Err(invalid()),
        };
        decoded.validated().map(Some)
    }
}

/// Normalises a `#RRGGBB` colour to uppercase.
fn parse_hex_color(color: &str) -> Result<String> {
    let hex = color.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(AlmanacError::invalid_input("color")
            .with_reason(format!("'{color}' is not a #RRGGBB colour")));
    }
    Ok(format!("#{}", hex.to_uppercase()))
}

/// Retry and repetition settings interpreted by the remote execution engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Advanced {
    pub retries: u32,
    /// Minutes between retries
    pub retry_interval: u32,
    /// How many times the command is repeated
    pub reps: u32,
}

impl Default for Advanced {
    fn default() -> Self {
        Self {
            retries: 3,
            retry_interval: 5,
            reps: 1,
        }
    }
}

/// A schedule being assembled by the wizard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDraft {
    pub device_id: Option<u64>,
    pub method: Option<Method>,
    pub method_value: Option<MethodValue>,
    pub trigger: Option<Trigger>,
    /// Minutes of jitter applied to the trigger
    pub random_interval: u32,
    pub weekdays: WeekdaySet,
    pub active: bool,
    #[serde(flatten)]
    pub advanced: Advanced,
}

impl Default for ScheduleDraft {
    fn default() -> Self {
        Self {
            device_id: None,
            method: None,
            method_value: None,
            trigger: None,
            random_interval: 0,
            weekdays: WeekdaySet::EMPTY,
            active: true,
            advanced: Advanced::default(),
        }
    }
}

fn bool_or_int<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(i) => i != 0,
    })
}
