//! Device action codes.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Action a schedule performs on its device.
///
/// The discriminants are the bitmask codes used by the remote API, both for
/// a schedule's `method` and for a device's `supportedMethods` mask.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(into = "u32", try_from = "u32")]
pub enum Method {
    On = 1,
    Off = 2,
    Bell = 4,
    Dim = 16,
    Up = 128,
    Down = 256,
    Stop = 512,
    Rgb = 1024,
    Thermostat = 2048,
}

impl Method {
    /// Every known method in ascending code order.
    pub const ALL: [Method; 9] = [
        Method::On,
        Method::Off,
        Method::Bell,
        Method::Dim,
        Method::Up,
        Method::Down,
        Method::Stop,
        Method::Rgb,
        Method::Thermostat,
    ];

    /// Wire code of the method.
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Whether the method carries a `methodValue` payload.
    pub fn requires_value(self) -> bool {
        matches!(self, Method::Dim | Method::Rgb | Method::Thermostat)
    }

    /// Lowercase name used on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Method::On => "on",
            Method::Off => "off",
            Method::Bell => "bell",
            Method::Dim => "dim",
            Method::Up => "up",
            Method::Down => "down",
            Method::Stop => "stop",
            Method::Rgb => "rgb",
            Method::Thermostat => "thermostat",
        }
    }

    /// Human-readable label for summaries.
    pub fn label(self) -> &'static str {
        match self {
            Method::On => "Turn on",
            Method::Off => "Turn off",
            Method::Bell => "Bell",
            Method::Dim => "Dim",
            Method::Up => "Up",
            Method::Down => "Down",
            Method::Stop => "Stop",
            Method::Rgb => "Color",
            Method::Thermostat => "Thermostat",
        }
    }

    /// Whether the method's bit is present in a supported-methods mask.
    pub fn is_in(self, mask: u32) -> bool {
        mask & self.code() != 0
    }
}

impl From<Method> for u32 {
    fn from(method: Method) -> Self {
        method.code()
    }
}

impl TryFrom<u32> for Method {
    type Error = String;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        Method::ALL
            .into_iter()
            .find(|method| method.code() == code)
            .ok_or_else(|| format!("Unknown method code: {code}"))
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<u32>() {
            return Method::try_from(code);
        }
        match s.to_lowercase().as_str() {
            "on" | "turnon" => Ok(Method::On),
            "off" | "turnoff" => Ok(Method::Off),
            "bell" => Ok(Method::Bell),
            "dim" => Ok(Method::Dim),
            "up" => Ok(Method::Up),
            "down" => Ok(Method::Down),
            "stop" => Ok(Method::Stop),
            "rgb" | "color" | "colour" => Ok(Method::Rgb),
            "thermostat" => Ok(Method::Thermostat),
            _ => Err(format!("Invalid method: {s}")),
        }
    }
}
