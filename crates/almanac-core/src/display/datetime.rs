//! Date and time display utilities.
//!
//! Sun events and triggers belong to a gateway, so they are shown on the
//! gateway's clock rather than the viewer's.

use std::fmt;

use jiff::Timestamp;

use crate::calendar::resolve_time_zone;

/// An epoch-seconds instant formatted in a gateway's time zone.
///
/// # Format
///
/// `YYYY-MM-DD HH:MM TZ`. Unknown zones fall back to UTC and out-of-range
/// instants print the raw seconds.
///
/// # Examples
///
/// ```rust
/// use almanac_core::display::GatewayTime;
///
/// let sunrise = GatewayTime::new(1717394400, "Europe/Stockholm");
/// assert_eq!(sunrise.to_string(), "2024-06-03 08:00 CEST");
/// ```
pub struct GatewayTime<'a> {
    pub seconds: i64,
    pub timezone: &'a str,
}

impl<'a> GatewayTime<'a> {
    pub fn new(seconds: i64, timezone: &'a str) -> Self {
        Self { seconds, timezone }
    }
}

impl fmt::Display for GatewayTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Ok(timestamp) = Timestamp::from_second(self.seconds) else {
            return write!(f, "{}s", self.seconds);
        };
        let tz = resolve_time_zone(self.timezone).unwrap_or(jiff::tz::TimeZone::UTC);
        write!(f, "{}", timestamp.to_zoned(tz).strftime("%Y-%m-%d %H:%M %Z"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_time_uses_gateway_zone() {
        assert_eq!(
            GatewayTime::new(1717394400, "UTC").to_string(),
            "2024-06-03 06:00 UTC"
        );
        assert_eq!(
            GatewayTime::new(1717394400, "Pacific/Auckland").to_string(),
            "2024-06-03 18:00 NZST"
        );
    }

    #[test]
    fn test_gateway_time_falls_back_to_utc() {
        assert_eq!(
            GatewayTime::new(1717394400, "Mars/Olympus").to_string(),
            "2024-06-03 06:00 UTC"
        );
    }
}
