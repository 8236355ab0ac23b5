//! Effective trigger instants in a gateway's time zone.

use jiff::{tz::TimeZone, SignedDuration, Timestamp, Zoned};

use crate::{
    error::{AlmanacError, Result, TimeResultExt},
    models::{Gateway, Job, Trigger},
};

/// Looks up an IANA time zone. `UTC` resolves without a time zone database.
pub fn resolve_time_zone(name: &str) -> Result<TimeZone> {
    let name = name.trim();
    if name.eq_ignore_ascii_case("utc") || name.eq_ignore_ascii_case("etc/utc") {
        return Ok(TimeZone::UTC);
    }
    TimeZone::get(name).map_err(|e| AlmanacError::time(format!("Unknown time zone '{name}'"), e))
}

/// The instant a job fires, expressed in its gateway's time zone.
///
/// Sun-relative jobs use the gateway's sunrise or sunset plus the job offset.
/// Fixed-time jobs take `now` in the gateway zone with the hour and minute
/// replaced; only the wall-clock part is meaningful for them.
///
/// # Errors
///
/// Returns `AlmanacError::Time` for an unknown time zone or out-of-range
/// instant, and `AlmanacError::InvalidInput` for an invalid job trigger.
///
/// # Examples
///
/// ```rust
/// use almanac_core::{calendar::trigger_instant, models::{Gateway, Job}};
/// use jiff::Timestamp;
///
/// let gateway = Gateway {
///     id: 1,
///     name: "Home".to_string(),
///     timezone: "UTC".to_string(),
///     sunrise: "2024-06-03T06:00:00Z".parse::<Timestamp>()?.as_second(),
///     sunset: "2024-06-03T21:00:00Z".parse::<Timestamp>()?.as_second(),
/// };
/// let job: Job = serde_json::from_str(
///     r#"{"id":1,"deviceId":1,"method":1,"type":"sunrise","offset":30,"weekdays":[1]}"#,
/// )?;
/// let now: Timestamp = "2024-06-03T05:00:00Z".parse()?;
///
/// let instant = trigger_instant(&job, &gateway, now)?;
/// assert_eq!((instant.hour(), instant.minute()), (6, 30));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn trigger_instant(job: &Job, gateway: &Gateway, now: Timestamp) -> Result<Zoned> {
    let tz = resolve_time_zone(&gateway.timezone)?;
    match job.trigger()? {
        Trigger::Sunrise { offset } => sun_instant(gateway.sunrise, offset, tz),
        Trigger::Sunset { offset } => sun_instant(gateway.sunset, offset, tz),
        Trigger::Time { hour, minute } => now
            .to_zoned(tz)
            .with()
            .hour(hour as i8)
            .minute(minute as i8)
            .second(0)
            .subsec_nanosecond(0)
            .build()
            .time_context("Failed to place trigger time on today's date"),
    }
}

/// [`trigger_instant`] evaluated against the current time.
pub fn trigger_instant_now(job: &Job, gateway: &Gateway) -> Result<Zoned> {
    trigger_instant(job, gateway, Timestamp::now())
}

fn sun_instant(epoch_seconds: i64, offset_minutes: i32, tz: TimeZone) -> Result<Zoned> {
    let event = Timestamp::from_second(epoch_seconds).time_context("Sun event is out of range")?;
    let shifted = event
        .checked_add(SignedDuration::from_mins(i64::from(offset_minutes)))
        .time_context("Sun event offset is out of range")?;
    Ok(shifted.to_zoned(tz))
}

/// Minutes elapsed since local midnight.
pub fn minutes_since_midnight(zoned: &Zoned) -> u16 {
    zoned.hour() as u16 * 60 + zoned.minute() as u16
}

/// ISO weekday (Monday = 1) of a zoned instant.
pub fn iso_weekday(zoned: &Zoned) -> u8 {
    zoned.weekday().to_monday_one_offset() as u8
}
