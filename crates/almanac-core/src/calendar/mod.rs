//! Day and time derivation.
//!
//! Day names come from formatting a fixed reference week through a
//! [`DayNames`] formatter, so translated lists always line up with the
//! canonical Monday-first [`WeekdaySet`](crate::models::WeekdaySet).
//! Effective trigger instants are computed in the gateway's time zone.

pub mod instant;
pub mod names;

pub use instant::{
    iso_weekday, minutes_since_midnight, resolve_time_zone, trigger_instant, trigger_instant_now,
};
pub use names::{
    day_indexes, is_selected, selected_days, week_rotation, weekday_names, weekend_names,
    DayNames, EnglishDayNames, TableDayNames,
};
