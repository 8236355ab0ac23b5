//! Locale-aware weekday names.
//!
//! Names are produced by formatting a fixed reference week, so every list
//! (selected days, weekday and weekend presets) comes from the same rotation
//! and translates consistently.

use jiff::civil::{date, Date};

use crate::{
    error::{AlmanacError, Result},
    models::{Preset, WeekdaySet},
};

/// Monday that anchors the canonical rotation.
const REFERENCE_MONDAY: Date = date(2018, 1, 1);

/// Formats the weekday of a date, e.g. a locale's date formatter.
pub trait DayNames {
    fn day_name(&self, date: Date) -> String;
}

impl<F> DayNames for F
where
    F: Fn(Date) -> String,
{
    fn day_name(&self, date: Date) -> String {
        self(date)
    }
}

/// English day names, used when no formatter is supplied.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishDayNames;

impl DayNames for EnglishDayNames {
    fn day_name(&self, date: Date) -> String {
        date.strftime("%A").to_string()
    }
}

/// Day names from a Monday-first translation table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDayNames {
    names: [String; 7],
}

impl TableDayNames {
    pub fn new(names: [&str; 7]) -> Self {
        Self {
            names: names.map(String::from),
        }
    }

    pub fn swedish() -> Self {
        Self::new([
            "måndag", "tisdag", "onsdag", "torsdag", "fredag", "lördag", "söndag",
        ])
    }

    /// Built-in table for a language tag, if one exists.
    pub fn for_locale(locale: &str) -> Option<Self> {
        match locale.split(&['-', '_'][..]).next()?.to_lowercase().as_str() {
            "sv" => Some(Self::swedish()),
            _ => None,
        }
    }
}

impl DayNames for TableDayNames {
    fn day_name(&self, date: Date) -> String {
        let index = date.weekday().to_monday_zero_offset() as usize;
        self.names[index].clone()
    }
}

/// The seven day names starting Monday.
pub fn week_rotation(names: Option<&dyn DayNames>) -> Vec<String> {
    let names = names.unwrap_or(&EnglishDayNames);
    (0..7)
        .map(|i| names.day_name(reference_date(i + 1)))
        .collect()
}

/// Names of the selected days in Monday-first order.
///
/// # Examples
///
/// ```rust
/// use almanac_core::{calendar::selected_days, models::WeekdaySet};
///
/// let days = WeekdaySet::from_indexes([7, 1])?;
/// assert_eq!(selected_days(days, None), vec!["Monday", "Sunday"]);
/// # Result::<(), almanac_core::AlmanacError>::Ok(())
/// ```
pub fn selected_days(set: WeekdaySet, names: Option<&dyn DayNames>) -> Vec<String> {
    let rotation = week_rotation(names);
    set.iter()
        .map(|day| rotation[usize::from(day - 1)].clone())
        .collect()
}

/// Monday through Friday.
pub fn weekday_names(names: Option<&dyn DayNames>) -> Vec<String> {
    preset_names(Preset::Weekdays, names)
}

/// Saturday and Sunday.
pub fn weekend_names(names: Option<&dyn DayNames>) -> Vec<String> {
    preset_names(Preset::Weekends, names)
}

fn preset_names(preset: Preset, names: Option<&dyn DayNames>) -> Vec<String> {
    selected_days(preset.days(), names)
}

/// Whether a list of day names is exactly a preset.
///
/// Comparison is order-sensitive against the Monday-first rotation, so a
/// reordered list does not match. Compare [`WeekdaySet`]s when order should
/// not matter.
pub fn is_selected(preset: Preset, selection: &[String], names: Option<&dyn DayNames>) -> bool {
    let expected = preset_names(preset, names);
    selection.len() == expected.len() && selection == expected.as_slice()
}

/// Maps day names back to the canonical set.
///
/// # Errors
///
/// Returns `AlmanacError::InvalidInput` for a name that is not in the
/// rotation.
pub fn day_indexes(selection: &[String], names: Option<&dyn DayNames>) -> Result<WeekdaySet> {
    let rotation = week_rotation(names);
    let indexes = selection
        .iter()
        .map(|name| {
            rotation
                .iter()
                .position(|candidate| candidate.eq_ignore_ascii_case(name))
                .map(|i| i as u8 + 1)
                .ok_or_else(|| {
                    AlmanacError::invalid_input("weekdays")
                        .with_reason(format!("Unknown day name: {name}"))
                })
        })
        .collect::<Result<Vec<u8>>>()?;
    WeekdaySet::from_indexes(indexes)
}

/// Date of the reference week for a 1-based ISO day.
pub(crate) fn reference_date(day: u8) -> Date {
    REFERENCE_MONDAY
        .checked_add(jiff::Span::new().days(i64::from(day) - 1))
        .unwrap_or(REFERENCE_MONDAY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn days(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_english_rotation_starts_monday() {
        assert_eq!(
            week_rotation(None),
            days(&[
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
                "Sunday"
            ])
        );
    }

    #[test]
    fn test_weekdays_and_weekends_partition_the_week() {
        let weekdays = weekday_names(None);
        let weekends = weekend_names(None);

        assert!(weekdays.iter().all(|d| !weekends.contains(d)));
        let mut union = weekdays.clone();
        union.extend(weekends);
        assert_eq!(union, week_rotation(None));
    }

    #[test]
    fn test_translated_names() {
        let swedish = TableDayNames::swedish();
        assert_eq!(
            weekend_names(Some(&swedish)),
            days(&["lördag", "söndag"])
        );
        assert_eq!(
            selected_days(WeekdaySet::from_indexes([1]).unwrap(), Some(&swedish)),
            days(&["måndag"])
        );
        assert_eq!(TableDayNames::for_locale("sv-SE"), Some(swedish));
        assert_eq!(TableDayNames::for_locale("en"), None);
    }

    #[test]
    fn test_closure_formatter() {
        let short = |d: Date| d.strftime("%a").to_string();
        assert_eq!(
            weekday_names(Some(&short)),
            days(&["Mon", "Tue", "Wed", "Thu", "Fri"])
        );
    }

    #[test]
    fn test_is_selected_is_order_sensitive() {
        let weekdays = weekday_names(None);
        assert!(is_selected(Preset::Weekdays, &weekdays, None));
        assert!(!is_selected(Preset::Weekends, &weekdays, None));

        let mut reversed = weekdays.clone();
        reversed.reverse();
        assert!(!is_selected(Preset::Weekdays, &reversed, None));

        assert!(!is_selected(Preset::Weekdays, &weekdays[..4], None));
    }

    #[test]
    fn test_is_selected_with_translation() {
        let swedish = TableDayNames::swedish();
        let selection = weekend_names(Some(&swedish));
        assert!(is_selected(Preset::Weekends, &selection, Some(&swedish)));
        assert!(!is_selected(Preset::Weekends, &selection, None));
    }

    #[test]
    fn test_selected_days_round_trip() {
        let swedish = TableDayNames::swedish();
        for bits in 0..=0b0111_1111u8 {
            let set = WeekdaySet::from_bits(bits).unwrap();
            for formatter in [None, Some(&swedish as &dyn DayNames)] {
                let names = selected_days(set, formatter);
                let back = day_indexes(&names, formatter).unwrap();
                assert_eq!(back, set);
                assert_eq!(selected_days(back, formatter), names);
            }
        }
    }

    #[test]
    fn test_day_indexes_rejects_unknown_names() {
        assert!(day_indexes(&days(&["Funday"]), None).is_err());
        assert_eq!(
            day_indexes(&days(&["sunday", "MONDAY"]), None).unwrap(),
            WeekdaySet::from_indexes([1, 7]).unwrap()
        );
    }
}
