//! Canonical weekday representation.
//!
//! Days are identified by their ISO index (Monday = 1 ... Sunday = 7) and
//! stored as a 7-bit set. Translated day names only exist at the display
//! boundary, see [`crate::calendar`].

use serde::{Deserialize, Serialize};

use crate::error::{AlmanacError, Result};

/// Named day selections offered by the days step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Monday through Friday
    Weekdays,
    /// Saturday and Sunday
    Weekends,
}

impl Preset {
    /// The set of days this preset selects.
    pub fn days(self) -> WeekdaySet {
        match self {
            Preset::Weekdays => WeekdaySet::WEEKDAYS,
            Preset::Weekends => WeekdaySet::WEEKENDS,
        }
    }
}

/// Set of ISO weekdays a schedule repeats on.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(into = "Vec<u8>", try_from = "Vec<u8>")]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    const MASK: u8 = 0b0111_1111;

    /// No days selected.
    pub const EMPTY: WeekdaySet = WeekdaySet(0);
    /// Monday through Friday.
    pub const WEEKDAYS: WeekdaySet = WeekdaySet(0b0001_1111);
    /// Saturday and Sunday.
    pub const WEEKENDS: WeekdaySet = WeekdaySet(0b0110_0000);
    /// Every day of the week.
    pub const ALL: WeekdaySet = WeekdaySet(Self::MASK);

    /// Builds a set from 1-based ISO day indexes.
    ///
    /// # Errors
    ///
    /// Returns `AlmanacError::InvalidInput` if an index is outside 1..=7.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use almanac_core::models::WeekdaySet;
    ///
    /// let set = WeekdaySet::from_indexes([5, 1, 3])?;
    /// assert_eq!(set.indexes(), vec![1, 3, 5]);
    /// assert!(WeekdaySet::from_indexes([0]).is_err());
    /// # Result::<(), almanac_core::AlmanacError>::Ok(())
    /// ```
    pub fn from_indexes<I>(indexes: I) -> Result<Self>
    where
        I: IntoIterator<Item = u8>,
    {
        indexes.into_iter().try_fold(Self::EMPTY, |set, day| {
            if (1..=7).contains(&day) {
                Ok(WeekdaySet(set.0 | (1 << (day - 1))))
            } else {
                Err(AlmanacError::invalid_input("weekdays")
                    .with_reason(format!("Day index {day} is outside 1..=7")))
            }
        })
    }

    /// Builds a set from its bit representation (bit 0 = Monday).
    pub fn from_bits(bits: u8) -> Result<Self> {
        if bits & !Self::MASK != 0 {
            return Err(AlmanacError::invalid_input("weekdays")
                .with_reason(format!("Bitmask {bits:#010b} has bits beyond Sunday")));
        }
        Ok(WeekdaySet(bits))
    }

    /// Lenient conversion for weekday lists received from the remote API.
    ///
    /// Returns `None` when the list is missing, empty, or holds an index
    /// outside 1..=7.
    pub fn from_wire(days: Option<&[i64]>) -> Option<Self> {
        let days = days?;
        let indexes = days
            .iter()
            .map(|&d| u8::try_from(d).ok())
            .collect::<Option<Vec<u8>>>()?;
        let set = Self::from_indexes(indexes).ok()?;
        (!set.is_empty()).then_some(set)
    }

    /// Raw bit representation.
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Sorted 1-based ISO day indexes.
    pub fn indexes(self) -> Vec<u8> {
        self.iter().collect()
    }

    /// Iterates the selected 1-based day indexes in ascending order.
    pub fn iter(self) -> impl Iterator<Item = u8> {
        (1..=7u8).filter(move |&day| self.contains(day))
    }

    pub fn contains(self, day: u8) -> bool {
        (1..=7).contains(&day) && (self.0 & (1 << (day - 1))) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// The preset this set equals, if any.
    pub fn preset(self) -> Option<Preset> {
        match self {
            Self::WEEKDAYS => Some(Preset::Weekdays),
            Self::WEEKENDS => Some(Preset::Weekends),
            _ => None,
        }
    }
}

impl From<WeekdaySet> for Vec<u8> {
    fn from(set: WeekdaySet) -> Self {
        set.indexes()
    }
}

impl TryFrom<Vec<u8>> for WeekdaySet {
    type Error = AlmanacError;

    fn try_from(indexes: Vec<u8>) -> Result<Self> {
        Self::from_indexes(indexes)
    }
}

impl From<Preset> for WeekdaySet {
    fn from(preset: Preset) -> Self {
        preset.days()
    }
}
