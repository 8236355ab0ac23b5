//! Calendar-style partitioning of persisted jobs.
//!
//! [`partition_jobs`] sorts a job listing into eight buckets for display:
//!
//! ```text
//!  0        1 .. 6                 7
//!  today    days ahead of today    today, next week
//! ```
//!
//! "Today" is the weekday in each job's gateway time zone, not the caller's.
//! A job due today whose trigger has already passed shows up twice: in
//! bucket 0 marked `expired`, and in bucket 7 as next week's occurrence.
//!
//! Jobs that cannot be placed (dangling device or gateway references,
//! unreadable weekdays, unknown time zones) are skipped and logged at debug
//! level. Callers must not assume every input job appears in the output.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use jiff::Timestamp;
use log::debug;
use serde::{ser::SerializeStruct, Serialize, Serializer};

use crate::{
    calendar::{iso_weekday, minutes_since_midnight, trigger_instant},
    models::{Device, Gateway, Job},
};

#[cfg(test)]
mod tests;

/// Bucket holding today's jobs.
pub const TODAY: u8 = 0;

/// Bucket holding next week's occurrence of jobs that already fired today.
pub const NEXT_WEEK: u8 = 7;

/// The hour and minute a job fires on its gateway's local clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct EffectiveTime {
    pub hour: u8,
    pub minute: u8,
}

impl EffectiveTime {
    pub fn of(zoned: &jiff::Zoned) -> Self {
        Self {
            hour: zoned.hour() as u8,
            minute: zoned.minute() as u8,
        }
    }

    pub fn minutes(self) -> u16 {
        u16::from(self.hour) * 60 + u16::from(self.minute)
    }
}

// Serialised as zero-padded strings, matching what list views display.
impl Serialize for EffectiveTime {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("EffectiveTime", 2)?;
        state.serialize_field("effectiveHour", &format!("{:02}", self.hour))?;
        state.serialize_field("effectiveMinute", &format!("{:02}", self.minute))?;
        state.end()
    }
}

/// One placement of a job in a bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgendaEntry {
    #[serde(flatten)]
    pub job: Job,
    #[serde(flatten)]
    pub effective: EffectiveTime,
    /// Due today but already passed
    pub expired: bool,
}

/// Jobs grouped into the eight display buckets.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Agenda {
    /// All eight buckets, each sorted by effective time
    pub buckets: BTreeMap<u8, Vec<AgendaEntry>>,
    /// Indexes of non-empty buckets in ascending order
    pub section_ids: Vec<u8>,
    /// Gateway-local ISO weekday of "now", for labelling buckets. `None` when
    /// nothing was placed or the gateways disagree on the date.
    pub reference_day: Option<u8>,
}

impl Agenda {
    fn empty() -> Self {
        Self {
            buckets: (TODAY..=NEXT_WEEK).map(|i| (i, Vec::new())).collect(),
            section_ids: Vec::new(),
            reference_day: None,
        }
    }

    pub fn bucket(&self, index: u8) -> &[AgendaEntry] {
        self.buckets.get(&index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Non-empty buckets in display order.
    pub fn sections(&self) -> impl Iterator<Item = (u8, &[AgendaEntry])> + '_ {
        self.section_ids.iter().map(|&i| (i, self.bucket(i)))
    }

    /// ISO weekday a bucket stands for, relative to [`Agenda::reference_day`].
    pub fn bucket_day(&self, index: u8) -> Option<u8> {
        self.reference_day.map(|today| (today + index % 7 - 1) % 7 + 1)
    }

    /// Total number of placements across all buckets.
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.section_ids.is_empty()
    }

    fn push(&mut self, index: u8, entry: AgendaEntry) {
        self.buckets.entry(index).or_default().push(entry);
    }
}

/// Partitions jobs into today, the six following days, and next week.
///
/// # Examples
///
/// ```rust
/// use almanac_core::{agenda::partition_jobs, models::{index_by_id, Snapshot}};
///
/// let snapshot: Snapshot = serde_json::from_str(r#"{
///     "gateways": [{"id": 1, "timezone": "UTC", "sunrise": 1717394400, "sunset": 1717448400}],
///     "devices": [{"id": 10, "clientId": 1, "supportedMethods": 3}],
///     "jobs": [{"id": 5, "deviceId": 10, "method": 1, "type": "time",
///               "hour": 8, "minute": 0, "active": true, "weekdays": "1,3"}]
/// }"#)?;
/// let devices = index_by_id(snapshot.devices);
/// let gateways = index_by_id(snapshot.gateways);
///
/// // 2024-06-03 is a Monday
/// let now = "2024-06-03T07:00:00Z".parse()?;
/// let agenda = partition_jobs(&snapshot.jobs, &devices, &gateways, false, now);
/// assert_eq!(agenda.section_ids, vec![0, 2]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn partition_jobs(
    jobs: &[Job],
    devices: &HashMap<u64, Device>,
    gateways: &HashMap<u64, Gateway>,
    show_inactive: bool,
    now: Timestamp,
) -> Agenda {
    let mut agenda = Agenda::empty();
    let mut local_days = BTreeSet::new();

    for job in jobs {
        let Some(device) = devices.get(&job.device_id) else {
            debug!("Skipping job {}: unknown device {}", job.id, job.device_id);
            continue;
        };
        let Some(gateway) = gateways.get(&device.client_id) else {
            debug!("Skipping job {}: unknown gateway {}", job.id, device.client_id);
            continue;
        };
        let instant = match trigger_instant(job, gateway, now) {
            Ok(instant) => instant,
            Err(e) => {
                debug!("Skipping job {}: {}", job.id, e);
                continue;
            }
        };
        if !show_inactive && !job.active {
            continue;
        }
        let Some(days) = job.weekday_set() else {
            debug!("Skipping job {}: unreadable weekdays {:?}", job.id, job.weekdays);
            continue;
        };

        let local_now = now.to_zoned(instant.time_zone().clone());
        let today = iso_weekday(&local_now);
        local_days.insert(today);
        let effective = EffectiveTime::of(&instant);
        let entry = |expired| AgendaEntry {
            job: job.clone(),
            effective,
            expired,
        };

        for day in days.iter() {
            if day != today {
                agenda.push((7 + day - today) % 7, entry(false));
            } else if effective.minutes() >= minutes_since_midnight(&local_now) {
                agenda.push(TODAY, entry(false));
            } else {
                agenda.push(TODAY, entry(true));
                agenda.push(NEXT_WEEK, entry(false));
            }
        }
    }

    for bucket in agenda.buckets.values_mut() {
        bucket.sort_by_key(|entry| entry.effective.minutes());
    }
    agenda.section_ids = agenda
        .buckets
        .iter()
        .filter(|(_, entries)| !entries.is_empty())
        .map(|(&i, _)| i)
        .collect();
    if local_days.len() == 1 {
        agenda.reference_day = local_days.pop_first();
    }
    agenda
}
