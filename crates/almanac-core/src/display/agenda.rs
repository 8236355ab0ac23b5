//! Display for the partitioned job agenda.

use std::fmt;

use super::models::fmt_job_action;
use crate::{
    agenda::{Agenda, AgendaEntry, NEXT_WEEK, TODAY},
    calendar::week_rotation,
};

impl fmt::Display for Agenda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "No scheduled jobs.");
        }

        let rotation = week_rotation(None);
        let day_name =
            |index: u8| self.bucket_day(index).map(|day| rotation[usize::from(day - 1)].clone());

        for (index, entries) in self.sections() {
            // Without a shared gateway date only relative labels are safe.
            match (index, day_name(index)) {
                (TODAY, Some(day)) => writeln!(f, "## Today ({day})")?,
                (TODAY, None) => writeln!(f, "## Today")?,
                (NEXT_WEEK, Some(day)) => writeln!(f, "## Next week ({day})")?,
                (NEXT_WEEK, None) => writeln!(f, "## Next week")?,
                (_, Some(day)) => writeln!(f, "## {day}")?,
                (1, None) => writeln!(f, "## Tomorrow")?,
                (_, None) => writeln!(f, "## In {index} days")?,
            }
            writeln!(f)?;
            for entry in entries {
                write!(f, "{entry}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for AgendaEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "- **{:02}:{:02}** ",
            self.effective.hour, self.effective.minute
        )?;
        fmt_job_action(f, &self.job)?;
        write!(
            f,
            " on device {} (schedule {})",
            self.job.device_id, self.job.id
        )?;
        if self.expired {
            write!(f, " _passed_")?;
        }
        if !self.job.active {
            write!(f, " _inactive_")?;
        }
        writeln!(f)
    }
}
