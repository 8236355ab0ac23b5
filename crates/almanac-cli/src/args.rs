//! Command-line interface definitions using clap.
//!
//! Argument structs carry the clap attributes and convert into the core
//! parameter types, so core types stay free of CLI concerns:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Store / Wizard
//! ```

use std::path::PathBuf;

use almanac_core::{
    calendar::week_rotation,
    models::{Advanced, Method, MethodValue, Preset, ThermostatValue, TriggerKind, WeekdaySet},
    params::{AgendaQuery, Id, SelectTime},
    WizardStep,
};
use anyhow::{anyhow, bail, Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use jiff::Timestamp;

/// Recurring schedules for home-automation devices.
///
/// Import a device registry and job listing, browse the weekly agenda, and
/// build or edit schedules one wizard step at a time. The wizard session is
/// kept in the database between invocations.
#[derive(Parser)]
#[command(version, about, name = "alm")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/almanac/almanac.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Seconds to wait for a submission before giving up
    #[arg(long, global = true, default_value_t = 30)]
    pub submit_timeout: u64,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import gateways, devices and jobs from a JSON snapshot
    #[command(alias = "i")]
    Import(ImportArgs),
    /// Show stored jobs grouped by day
    #[command(alias = "a")]
    Agenda(AgendaArgs),
    /// List devices and the actions they can be scheduled with
    #[command(alias = "d")]
    Devices {
        #[command(subcommand)]
        command: Option<DeviceCommands>,
    },
    /// List gateways with their time zone and sun events
    Gateways,
    /// Inspect and delete stored schedules
    #[command(alias = "j")]
    Jobs {
        #[command(subcommand)]
        command: JobCommands,
    },
    /// Build or edit a schedule step by step
    #[command(alias = "s")]
    Schedule {
        #[command(subcommand)]
        command: ScheduleCommands,
    },
}

/// Import a snapshot file
///
/// The file holds `gateways`, `devices` and `jobs` arrays in the shape the
/// remote listing returns them. Records with known IDs are replaced.
#[derive(ClapArgs)]
pub struct ImportArgs {
    /// Snapshot JSON file, or `-` for standard input
    pub file: PathBuf,
}

/// Show the agenda
///
/// Buckets run from today through the next six days, followed by next week's
/// occurrence of jobs that already fired today.
#[derive(ClapArgs)]
pub struct AgendaArgs {
    /// Include inactive schedules
    #[arg(long, alias = "show-inactive")]
    pub all: bool,
    /// Partition as of this RFC 3339 instant instead of now
    #[arg(long)]
    pub now: Option<Timestamp>,
    /// Print the buckets as JSON
    #[arg(long)]
    pub json: bool,
}

impl From<&AgendaArgs> for AgendaQuery {
    fn from(val: &AgendaArgs) -> Self {
        AgendaQuery {
            show_inactive: val.all,
            now: val.now,
        }
    }
}

#[derive(Subcommand)]
pub enum DeviceCommands {
    /// List all devices
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show the actions a device can be scheduled with
    Actions(IdArgs),
}

#[derive(Subcommand)]
pub enum JobCommands {
    /// List all stored schedules
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show one schedule
    #[command(alias = "s")]
    Show(IdArgs),
    /// Delete a schedule permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteJobArgs),
}

#[derive(ClapArgs)]
pub struct IdArgs {
    #[arg(help = "Unique identifier of the record")]
    pub id: u64,
}

impl From<IdArgs> for Id {
    fn from(val: IdArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(ClapArgs)]
pub struct DeleteJobArgs {
    #[arg(help = "Unique identifier of the schedule to delete")]
    pub id: u64,
    /// Confirm the deletion
    #[arg(long)]
    pub confirm: bool,
}

#[derive(Subcommand)]
pub enum ScheduleCommands {
    /// Start a new schedule, discarding any session in progress
    New,
    /// Start editing a stored schedule
    Edit(IdArgs),
    /// Choose the device
    Device(IdArgs),
    /// List the actions the chosen device supports
    Actions,
    /// Choose the action, optionally with its value
    Action(ActionArgs),
    /// Choose the trigger time
    Time(TimeArgs),
    /// Choose the days the schedule repeats on
    Days(DaysArgs),
    /// Set whether the schedule is active
    Active(ActiveArgs),
    /// Set retry and repetition settings
    Advanced(AdvancedArgs),
    /// Jump to a step (edit mode only)
    Goto(GotoArgs),
    /// Return to the summary without changes (edit mode only)
    Back,
    /// Show the session in progress
    #[command(alias = "status")]
    Show,
    /// Print the payload that would be submitted, as JSON
    Payload,
    /// Save the schedule
    Submit,
    /// Abandon the session
    Cancel,
}

/// Choose an action
///
/// Dim, color and thermostat actions take a value. Without one the wizard
/// moves to the matching sub-step and waits for it.
#[derive(ClapArgs)]
pub struct ActionArgs {
    /// Action name (on, off, bell, dim, up, down, stop, rgb, thermostat) or code
    pub method: Method,
    /// Dim level 0-255
    #[arg(long, conflicts_with_all = ["color", "mode", "temperature"])]
    pub level: Option<u8>,
    /// Colour as #RRGGBB
    #[arg(long, conflicts_with_all = ["mode", "temperature"])]
    pub color: Option<String>,
    /// Thermostat mode to switch to
    #[arg(long)]
    pub mode: Option<String>,
    /// Thermostat target temperature
    #[arg(long)]
    pub temperature: Option<f64>,
}

impl ActionArgs {
    /// The value carried by the flags, if any.
    pub fn value(&self) -> Option<MethodValue> {
        if let Some(level) = self.level {
            return Some(MethodValue::Dim(level));
        }
        if let Some(color) = &self.color {
            return Some(MethodValue::Color(color.clone()));
        }
        if self.mode.is_none() && self.temperature.is_none() {
            return None;
        }
        Some(MethodValue::Thermostat(ThermostatValue {
            mode: self.mode.clone().unwrap_or_default(),
            temperature: self.temperature,
            change_mode: self.mode.is_some(),
            change_temp: self.temperature.is_some(),
        }))
    }
}

/// Choose a trigger
///
/// Either a wall-clock time (`07:30`) or an offset in minutes from sunrise
/// or sunset (`--sunset -30`).
#[derive(ClapArgs)]
pub struct TimeArgs {
    /// Time of day as HH:MM
    #[arg(required_unless_present_any = ["sunrise", "sunset"])]
    pub at: Option<String>,
    /// Minutes relative to sunrise
    #[arg(long, allow_negative_numbers = true, conflicts_with_all = ["at", "sunset"])]
    pub sunrise: Option<i32>,
    /// Minutes relative to sunset
    #[arg(long, allow_negative_numbers = true, conflicts_with = "at")]
    pub sunset: Option<i32>,
    /// Minutes of random jitter
    #[arg(long, default_value_t = 0)]
    pub random: u32,
}

impl TryFrom<TimeArgs> for SelectTime {
    type Error = anyhow::Error;

    fn try_from(val: TimeArgs) -> Result<Self> {
        let select = match (val.at, val.sunrise, val.sunset) {
            (Some(at), None, None) => {
                let (hour, minute) = parse_clock(&at)?;
                SelectTime::at(hour, minute)
            }
            (None, Some(offset), None) => SelectTime::sun(TriggerKind::Sunrise, offset),
            (None, None, Some(offset)) => SelectTime::sun(TriggerKind::Sunset, offset),
            _ => bail!("Give exactly one of a time, --sunrise or --sunset"),
        };
        Ok(select.with_random_interval(val.random))
    }
}

fn parse_clock(value: &str) -> Result<(u8, u8)> {
    let (hour, minute) = value
        .split_once(':')
        .ok_or_else(|| anyhow!("Expected HH:MM, got '{value}'"))?;
    let hour = hour
        .trim()
        .parse()
        .with_context(|| format!("Invalid hour in '{value}'"))?;
    let minute = minute
        .trim()
        .parse()
        .with_context(|| format!("Invalid minute in '{value}'"))?;
    Ok((hour, minute))
}

/// Choose days
///
/// Days are ISO numbers (1 = Monday) or English names, which may be
/// abbreviated to three letters.
#[derive(ClapArgs)]
pub struct DaysArgs {
    /// Days, comma or space separated
    #[arg(value_delimiter = ',', required_unless_present_any = ["weekdays", "weekends", "every_day"])]
    pub days: Vec<String>,
    /// Monday through Friday
    #[arg(long, conflicts_with_all = ["days", "weekends", "every_day"])]
    pub weekdays: bool,
    /// Saturday and Sunday
    #[arg(long, conflicts_with_all = ["days", "every_day"])]
    pub weekends: bool,
    /// All seven days
    #[arg(long, conflicts_with = "days")]
    pub every_day: bool,
}

impl TryFrom<DaysArgs> for WeekdaySet {
    type Error = anyhow::Error;

    fn try_from(val: DaysArgs) -> Result<Self> {
        if val.weekdays {
            return Ok(Preset::Weekdays.days());
        }
        if val.weekends {
            return Ok(Preset::Weekends.days());
        }
        if val.every_day {
            return Ok(WeekdaySet::ALL);
        }
        let indexes = val
            .days
            .iter()
            .map(|day| parse_day(day))
            .collect::<Result<Vec<u8>>>()?;
        Ok(WeekdaySet::from_indexes(indexes)?)
    }
}

fn parse_day(value: &str) -> Result<u8> {
    let value = value.trim();
    if let Ok(index) = value.parse::<u8>() {
        return Ok(index);
    }
    let lower = value.to_lowercase();
    week_rotation(None)
        .iter()
        .position(|name| {
            let name = name.to_lowercase();
            name == lower || (lower.len() >= 3 && name.starts_with(&lower))
        })
        .map(|i| i as u8 + 1)
        .ok_or_else(|| anyhow!("Unknown day '{value}'"))
}

#[derive(ClapArgs)]
pub struct ActiveArgs {
    #[arg(value_enum)]
    pub state: ActiveState,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ActiveState {
    On,
    Off,
}

impl From<ActiveState> for bool {
    fn from(val: ActiveState) -> Self {
        val == ActiveState::On
    }
}

/// Retry and repetition settings
///
/// Interpreted by the device's execution engine; omitted flags keep their
/// current values.
#[derive(ClapArgs)]
pub struct AdvancedArgs {
    /// Retries after a failed execution
    #[arg(long)]
    pub retries: Option<u32>,
    /// Minutes between retries
    #[arg(long)]
    pub retry_interval: Option<u32>,
    /// Times the action is repeated
    #[arg(long)]
    pub reps: Option<u32>,
}

impl AdvancedArgs {
    pub fn apply_to(&self, current: Advanced) -> Advanced {
        Advanced {
            retries: self.retries.unwrap_or(current.retries),
            retry_interval: self.retry_interval.unwrap_or(current.retry_interval),
            reps: self.reps.unwrap_or(current.reps),
        }
    }
}

#[derive(ClapArgs)]
pub struct GotoArgs {
    /// Step to visit: action, time, days or summary
    pub step: WizardStep,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_clock() {
        assert_eq!(parse_clock("07:30").unwrap(), (7, 30));
        assert!(parse_clock("0730").is_err());
        assert!(parse_clock("ab:30").is_err());
    }

    #[test]
    fn test_parse_day_names_and_numbers() {
        assert_eq!(parse_day("3").unwrap(), 3);
        assert_eq!(parse_day("Monday").unwrap(), 1);
        assert_eq!(parse_day("sun").unwrap(), 7);
        assert!(parse_day("mo").is_err());
        assert!(parse_day("someday").is_err());
    }

    #[test]
    fn test_time_args_conversion() {
        let args = TimeArgs {
            at: None,
            sunrise: None,
            sunset: Some(-30),
            random: 5,
        };
        let select = SelectTime::try_from(args).unwrap();
        assert_eq!(select.kind, TriggerKind::Sunset);
        assert_eq!(select.offset, Some(-30));
        assert_eq!(select.random_interval, 5);
    }

    #[test]
    fn test_action_args_value() {
        let args = ActionArgs {
            method: Method::Thermostat,
            level: None,
            color: None,
            mode: None,
            temperature: Some(20.0),
        };
        match args.value() {
            Some(MethodValue::Thermostat(value)) => {
                assert!(!value.change_mode);
                assert!(value.change_temp);
            }
            other => panic!("unexpected value: {other:?}"),
        }
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
