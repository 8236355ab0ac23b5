//! Display implementations for domain models.
//!
//! Output is markdown so the CLI can hand it to a terminal renderer as-is.
//! Job and wizard summaries share one bullet layout.

use std::fmt;

use super::datetime::GatewayTime;
use crate::{
    calendar::selected_days,
    models::{
        Capability, Device, Gateway, Job, Method, MethodValue, Preset, ThermostatValue, Trigger,
        TriggerKind, WeekdaySet,
    },
    wizard::{ScheduleWizard, WizardMode, WizardStep},
};

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Capability::Toggle => "on/off",
            Capability::Dimmer => "dimmer",
            Capability::Navigational => "up/down",
            Capability::Bell => "bell",
            Capability::Rgb => "color",
            Capability::Thermostat => "thermostat",
        })
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Trigger::Time { hour, minute } => write!(f, "{hour:02}:{minute:02}"),
            Trigger::Sunrise { offset } => fmt_sun(f, "Sunrise", offset),
            Trigger::Sunset { offset } => fmt_sun(f, "Sunset", offset),
        }
    }
}

fn fmt_sun(f: &mut fmt::Formatter<'_>, event: &str, offset: i32) -> fmt::Result {
    match offset {
        0 => f.write_str(event),
        o if o > 0 => write!(f, "{event} + {o} min"),
        o => write!(f, "{event} - {} min", o.unsigned_abs()),
    }
}

impl fmt::Display for WeekdaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("No days");
        }
        if *self == WeekdaySet::ALL {
            return f.write_str("Every day");
        }
        match self.preset() {
            Some(Preset::Weekdays) => f.write_str("Weekdays"),
            Some(Preset::Weekends) => f.write_str("Weekends"),
            None => f.write_str(&selected_days(*self, None).join(", ")),
        }
    }
}

impl fmt::Display for ThermostatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.change_mode {
            parts.push(format!("mode {}", self.mode));
        }
        if let Some(temperature) = self.temperature.filter(|_| self.change_temp) {
            parts.push(format!("{temperature:.1}°"));
        }
        if parts.is_empty() {
            f.write_str("no change")
        } else {
            f.write_str(&parts.join(", "))
        }
    }
}

impl fmt::Display for MethodValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MethodValue::Dim(level) => {
                write!(f, "{level} ({}%)", (u32::from(*level) * 100 + 127) / 255)
            }
            MethodValue::Color(color) => f.write_str(color),
            MethodValue::Thermostat(value) => write!(f, "{value}"),
        }
    }
}

/// `Dim 128 (50%)` or `Turn on`.
fn fmt_action(
    f: &mut fmt::Formatter<'_>,
    method: Option<Method>,
    value: Option<&MethodValue>,
) -> fmt::Result {
    match (method, value) {
        (Some(method), Some(value)) => write!(f, "{method} {value}"),
        (Some(method), None) => write!(f, "{method}"),
        (None, _) => f.write_str("(not chosen)"),
    }
}

/// A stored job's action. Values that no longer decode are left out.
pub(super) fn fmt_job_action(f: &mut fmt::Formatter<'_>, job: &Job) -> fmt::Result {
    match job.method() {
        Some(method) => {
            let value = job
                .method_value
                .as_ref()
                .and_then(|v| MethodValue::from_wire(method, v).ok().flatten());
            fmt_action(f, Some(method), value.as_ref())
        }
        None => write!(f, "Unknown action ({})", job.method),
    }
}

impl fmt::Display for Gateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.name.is_empty() {
            "Unnamed gateway"
        } else {
            self.name.as_str()
        };
        writeln!(f, "## {}. {}", self.id, name)?;
        writeln!(f)?;
        writeln!(f, "- Time zone: {}", self.timezone)?;
        writeln!(f, "- Sunrise: {}", GatewayTime::new(self.sunrise, &self.timezone))?;
        writeln!(f, "- Sunset: {}", GatewayTime::new(self.sunset, &self.timezone))?;
        writeln!(f)
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- **{}** {} (gateway {}", self.id, self.name, self.client_id)?;
        match self.capability() {
            Some(capability) => writeln!(f, ", {capability})"),
            None => writeln!(f, ", no schedulable actions)"),
        }
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### Schedule {} (device {})", self.id, self.device_id)?;
        writeln!(f)?;

        write!(f, "- Action: ")?;
        fmt_job_action(f, self)?;
        writeln!(f)?;

        match self.trigger() {
            Ok(trigger) => writeln!(f, "- Time: {trigger}")?,
            Err(_) => writeln!(f, "- Time: invalid ({})", self.kind)?,
        }
        if self.random_interval > 0 {
            writeln!(f, "- Random interval: ±{} min", self.random_interval)?;
        }
        match self.weekday_set() {
            Some(days) => writeln!(f, "- Days: {days}")?,
            None => writeln!(f, "- Days: unreadable")?,
        }
        writeln!(f, "- Active: {}", if self.active { "yes" } else { "no" })?;
        writeln!(
            f,
            "- Retries: {} every {} min, {} repetition(s)",
            self.retries, self.retry_interval, self.reps
        )?;
        writeln!(f)
    }
}

impl fmt::Display for ScheduleWizard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode() {
            WizardMode::Create => writeln!(f, "# New schedule")?,
            WizardMode::Edit { job_id } => writeln!(f, "# Editing schedule {job_id}")?,
        }
        writeln!(f)?;
        writeln!(f, "Current step: **{}**", self.step())?;
        writeln!(f, "{}", step_hint(self))?;
        writeln!(f)?;

        let draft = self.draft();
        match (draft.device_id, self.capability()) {
            (Some(id), Some(capability)) => writeln!(f, "- Device: {id} ({capability})")?,
            (Some(id), None) => writeln!(f, "- Device: {id}")?,
            (None, _) => writeln!(f, "- Device: (not chosen)")?,
        }
        write!(f, "- Action: ")?;
        fmt_action(f, draft.method, draft.method_value.as_ref())?;
        writeln!(f)?;
        match &draft.trigger {
            Some(trigger) => writeln!(f, "- Time: {trigger}")?,
            None => writeln!(f, "- Time: (not chosen)")?,
        }
        if draft.random_interval > 0 {
            writeln!(f, "- Random interval: ±{} min", draft.random_interval)?;
        }
        writeln!(f, "- Days: {}", draft.weekdays)?;
        writeln!(f, "- Active: {}", if draft.active { "yes" } else { "no" })?;
        let advanced = draft.advanced;
        writeln!(
            f,
            "- Retries: {} every {} min, {} repetition(s)",
            advanced.retries, advanced.retry_interval, advanced.reps
        )?;

        if let Some(error) = self.last_error() {
            writeln!(f)?;
            writeln!(f, "**Last submission failed:** {error}")?;
        }
        Ok(())
    }
}

fn step_hint(wizard: &ScheduleWizard) -> &'static str {
    match wizard.step() {
        WizardStep::Device => "Choose a device with `schedule device <ID>`.",
        WizardStep::Action => "Choose an action with `schedule action <METHOD>`.",
        WizardStep::ActionDim => "Give a dim level with `schedule action dim --level <0-255>`.",
        WizardStep::ActionRgb => "Give a colour with `schedule action rgb --color <#RRGGBB>`.",
        WizardStep::ActionThermostat => {
            "Give a mode or temperature with `schedule action thermostat`."
        }
        WizardStep::Time => "Choose a trigger with `schedule time`.",
        WizardStep::Days => "Choose the days with `schedule days`.",
        WizardStep::Summary if wizard.is_editing() => {
            "Submit with `schedule submit` or change a part with `schedule goto`."
        }
        WizardStep::Summary => "Submit with `schedule submit`.",
    }
}
