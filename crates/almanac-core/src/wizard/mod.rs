//! The schedule wizard: an owned session that assembles a [`ScheduleDraft`].
//!
//! # Steps
//!
//! ```text
//! Device ─▶ Action ─▶ Time ─▶ Days ─▶ Summary ─▶ submit / cancel
//!             │  ▲
//!             ▼  │
//!      ActionDim | ActionThermostat | ActionRgb
//! ```
//!
//! In **create** mode the wizard starts on `Device` and only moves forward;
//! each select advances to the next step. The one way back is choosing
//! another device, which any step before `Summary` accepts. Choosing an action that needs a
//! value without supplying one moves into the matching action sub-step.
//!
//! In **edit** mode the wizard is seeded from a persisted job and starts on
//! `Summary`. [`ScheduleWizard::goto`] visits the action, time or days step,
//! every successful select returns straight to `Summary`, and
//! [`ScheduleWizard::return_to_caller`] leaves any step without changes. The
//! device of an existing schedule cannot be changed.
//!
//! Rejected input never moves the wizard.

mod select;
mod submit;


use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    error::{AlmanacError, Result},
    models::{
        check_random_interval, Advanced, Capability, Device, Job, Method, MethodValue,
        ScheduleDraft, WeekdaySet,
    },
};

/// A node of the wizard's step graph.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum WizardStep {
    Device,
    Action,
    ActionDim,
    ActionThermostat,
    ActionRgb,
    Time,
    Days,
    Summary,
}

impl WizardStep {
    pub fn as_str(self) -> &'static str {
        match self {
            WizardStep::Device => "device",
            WizardStep::Action => "action",
            WizardStep::ActionDim => "action-dim",
            WizardStep::ActionThermostat => "action-thermostat",
            WizardStep::ActionRgb => "action-rgb",
            WizardStep::Time => "time",
            WizardStep::Days => "days",
            WizardStep::Summary => "summary",
        }
    }

    /// Whether this is the action step or one of its value sub-steps.
    pub fn is_action(self) -> bool {
        matches!(
            self,
            WizardStep::Action
                | WizardStep::ActionDim
                | WizardStep::ActionThermostat
                | WizardStep::ActionRgb
        )
    }

    /// The sub-step collecting the value for `method`, if it takes one.
    pub fn for_value_of(method: Method) -> Option<Self> {
        match method {
            Method::Dim => Some(WizardStep::ActionDim),
            Method::Thermostat => Some(WizardStep::ActionThermostat),
            Method::Rgb => Some(WizardStep::ActionRgb),
            _ => None,
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WizardStep {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "device" => Ok(WizardStep::Device),
            "action" => Ok(WizardStep::Action),
            "action-dim" | "dim" => Ok(WizardStep::ActionDim),
            "action-thermostat" | "thermostat" => Ok(WizardStep::ActionThermostat),
            "action-rgb" | "rgb" | "color" => Ok(WizardStep::ActionRgb),
            "time" => Ok(WizardStep::Time),
            "days" => Ok(WizardStep::Days),
            "summary" => Ok(WizardStep::Summary),
            _ => Err(format!("Invalid wizard step: {s}")),
        }
    }
}

/// Whether the session creates a new schedule or edits a persisted one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum WizardMode {
    Create,
    Edit {
        #[serde(rename = "jobId")]
        job_id: u64,
    },
}

/// One wizard session.
///
/// The session exclusively owns its draft. It is serialisable so a front end
/// can persist it between interactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleWizard {
    mode: WizardMode,
    step: WizardStep,
    capability: Option<Capability>,
    draft: ScheduleDraft,
    /// Message from the last failed submission, shown on the summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_error: Option<String>,
}

impl Default for ScheduleWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleWizard {
    /// A fresh create-mode session on the device step.
    pub fn new() -> Self {
        Self {
            mode: WizardMode::Create,
            step: WizardStep::Device,
            capability: None,
            draft: ScheduleDraft::default(),
            last_error: None,
        }
    }

    /// An edit-mode session seeded from a persisted job.
    ///
    /// # Errors
    ///
    /// Returns `AlmanacError::InvalidInput` when the job does not belong to
    /// `device`, has an unknown method code, an unreadable method value or an
    /// invalid trigger.
    pub fn edit(job: &Job, device: &Device) -> Result<Self> {
        if job.device_id != device.id {
            return Err(AlmanacError::invalid_input("device_id").with_reason(format!(
                "Schedule {} belongs to device {}, not {}",
                job.id, job.device_id, device.id
            )));
        }
        let method = job.method().ok_or_else(|| {
            AlmanacError::invalid_input("method")
                .with_reason(format!("Unknown method code {}", job.method))
        })?;
        let method_value = match &job.method_value {
            Some(value) => MethodValue::from_wire(method, value)?,
            None => None,
        };

        let draft = ScheduleDraft {
            device_id: Some(device.id),
            method: Some(method),
            method_value,
            trigger: Some(job.trigger()?),
            random_interval: check_random_interval(job.random_interval)?,
            weekdays: job.weekday_set().unwrap_or(WeekdaySet::EMPTY),
            active: job.active,
            advanced: Advanced {
                retries: job.retries,
                retry_interval: job.retry_interval,
                reps: job.reps,
            },
        };

        Ok(Self {
            mode: WizardMode::Edit { job_id: job.id },
            step: WizardStep::Summary,
            capability: device.capability(),
            draft,
            last_error: None,
        })
    }

    pub fn mode(&self) -> WizardMode {
        self.mode
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Category of the selected device, if any.
    pub fn capability(&self) -> Option<Capability> {
        self.capability
    }

    pub fn draft(&self) -> &ScheduleDraft {
        &self.draft
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, WizardMode::Edit { .. })
    }

    /// Restores the defaults: create mode, device step, empty draft.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Abandons the session. The draft is discarded.
    pub fn cancel(&mut self) {
        log::info!("Schedule wizard cancelled on the {} step", self.step);
        self.reset();
    }

    /// Jumps to a step of an edit session.
    ///
    /// Only the action, time, days and summary steps can be visited directly;
    /// action sub-steps are reached by choosing an action.
    ///
    /// # Errors
    ///
    /// Returns `AlmanacError::WrongStep` in create mode, which only moves
    /// forward, and `AlmanacError::InvalidInput` for a step that cannot be
    /// visited.
    pub fn goto(&mut self, step: WizardStep) -> Result<()> {
        if !self.is_editing() {
            return Err(AlmanacError::WrongStep {
                step: self.step,
                operation: "jump between steps",
            });
        }
        match step {
            WizardStep::Action | WizardStep::Time | WizardStep::Days | WizardStep::Summary => {
                self.step = step;
                Ok(())
            }
            other => Err(AlmanacError::invalid_input("step")
                .with_reason(format!("The {other} step cannot be visited directly"))),
        }
    }

    /// Leaves the current step of an edit session without changes.
    ///
    /// # Errors
    ///
    /// Returns `AlmanacError::WrongStep` in create mode.
    pub fn return_to_caller(&mut self) -> Result<()> {
        if !self.is_editing() {
            return Err(AlmanacError::WrongStep {
                step: self.step,
                operation: "return to the summary",
            });
        }
        self.step = WizardStep::Summary;
        Ok(())
    }

    /// Records the schedule's active flag.
    pub fn set_active_state(&mut self, active: bool) {
        self.draft.active = active;
    }

    /// Records retry and repetition settings.
    pub fn set_advanced(&mut self, advanced: Advanced) {
        self.draft.advanced = advanced;
    }

    fn require_step(&self, allowed: fn(WizardStep) -> bool, operation: &'static str) -> Result<()> {
        if allowed(self.step) {
            Ok(())
        } else {
            Err(AlmanacError::WrongStep {
                step: self.step,
                operation,
            })
        }
    }

    /// Moves on after a successful select: the next step when creating, back
    /// to the summary when editing.
    fn advance(&mut self, next: WizardStep) {
        self.step = match self.mode {
            WizardMode::Create => next,
            WizardMode::Edit { .. } => WizardStep::Summary,
        };
    }
}
