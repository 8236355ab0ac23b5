//! Step selections.

use super::{ScheduleWizard, WizardStep};
use crate::{
    error::{AlmanacError, Result},
    models::{
        available_actions, check_random_interval, Device, Method, MethodValue, Preset, Trigger,
        TriggerKind, WeekdaySet,
    },
    params::SelectTime,
};

impl ScheduleWizard {
    /// Chooses the target device and moves to the action step.
    ///
    /// A create session may switch devices on any step before the summary.
    /// Any previously chosen action is cleared since the action set differs
    /// per device.
    ///
    /// # Errors
    ///
    /// Returns `AlmanacError::InvalidInput` when editing, where the device is
    /// fixed, and `AlmanacError::WrongStep` on the summary step.
    pub fn select_device(&mut self, device: &Device) -> Result<()> {
        if self.is_editing() {
            return Err(AlmanacError::invalid_input("device_id")
                .with_reason("The device of an existing schedule cannot be changed"));
        }
        self.require_step(|s| s != WizardStep::Summary, "select a device")?;

        self.draft.device_id = Some(device.id);
        self.draft.method = None;
        self.draft.method_value = None;
        self.capability = device.capability();
        self.advance(WizardStep::Action);
        Ok(())
    }

    /// Actions offered for the selected device.
    pub fn available_actions(&self) -> Vec<Method> {
        available_actions(self.capability)
    }

    /// Chooses the action and its value.
    ///
    /// A method that takes a value but is given none moves to the matching
    /// sub-step without recording anything; call again with the value.
    ///
    /// # Errors
    ///
    /// Returns `AlmanacError::InvalidInput` when the device supports no
    /// actions, the method is not offered for it, or the value is missing,
    /// malformed or belongs to another method.
    pub fn select_action(&mut self, method: Method, value: Option<MethodValue>) -> Result<()> {
        self.require_step(WizardStep::is_action, "choose an action")?;

        let capability = self.capability.ok_or_else(|| {
            AlmanacError::invalid_input("method")
                .with_reason("The selected device does not support any actions")
        })?;
        if !capability.supports(method) {
            return Err(AlmanacError::invalid_input("method").with_reason(format!(
                "{} is not available for a {} device",
                method.label(),
                capability
            )));
        }

        let value = match (value, WizardStep::for_value_of(method)) {
            (None, Some(sub_step)) => {
                self.step = sub_step;
                return Ok(());
            }
            (Some(value), Some(_)) if value.method() == method => Some(value.validated()?),
            (Some(value), Some(_)) => {
                return Err(AlmanacError::invalid_input("method_value").with_reason(format!(
                    "A {} value was given for {}",
                    value.method().label(),
                    method.label()
                )))
            }
            (Some(_), None) => {
                return Err(AlmanacError::invalid_input("method_value")
                    .with_reason(format!("{} does not take a value", method.label())))
            }
            (None, None) => None,
        };

        self.draft.method = Some(method);
        self.draft.method_value = value;
        self.advance(WizardStep::Time);
        Ok(())
    }

    /// Chooses the trigger and random interval.
    ///
    /// Fixed-time triggers drop any offset; sun triggers drop hour and minute.
    ///
    /// # Errors
    ///
    /// Returns `AlmanacError::InvalidInput` when a field required by the
    /// trigger kind is missing or any value is out of range.
    pub fn select_time(&mut self, params: &SelectTime) -> Result<()> {
        self.require_step(|s| s == WizardStep::Time, "choose a time")?;

        let trigger = match params.kind {
            TriggerKind::Time => match (params.hour, params.minute) {
                (Some(hour), Some(minute)) => Trigger::at(hour, minute)?,
                _ => {
                    return Err(AlmanacError::invalid_input("hour")
                        .with_reason("A fixed-time trigger needs both hour and minute"))
                }
            },
            kind => {
                let offset = params.offset.ok_or_else(|| {
                    AlmanacError::invalid_input("offset")
                        .with_reason(format!("A {} trigger needs an offset", kind.as_str()))
                })?;
                Trigger::sun(kind, offset)?
            }
        };
        let random_interval = check_random_interval(params.random_interval)?;

        self.draft.trigger = Some(trigger);
        self.draft.random_interval = random_interval;
        self.advance(WizardStep::Days);
        Ok(())
    }

    /// Chooses the days the schedule repeats on.
    ///
    /// # Errors
    ///
    /// Returns `AlmanacError::InvalidInput` for an empty selection.
    pub fn select_days(&mut self, days: WeekdaySet) -> Result<()> {
        self.require_step(|s| s == WizardStep::Days, "choose days")?;
        if days.is_empty() {
            return Err(AlmanacError::invalid_input("weekdays")
                .with_reason("Select at least one day"));
        }

        self.draft.weekdays = days;
        self.advance(WizardStep::Summary);
        Ok(())
    }

    /// Whether the selected days are exactly a preset.
    pub fn is_preset(&self, preset: Preset) -> bool {
        self.draft.weekdays == preset.days()
    }
}
