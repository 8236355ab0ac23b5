//! Device capability categories and the actions a schedule may use for each.

use serde::{Deserialize, Serialize};

use super::Method;

/// Category of a device, derived from its supported-methods bitmask.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Toggle,
    Dimmer,
    Navigational,
    Bell,
    Rgb,
    Thermostat,
}

impl Capability {
    /// Classifies a supported-methods mask into a single category.
    ///
    /// Devices advertise overlapping bits (an RGB lamp also dims and toggles),
    /// so the most specific category is tested first.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use almanac_core::models::Capability;
    ///
    /// assert_eq!(Capability::classify(1 | 2), Some(Capability::Toggle));
    /// assert_eq!(Capability::classify(1 | 2 | 16), Some(Capability::Dimmer));
    /// assert_eq!(Capability::classify(0), None);
    /// ```
    pub fn classify(supported_methods: u32) -> Option<Self> {
        if Method::Thermostat.is_in(supported_methods) {
            Some(Capability::Thermostat)
        } else if Method::Rgb.is_in(supported_methods) {
            Some(Capability::Rgb)
        } else if Method::Dim.is_in(supported_methods) {
            Some(Capability::Dimmer)
        } else if [Method::Up, Method::Down, Method::Stop]
            .into_iter()
            .any(|m| m.is_in(supported_methods))
        {
            Some(Capability::Navigational)
        } else if Method::Bell.is_in(supported_methods) {
            Some(Capability::Bell)
        } else if Method::On.is_in(supported_methods) || Method::Off.is_in(supported_methods) {
            Some(Capability::Toggle)
        } else {
            None
        }
    }

    /// Actions a schedule may perform on a device of this category.
    pub fn actions(self) -> &'static [Method] {
        match self {
            Capability::Toggle => &[Method::On, Method::Off],
            Capability::Dimmer => &[Method::On, Method::Off, Method::Dim],
            Capability::Navigational => &[Method::Up, Method::Down, Method::Stop],
            Capability::Bell => &[Method::Bell],
            Capability::Rgb => &[Method::On, Method::Off, Method::Dim, Method::Rgb],
            Capability::Thermostat => &[Method::Thermostat],
        }
    }

    /// Whether `method` is one of this category's actions.
    pub fn supports(self, method: Method) -> bool {
        self.actions().contains(&method)
    }
}

/// Action list for an optional capability; empty when the device has none.
pub fn available_actions(capability: Option<Capability>) -> Vec<Method> {
    capability
        .map(|c| c.actions().to_vec())
        .unwrap_or_default()
}
