//! Collection wrapper types for displaying groups of domain objects.
//!
//! Each wrapper handles the empty case with its own message so callers can
//! print the result without checking first.

use std::{fmt, ops::Index};

use crate::models::{Device, Gateway, Job, Method};

/// Newtype wrapper for displaying a list of schedules.
///
/// # Examples
///
/// ```rust
/// use almanac_core::display::Jobs;
///
/// let jobs = Jobs(vec![]);
/// assert_eq!(jobs.to_string(), "No schedules found.\n");
/// ```
pub struct Jobs(pub Vec<Job>);

impl Jobs {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, index: usize) -> Option<&Job> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Job> {
        self.0.iter()
    }
}

impl Index<usize> for Jobs {
    type Output = Job;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for Jobs {
    type Item = Job;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Jobs {
    type Item = &'a Job;
    type IntoIter = std::slice::Iter<'a, Job>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Jobs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No schedules found.")
        } else {
            for job in &self.0 {
                write!(f, "{job}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying the device registry.
pub struct Devices(pub Vec<Device>);

impl Devices {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for Devices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No devices found.");
        }
        for device in &self.0 {
            write!(f, "{device}")?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying the gateway registry.
pub struct Gateways(pub Vec<Gateway>);

impl fmt::Display for Gateways {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No gateways found.");
        }
        for gateway in &self.0 {
            write!(f, "{gateway}")?;
        }
        Ok(())
    }
}

/// The actions offered for a device, one per line with their CLI name.
pub struct Actions(pub Vec<Method>);

impl fmt::Display for Actions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "This device has no schedulable actions.");
        }
        for method in &self.0 {
            write!(f, "- `{}` {method}", method.as_str())?;
            if method.requires_value() {
                write!(f, " (takes a value)")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
