//! Data models for schedules, devices and gateways.
//!
//! This module contains the core domain types of the almanac: the action and
//! capability vocabulary, the canonical weekday set, trigger descriptors, the
//! in-progress [`ScheduleDraft`], persisted [`Job`]s and the registries they
//! reference. Display implementations live in [`crate::display::models`].
//!
//! # Representations
//!
//! Each concept has exactly one internal representation, converted at the
//! boundary:
//!
//! - **Actions**: [`Method`], serialised as its integer code
//! - **Device categories**: [`Capability`], classified from the
//!   supported-methods bitmask
//! - **Days**: [`WeekdaySet`], serialised as a 1-based index list
//! - **Trigger**: [`Trigger`], so hour/minute and offset cannot coexist
//!
//! # Examples
//!
//! ```rust
//! use almanac_core::models::{Capability, Method, WeekdaySet};
//!
//! let actions = Capability::Dimmer.actions();
//! assert_eq!(actions, &[Method::On, Method::Off, Method::Dim]);
//!
//! let days = WeekdaySet::from_indexes([6, 7])?;
//! assert_eq!(days, WeekdaySet::WEEKENDS);
//! # Result::<(), almanac_core::AlmanacError>::Ok(())
//! ```

pub mod capability;
pub mod draft;
pub mod job;
pub mod method;
pub mod payload;
pub mod trigger;
pub mod weekdays;


pub use capability::{available_actions, Capability};
pub use draft::{Advanced, MethodValue, ScheduleDraft, ThermostatValue};
pub use job::{index_by_id, Device, Gateway, Identified, ImportSummary, Job, Snapshot};
pub use method::Method;
pub use payload::{SaveResponse, SchedulePayload, DEFAULT_REJECTION_MESSAGE};
pub use trigger::{
    check_random_interval, Trigger, TriggerKind, MAX_OFFSET_MINUTES, MAX_RANDOM_INTERVAL,
};
pub use weekdays::{Preset, WeekdaySet};
