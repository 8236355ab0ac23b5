//! Core library for the almanac device scheduler.
//!
//! The crate covers three concerns of a home-automation schedule front end:
//!
//! - **Day and time derivation** ([`calendar`]): the instant a job fires on
//!   its gateway's clock, sun-relative offsets, and locale day names.
//! - **Agenda partitioning** ([`agenda`]): sorting a job listing into
//!   today, the six following days, and next week.
//! - **The schedule wizard** ([`wizard`]): a step-by-step session that
//!   assembles a draft, validates it against the device's capabilities, and
//!   submits it through a [`ScheduleApi`].
//!
//! [`ScheduleStore`] ties these to a local SQLite database holding the
//! imported device registry, the schedules, and the in-progress wizard
//! session.
//!
//! # Display Architecture
//!
//! Domain models implement [`std::fmt::Display`] as markdown; the
//! [`display`] module adds collection and result wrappers. The CLI renders
//! the markdown in the terminal.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use almanac_core::{
//!     models::{Method, MethodValue, WeekdaySet},
//!     params::{Id, SelectTime},
//!     ScheduleStoreBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = ScheduleStoreBuilder::new()
//!     .with_database_path(Some("almanac.db"))
//!     .build()
//!     .await?;
//!
//! let device = store.get_device(&Id { id: 10 }).await?.ok_or("no device")?;
//! let mut wizard = store.start_session().await?;
//! wizard.select_device(&device)?;
//! wizard.select_action(Method::Dim, Some(MethodValue::Dim(128)))?;
//! wizard.select_time(&SelectTime::at(7, 30))?;
//! wizard.select_days(WeekdaySet::WEEKDAYS)?;
//! store.save_session(&wizard).await?;
//!
//! let id = store.submit_session().await?;
//! println!("Saved schedule {id}");
//! # Ok(())
//! # }
//! ```

pub mod agenda;
pub mod api;
pub mod calendar;
pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod params;
pub mod store;
pub mod wizard;

// Re-export commonly used types
pub use agenda::{partition_jobs, Agenda, AgendaEntry};
pub use api::ScheduleApi;
pub use db::Database;
pub use display::{
    Actions, CreateResult, DeleteResult, Devices, Gateways, Jobs, OperationStatus, UpdateResult,
};
pub use error::{AlmanacError, Result};
pub use models::{
    Capability, Device, Gateway, Job, Method, MethodValue, SaveResponse, SchedulePayload,
    Snapshot, Trigger, TriggerKind, WeekdaySet,
};
pub use params::{AgendaQuery, Id, SelectTime};
pub use store::{ScheduleStore, ScheduleStoreBuilder};
pub use wizard::{ScheduleWizard, WizardMode, WizardStep};
