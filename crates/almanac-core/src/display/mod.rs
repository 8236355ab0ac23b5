//! Display formatting for domain models and operation results.
//!
//! Domain models implement `Display` directly; collections and operation
//! outcomes are wrapped in newtypes that add headings and empty-state
//! messages. Everything renders as markdown, which the CLI passes through a
//! terminal renderer.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrappers and    │    │   Markdown      │
//! │  (Job, Agenda)  │───▶│ Result Types    │───▶│    Output       │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrappers (Jobs, Devices, Gateways, Actions)
//! - [`results`]: Operation results (CreateResult, UpdateResult, DeleteResult)
//! - [`status`]: One-line confirmations (OperationStatus)
//! - [`datetime`]: Instants on a gateway's clock
//! - [`models`]: Display implementations for domain models and the wizard
//! - [`agenda`]: The bucketed job agenda
//!
//! ## Usage Examples
//!
//! ```rust
//! use almanac_core::{display::OperationStatus, wizard::ScheduleWizard};
//!
//! let wizard = ScheduleWizard::new();
//! assert!(wizard.to_string().contains("Current step: **device**"));
//!
//! let status = OperationStatus::success("Session cancelled");
//! assert_eq!(status.to_string(), "Success: Session cancelled\n");
//! ```

pub mod agenda;
pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{Actions, Devices, Gateways, Jobs};
pub use datetime::GatewayTime;
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
