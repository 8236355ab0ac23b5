//! SQLite storage for the device registry, schedules and the wizard session.
//!
//! All methods are blocking; [`crate::store::ScheduleStore`] runs them on the
//! blocking thread pool.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod job_queries;
pub mod migrations;
pub mod registry_queries;
pub mod session_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens (or creates) the database and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
