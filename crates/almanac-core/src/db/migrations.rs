//! Database schema initialization and migrations.

use crate::error::{AlmanacError, DatabaseResultExt, Result};

/// Version stamped into `PRAGMA user_version`. Bump it together with a new
/// step in `apply_migrations`.
pub(super) const SCHEMA_VERSION: i64 = 1;

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.apply_migrations()?;

        Ok(())
    }

    /// Apply database migrations for existing databases
    fn apply_migrations(&self) -> Result<()> {
        let version: i64 = self
            .connection
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .db_context("Failed to read schema version")?;

        if version > SCHEMA_VERSION {
            return Err(AlmanacError::Configuration {
                message: format!(
                    "Database schema version {version} is newer than supported version {SCHEMA_VERSION}"
                ),
            });
        }

        if version < SCHEMA_VERSION {
            log::info!("Stamping schema version {SCHEMA_VERSION} (was {version})");
            self.connection
                .pragma_update(None, "user_version", SCHEMA_VERSION)
                .db_context("Failed to record schema version")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use tempfile::TempDir;

    use super::SCHEMA_VERSION;
    use crate::{db::Database, error::AlmanacError};

    fn user_version(path: &std::path::Path) -> i64 {
        Connection::open(path)
            .unwrap()
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn test_new_database_is_stamped() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("almanac.db");

        drop(Database::new(&path).unwrap());
        assert_eq!(user_version(&path), SCHEMA_VERSION);

        // Opening again is a no-op.
        drop(Database::new(&path).unwrap());
        assert_eq!(user_version(&path), SCHEMA_VERSION);
    }

    #[test]
    fn test_newer_schema_is_refused() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("almanac.db");
        Connection::open(&path)
            .unwrap()
            .pragma_update(None, "user_version", SCHEMA_VERSION + 1)
            .unwrap();

        assert!(matches!(
            Database::new(&path),
            Err(AlmanacError::Configuration { .. })
        ));
    }
}
