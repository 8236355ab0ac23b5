//! Persistence for the single wizard session.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, Result},
    wizard::ScheduleWizard,
};

const SELECT_SESSION_SQL: &str = "SELECT state FROM wizard_session WHERE id = 1";
const SAVE_SESSION_SQL: &str = "INSERT INTO wizard_session (id, state, updated_at) VALUES (1, ?1, ?2)
     ON CONFLICT(id) DO UPDATE SET state = excluded.state, updated_at = excluded.updated_at";
const DELETE_SESSION_SQL: &str = "DELETE FROM wizard_session WHERE id = 1";

impl super::Database {
    /// The stored session, if one is in progress.
    pub fn load_session(&self) -> Result<Option<ScheduleWizard>> {
        let state: Option<String> = self
            .connection
            .query_row(SELECT_SESSION_SQL, [], |row| row.get(0))
            .optional()
            .db_context("Failed to query wizard session")?;

        Ok(state
            .map(|s| serde_json::from_str::<ScheduleWizard>(&s))
            .transpose()?)
    }

    pub fn save_session(&self, wizard: &ScheduleWizard) -> Result<()> {
        let state = serde_json::to_string(wizard)?;
        self.connection
            .execute(SAVE_SESSION_SQL, params![state, Timestamp::now().to_string()])
            .db_context("Failed to save wizard session")?;
        Ok(())
    }

    /// Discards the stored session. Returns `false` when there was none.
    pub fn clear_session(&self) -> Result<bool> {
        let deleted = self
            .connection
            .execute(DELETE_SESSION_SQL, [])
            .db_context("Failed to clear wizard session")?;
        Ok(deleted > 0)
    }
}
