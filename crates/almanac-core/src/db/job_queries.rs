//! Schedule (job) CRUD operations.

use rusqlite::{params, types::Type, Connection, OptionalExtension};
use serde_json::Value;

use crate::{
    error::{DatabaseResultExt, Result},
    models::{Job, SchedulePayload, TriggerKind},
};

const JOB_COLUMNS: &str = "id, device_id, method, method_value, trigger_type, hour, minute, sun_offset, random_interval, retries, retry_interval, reps, active, weekdays";
const INSERT_JOB_SQL: &str = "INSERT INTO jobs (device_id, method, method_value, trigger_type, hour, minute, sun_offset, random_interval, retries, retry_interval, reps, active, weekdays) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)";
const UPDATE_JOB_SQL: &str = "UPDATE jobs SET device_id = ?1, method = ?2, method_value = ?3, trigger_type = ?4, hour = ?5, minute = ?6, sun_offset = ?7, random_interval = ?8, retries = ?9, retry_interval = ?10, reps = ?11, active = ?12, weekdays = ?13 WHERE id = ?14";
const REPLACE_JOB_SQL: &str = "INSERT OR REPLACE INTO jobs (id, device_id, method, method_value, trigger_type, hour, minute, sun_offset, random_interval, retries, retry_interval, reps, active, weekdays) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)";
const DELETE_JOB_SQL: &str = "DELETE FROM jobs WHERE id = ?1";

/// Column values shared by inserts and updates of a submitted schedule.
struct PayloadColumns {
    method_value: Option<String>,
    weekdays: String,
    hour: i64,
    minute: i64,
    offset: i64,
}

impl PayloadColumns {
    fn from_payload(payload: &SchedulePayload) -> Result<Self> {
        Ok(Self {
            method_value: payload
                .method_value
                .as_ref()
                .map(serde_json::to_string)
                .transpose()?,
            weekdays: serde_json::to_string(&payload.weekdays)?,
            hour: payload.hour.map_or(0, i64::from),
            minute: payload.minute.map_or(0, i64::from),
            offset: payload.offset.map_or(0, i64::from),
        })
    }
}

impl super::Database {
    /// Stores a new schedule and returns its ID.
    pub fn insert_job(&mut self, payload: &SchedulePayload) -> Result<u64> {
        let columns = PayloadColumns::from_payload(payload)?;
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(
            INSERT_JOB_SQL,
            params![
                payload.device_id as i64,
                i64::from(payload.method.code()),
                columns.method_value,
                payload.kind.as_str(),
                columns.hour,
                columns.minute,
                columns.offset,
                i64::from(payload.random_interval),
                i64::from(payload.retries),
                i64::from(payload.retry_interval),
                i64::from(payload.reps),
                payload.active,
                columns.weekdays,
            ],
        )
        .db_context("Failed to insert schedule")?;
        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(id)
    }

    /// Replaces a stored schedule. Returns `false` when no schedule has `id`.
    pub fn update_job(&mut self, id: u64, payload: &SchedulePayload) -> Result<bool> {
        let columns = PayloadColumns::from_payload(payload)?;
        let changed = self
            .connection
            .execute(
                UPDATE_JOB_SQL,
                params![
                    payload.device_id as i64,
                    i64::from(payload.method.code()),
                    columns.method_value,
                    payload.kind.as_str(),
                    columns.hour,
                    columns.minute,
                    columns.offset,
                    i64::from(payload.random_interval),
                    i64::from(payload.retries),
                    i64::from(payload.retry_interval),
                    i64::from(payload.reps),
                    payload.active,
                    columns.weekdays,
                    id as i64,
                ],
            )
            .db_context("Failed to update schedule")?;
        Ok(changed > 0)
    }

    pub fn get_job(&self, id: u64) -> Result<Option<Job>> {
        self.connection
            .query_row(
                &format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = ?1"),
                params![id as i64],
                build_job_from_row,
            )
            .optional()
            .db_context("Failed to query schedule")
    }

    /// All stored schedules, oldest first.
    pub fn list_jobs(&self) -> Result<Vec<Job>> {
        let mut stmt = self
            .connection
            .prepare(&format!("SELECT {JOB_COLUMNS} FROM jobs ORDER BY id"))
            .db_context("Failed to prepare query")?;
        let jobs = stmt
            .query_map([], build_job_from_row)
            .db_context("Failed to query schedules")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read schedules")?;
        Ok(jobs)
    }

    /// Removes a schedule. Returns `false` when no schedule has `id`.
    pub fn delete_job(&mut self, id: u64) -> Result<bool> {
        let deleted = self
            .connection
            .execute(DELETE_JOB_SQL, params![id as i64])
            .db_context("Failed to delete schedule")?;
        Ok(deleted > 0)
    }
}

/// Inserts or replaces an imported job under its own ID.
pub(super) fn upsert_job(conn: &Connection, job: &Job) -> Result<()> {
    let method_value = job.method_value.as_ref().map(Value::to_string);
    let weekdays = job
        .weekdays
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?;

    conn.execute(
        REPLACE_JOB_SQL,
        params![
            job.id as i64,
            job.device_id as i64,
            i64::from(job.method),
            method_value,
            job.kind.as_str(),
            i64::from(job.hour),
            i64::from(job.minute),
            i64::from(job.offset),
            i64::from(job.random_interval),
            i64::from(job.retries),
            i64::from(job.retry_interval),
            i64::from(job.reps),
            job.active,
            weekdays,
        ],
    )
    .db_context("Failed to store schedule")?;
    Ok(())
}

fn build_job_from_row(row: &rusqlite::Row) -> rusqlite::Result<Job> {
    let kind_str: String = row.get(4)?;
    let kind = kind_str.parse::<TriggerKind>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            4,
            Type::Text,
            Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, e)),
        )
    })?;
    let method_value = row
        .get::<_, Option<String>>(3)?
        .map(|s| serde_json::from_str::<Value>(&s))
        .transpose()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;
    let weekdays = row
        .get::<_, Option<String>>(13)?
        .map(|s| serde_json::from_str::<Vec<i64>>(&s))
        .transpose()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(13, Type::Text, Box::new(e)))?;

    Ok(Job {
        id: row.get::<_, i64>(0)? as u64,
        device_id: row.get::<_, i64>(1)? as u64,
        method: row.get::<_, i64>(2)? as u32,
        method_value,
        kind,
        hour: row.get::<_, i64>(5)? as u8,
        minute: row.get::<_, i64>(6)? as u8,
        offset: row.get::<_, i64>(7)? as i32,
        random_interval: row.get::<_, i64>(8)? as u32,
        retries: row.get::<_, i64>(9)? as u32,
        retry_interval: row.get::<_, i64>(10)? as u32,
        reps: row.get::<_, i64>(11)? as u32,
        active: row.get(12)?,
        weekdays,
    })
}
