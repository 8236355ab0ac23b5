//! Gateway and device registry queries, and snapshot import.

use rusqlite::{params, Connection, OptionalExtension};

use super::job_queries::upsert_job;
use crate::{
    error::{DatabaseResultExt, Result},
    models::{Device, Gateway, ImportSummary, Snapshot},
};

const UPSERT_GATEWAY_SQL: &str = "INSERT INTO gateways (id, name, timezone, sunrise, sunset) VALUES (?1, ?2, ?3, ?4, ?5)
     ON CONFLICT(id) DO UPDATE SET name = excluded.name, timezone = excluded.timezone,
     sunrise = excluded.sunrise, sunset = excluded.sunset";
const UPSERT_DEVICE_SQL: &str = "INSERT INTO devices (id, name, client_id, supported_methods) VALUES (?1, ?2, ?3, ?4)
     ON CONFLICT(id) DO UPDATE SET name = excluded.name, client_id = excluded.client_id,
     supported_methods = excluded.supported_methods";
const SELECT_GATEWAYS_SQL: &str = "SELECT id, name, timezone, sunrise, sunset FROM gateways";
const SELECT_DEVICES_SQL: &str = "SELECT id, name, client_id, supported_methods FROM devices";

impl super::Database {
    /// Writes a snapshot's gateways, devices and jobs in one transaction.
    ///
    /// Existing records with the same IDs are replaced.
    pub fn import_snapshot(&mut self, snapshot: &Snapshot) -> Result<ImportSummary> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        for gateway in &snapshot.gateways {
            upsert_gateway(&tx, gateway)?;
        }
        for device in &snapshot.devices {
            upsert_device(&tx, device)?;
        }
        for job in &snapshot.jobs {
            upsert_job(&tx, job)?;
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(ImportSummary {
            gateways: snapshot.gateways.len(),
            devices: snapshot.devices.len(),
            jobs: snapshot.jobs.len(),
        })
    }

    pub fn get_gateway(&self, id: u64) -> Result<Option<Gateway>> {
        self.connection
            .query_row(
                &format!("{SELECT_GATEWAYS_SQL} WHERE id = ?1"),
                params![id as i64],
                build_gateway_from_row,
            )
            .optional()
            .db_context("Failed to query gateway")
    }

    pub fn list_gateways(&self) -> Result<Vec<Gateway>> {
        let mut stmt = self
            .connection
            .prepare(&format!("{SELECT_GATEWAYS_SQL} ORDER BY id"))
            .db_context("Failed to prepare query")?;
        let gateways = stmt
            .query_map([], build_gateway_from_row)
            .db_context("Failed to query gateways")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read gateways")?;
        Ok(gateways)
    }

    pub fn get_device(&self, id: u64) -> Result<Option<Device>> {
        self.connection
            .query_row(
                &format!("{SELECT_DEVICES_SQL} WHERE id = ?1"),
                params![id as i64],
                build_device_from_row,
            )
            .optional()
            .db_context("Failed to query device")
    }

    pub fn list_devices(&self) -> Result<Vec<Device>> {
        let mut stmt = self
            .connection
            .prepare(&format!("{SELECT_DEVICES_SQL} ORDER BY id"))
            .db_context("Failed to prepare query")?;
        let devices = stmt
            .query_map([], build_device_from_row)
            .db_context("Failed to query devices")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read devices")?;
        Ok(devices)
    }
}

fn upsert_gateway(conn: &Connection, gateway: &Gateway) -> Result<()> {
    conn.execute(
        UPSERT_GATEWAY_SQL,
        params![
            gateway.id as i64,
            gateway.name,
            gateway.timezone,
            gateway.sunrise,
            gateway.sunset
        ],
    )
    .db_context("Failed to store gateway")?;
    Ok(())
}

fn upsert_device(conn: &Connection, device: &Device) -> Result<()> {
    conn.execute(
        UPSERT_DEVICE_SQL,
        params![
            device.id as i64,
            device.name,
            device.client_id as i64,
            i64::from(device.supported_methods)
        ],
    )
    .db_context("Failed to store device")?;
    Ok(())
}

fn build_gateway_from_row(row: &rusqlite::Row) -> rusqlite::Result<Gateway> {
    Ok(Gateway {
        id: row.get::<_, i64>(0)? as u64,
        name: row.get(1)?,
        timezone: row.get(2)?,
        sunrise: row.get(3)?,
        sunset: row.get(4)?,
    })
}

fn build_device_from_row(row: &rusqlite::Row) -> rusqlite::Result<Device> {
    Ok(Device {
        id: row.get::<_, i64>(0)? as u64,
        name: row.get(1)?,
        client_id: row.get::<_, i64>(2)? as u64,
        supported_methods: row.get::<_, i64>(3)? as u32,
    })
}
