use almanac_core::{models::Snapshot, ScheduleStore, ScheduleStoreBuilder};
use serde_json::json;
use tempfile::TempDir;

/// Helper function to create a test store
pub async fn create_test_store() -> (TempDir, ScheduleStore) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let store = ScheduleStoreBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create store");
    (temp_dir, store)
}

/// One UTC gateway with a dimmer, a thermostat and a set of blinds.
///
/// Sun events are for Monday 2024-06-03: sunrise 06:00, sunset 21:00.
#[allow(dead_code)]
pub fn create_test_snapshot() -> Snapshot {
    serde_json::from_value(json!({
        "gateways": [
            {"id": 1, "name": "Home", "timezone": "UTC",
             "sunrise": 1717394400, "sunset": 1717448400}
        ],
        "devices": [
            {"id": 10, "name": "Hall dimmer", "clientId": 1, "supportedMethods": 19},
            {"id": 20, "name": "Radiator", "clientId": 1, "supportedMethods": 2048},
            {"id": 30, "name": "Blinds", "clientId": 1, "supportedMethods": 896}
        ],
        "jobs": [
            {"id": 1, "deviceId": 30, "method": 128, "type": "sunrise", "offset": 15,
             "active": true, "weekdays": "1,2,3,4,5,6,7"}
        ]
    }))
    .expect("snapshot should deserialize")
}
