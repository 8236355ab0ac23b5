//! Tests for the store module.

use std::time::Duration;

use serde_json::json;
use tempfile::TempDir;

use super::*;
use crate::{
    api::ScheduleApi,
    models::{Device, Method, MethodValue, SaveResponse, Snapshot, WeekdaySet},
    params::{AgendaQuery, Id, SelectTime},
    wizard::{ScheduleWizard, WizardStep},
};

/// Helper function to create a test store
async fn create_test_store() -> (TempDir, ScheduleStore) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let store = ScheduleStoreBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create store");
    (temp_dir, store)
}

fn create_test_snapshot() -> Snapshot {
    serde_json::from_value(json!({
        "gateways": [
            {"id": 1, "name": "Home", "timezone": "UTC",
             "sunrise": 1717394400, "sunset": 1717448400}
        ],
        "devices": [
            {"id": 10, "name": "Hall dimmer", "clientId": 1, "supportedMethods": 19},
            {"id": 11, "name": "Doorbell", "clientId": 1, "supportedMethods": 4},
            {"id": 12, "name": "Orphan", "clientId": 99, "supportedMethods": 3}
        ],
        "jobs": [
            {"id": 100, "deviceId": 10, "method": 16, "methodValue": "128", "type": "time",
             "hour": 7, "minute": 15, "active": true, "weekdays": "1,2,3,4,5",
             "retries": 3, "retryInterval": 5, "reps": 1},
            {"id": 101, "deviceId": 11, "method": 4, "type": "sunset", "offset": -30,
             "active": false, "weekdays": [6, 7]},
            {"id": 102, "deviceId": 12, "method": 1, "type": "time",
             "hour": 12, "minute": 0, "active": true, "weekdays": [1]}
        ]
    }))
    .expect("snapshot should deserialize")
}

#[tokio::test]
async fn test_builder_rejects_zero_timeout() {
    let temp_dir = TempDir::new().unwrap();
    let result = ScheduleStoreBuilder::new()
        .with_database_path(Some(temp_dir.path().join("x.db")))
        .with_submit_timeout(Duration::ZERO)
        .build()
        .await;
    assert!(matches!(result, Err(AlmanacError::Configuration { .. })));
}

#[tokio::test]
async fn test_builder_creates_parent_directories() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("nested").join("dir").join("almanac.db");
    let store = ScheduleStoreBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .unwrap();

    assert!(db_path.exists());
    assert_eq!(store.database_path(), db_path.as_path());
    assert_eq!(store.submit_timeout(), DEFAULT_SUBMIT_TIMEOUT);
}

#[tokio::test]
async fn test_import_round_trips_snapshot() {
    let (_temp_dir, store) = create_test_store().await;
    let snapshot = create_test_snapshot();

    let summary = store.import_snapshot(snapshot.clone()).await.unwrap();
    assert_eq!((summary.gateways, summary.devices, summary.jobs), (1, 3, 3));

    assert_eq!(store.list_gateways().await.unwrap(), snapshot.gateways);
    assert_eq!(store.list_devices().await.unwrap(), snapshot.devices);

    let jobs = store.list_jobs().await.unwrap();
    assert_eq!(jobs.len(), 3);
    assert_eq!(jobs[0].weekdays, Some(vec![1, 2, 3, 4, 5]));
    assert_eq!(jobs[0].method_value, Some(json!("128")));
    assert_eq!(jobs[1].offset, -30);
    assert!(!jobs[1].active);

    // Importing again replaces rather than duplicates.
    store.import_snapshot(snapshot).await.unwrap();
    assert_eq!(store.list_jobs().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_delete_job() {
    let (_temp_dir, store) = create_test_store().await;
    store.import_snapshot(create_test_snapshot()).await.unwrap();

    store.delete_job(&Id { id: 101 }).await.unwrap();
    assert!(store.get_job(&Id { id: 101 }).await.unwrap().is_none());
    assert!(matches!(
        store.delete_job(&Id { id: 101 }).await,
        Err(AlmanacError::JobNotFound { id: 101 })
    ));
}

#[tokio::test]
async fn test_available_actions_for_stored_device() {
    let (_temp_dir, store) = create_test_store().await;
    store.import_snapshot(create_test_snapshot()).await.unwrap();

    assert_eq!(
        store.available_actions(&Id { id: 10 }).await.unwrap(),
        vec![Method::On, Method::Off, Method::Dim]
    );
    assert_eq!(
        store.available_actions(&Id { id: 11 }).await.unwrap(),
        vec![Method::Bell]
    );
    assert!(matches!(
        store.available_actions(&Id { id: 404 }).await,
        Err(AlmanacError::DeviceNotFound { id: 404 })
    ));
}

#[tokio::test]
async fn test_agenda_from_stored_jobs() {
    let (_temp_dir, store) = create_test_store().await;
    store.import_snapshot(create_test_snapshot()).await.unwrap();

    // Monday 2024-06-03 at 08:00 UTC
    let query = AgendaQuery {
        show_inactive: false,
        now: Some("2024-06-03T08:00:00Z".parse().unwrap()),
    };
    let agenda = store.agenda(&query).await.unwrap();

    // Job 100 fired at 07:15 today; job 101 is inactive; job 102 is orphaned.
    assert_eq!(agenda.section_ids, vec![0, 1, 2, 3, 4, 7]);
    assert!(agenda.bucket(0)[0].expired);

    let with_inactive = store
        .agenda(&AgendaQuery {
            show_inactive: true,
            ..query
        })
        .await
        .unwrap();
    assert_eq!(with_inactive.section_ids, vec![0, 1, 2, 3, 4, 5, 6, 7]);
}

#[tokio::test]
async fn test_session_persistence() {
    let (_temp_dir, store) = create_test_store().await;
    assert!(store.load_session().await.unwrap().is_none());
    assert_eq!(store.session().await.unwrap(), ScheduleWizard::new());

    let mut wizard = store.start_session().await.unwrap();
    wizard
        .select_device(&Device {
            id: 10,
            name: "Hall dimmer".to_string(),
            client_id: 1,
            supported_methods: 19,
        })
        .unwrap();
    store.save_session(&wizard).await.unwrap();

    let loaded = store.load_session().await.unwrap().unwrap();
    assert_eq!(loaded, wizard);
    assert_eq!(loaded.step(), WizardStep::Action);

    assert!(store.clear_session().await.unwrap());
    assert!(!store.clear_session().await.unwrap());
}

async fn complete_session(store: &ScheduleStore, device_id: u64) -> ScheduleWizard {
    let device = store.get_device(&Id { id: device_id }).await.unwrap().unwrap();
    let mut wizard = ScheduleWizard::new();
    wizard.select_device(&device).unwrap();
    wizard
        .select_action(Method::Dim, Some(MethodValue::Dim(64)))
        .unwrap();
    wizard.select_time(&SelectTime::at(22, 0)).unwrap();
    wizard.select_days(WeekdaySet::ALL).unwrap();
    store.save_session(&wizard).await.unwrap();
    wizard
}

#[tokio::test]
async fn test_submit_session_creates_job_and_clears_session() {
    let (_temp_dir, store) = create_test_store().await;
    store.import_snapshot(create_test_snapshot()).await.unwrap();
    complete_session(&store, 10).await;

    let id = store.submit_session().await.unwrap();

    let job = store.get_job(&Id { id }).await.unwrap().unwrap();
    assert_eq!(job.device_id, 10);
    assert_eq!(job.method, 16);
    assert_eq!(job.method_value, Some(json!(64)));
    assert_eq!((job.hour, job.minute), (22, 0));
    assert_eq!(job.weekdays, Some(vec![1, 2, 3, 4, 5, 6, 7]));
    assert!(store.load_session().await.unwrap().is_none());
}

#[tokio::test]
async fn test_submit_session_without_session_fails() {
    let (_temp_dir, store) = create_test_store().await;
    assert!(matches!(
        store.submit_session().await,
        Err(AlmanacError::InvalidInput { .. })
    ));
}

#[tokio::test]
async fn test_edit_session_updates_job_in_place() {
    let (_temp_dir, store) = create_test_store().await;
    store.import_snapshot(create_test_snapshot()).await.unwrap();

    let mut wizard = store.start_edit_session(&Id { id: 100 }).await.unwrap();
    assert_eq!(wizard.step(), WizardStep::Summary);
    wizard.goto(WizardStep::Days).unwrap();
    wizard.select_days(WeekdaySet::WEEKENDS).unwrap();
    store.save_session(&wizard).await.unwrap();

    assert_eq!(store.submit_session().await.unwrap(), 100);
    let job = store.get_job(&Id { id: 100 }).await.unwrap().unwrap();
    assert_eq!(job.weekdays, Some(vec![6, 7]));
    assert_eq!(job.method_value, Some(json!(128)));
    assert_eq!(store.list_jobs().await.unwrap().len(), 3);

    assert!(matches!(
        store.start_edit_session(&Id { id: 999 }).await,
        Err(AlmanacError::JobNotFound { id: 999 })
    ));
}

#[tokio::test]
async fn test_local_api_rejects_unknown_devices() {
    let (_temp_dir, store) = create_test_store().await;
    store.import_snapshot(create_test_snapshot()).await.unwrap();
    let mut payload = complete_session(&store, 10)
        .await
        .to_submission_payload()
        .unwrap();

    payload.device_id = 404;
    let response = store.save_schedule(&payload).await.unwrap();
    assert_eq!(
        response,
        SaveResponse::Rejected {
            message: "Device 404 is not registered".to_string()
        }
    );

    payload.device_id = 11;
    assert!(matches!(
        store.save_schedule(&payload).await.unwrap(),
        SaveResponse::Rejected { .. }
    ));

    payload.device_id = 10;
    payload.id = Some(5000);
    assert!(matches!(
        store.save_schedule(&payload).await.unwrap(),
        SaveResponse::Rejected { .. }
    ));
}

#[tokio::test]
async fn test_rejected_submission_keeps_session_with_message() {
    let (_temp_dir, store) = create_test_store().await;
    store.import_snapshot(create_test_snapshot()).await.unwrap();
    complete_session(&store, 10).await;

    // The device disappears before the schedule is submitted.
    rusqlite::Connection::open(store.database_path())
        .unwrap()
        .execute("DELETE FROM devices WHERE id = 10", [])
        .unwrap();

    let err = store.submit_session().await.unwrap_err();
    assert!(err.is_retryable_submission());

    let session = store.load_session().await.unwrap().unwrap();
    assert_eq!(session.step(), WizardStep::Summary);
    assert_eq!(session.last_error(), Some("Device 10 is not registered"));
}
