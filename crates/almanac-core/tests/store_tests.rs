use almanac_core::{
    models::{Method, MethodValue, TriggerKind, WeekdaySet},
    params::{AgendaQuery, Id, SelectTime},
    AlmanacError, WizardStep,
};

mod common;

#[tokio::test]
async fn test_complete_schedule_workflow() {
    let (_temp_dir, store) = common::create_test_store().await;
    store
        .import_snapshot(common::create_test_snapshot())
        .await
        .expect("Failed to import snapshot");

    // Walk the wizard across several invocations, persisting in between.
    let mut wizard = store.start_session().await.unwrap();
    let device = store.get_device(&Id { id: 10 }).await.unwrap().unwrap();
    wizard.select_device(&device).unwrap();
    store.save_session(&wizard).await.unwrap();

    let mut wizard = store.session().await.unwrap();
    assert_eq!(wizard.step(), WizardStep::Action);
    wizard.select_action(Method::Dim, None).unwrap();
    assert_eq!(wizard.step(), WizardStep::ActionDim);
    wizard
        .select_action(Method::Dim, Some(MethodValue::Dim(200)))
        .unwrap();
    wizard.select_time(&SelectTime::at(6, 45)).unwrap();
    wizard
        .select_days(WeekdaySet::from_indexes([1, 3, 5]).unwrap())
        .unwrap();
    store.save_session(&wizard).await.unwrap();

    let id = store.submit_session().await.expect("Failed to submit");
    assert!(store.load_session().await.unwrap().is_none());

    let job = store.get_job(&Id { id }).await.unwrap().unwrap();
    assert_eq!(job.method, Method::Dim.code());
    assert_eq!(job.weekdays, Some(vec![1, 3, 5]));

    // Edit the new schedule to fire at sunset instead.
    let mut wizard = store.start_edit_session(&Id { id }).await.unwrap();
    wizard.goto(WizardStep::Time).unwrap();
    wizard
        .select_time(&SelectTime::sun(TriggerKind::Sunset, 10))
        .unwrap();
    assert_eq!(wizard.step(), WizardStep::Summary);
    store.save_session(&wizard).await.unwrap();
    assert_eq!(store.submit_session().await.unwrap(), id);

    let job = store.get_job(&Id { id }).await.unwrap().unwrap();
    assert_eq!(job.kind, TriggerKind::Sunset);
    assert_eq!(job.offset, 10);
    assert_eq!(store.list_jobs().await.unwrap().len(), 2);

    // Wednesday 2024-06-05 at noon: the sunset job is today, the blinds
    // already opened.
    let agenda = store
        .agenda(&AgendaQuery {
            show_inactive: false,
            now: Some("2024-06-05T12:00:00Z".parse().unwrap()),
        })
        .await
        .unwrap();
    let today: Vec<u64> = agenda.bucket(0).iter().map(|e| e.job.id).collect();
    assert_eq!(today, vec![1, id]);
    assert!(agenda.bucket(0)[0].expired);
    assert!(!agenda.bucket(0)[1].expired);
    assert_eq!(agenda.bucket(0)[1].effective.hour, 21);
    assert_eq!(agenda.bucket(0)[1].effective.minute, 10);
}

#[tokio::test]
async fn test_edit_session_requires_known_device() {
    let (_temp_dir, store) = common::create_test_store().await;
    let mut snapshot = common::create_test_snapshot();
    snapshot.devices.retain(|d| d.id != 30);
    store.import_snapshot(snapshot).await.unwrap();

    assert!(matches!(
        store.start_edit_session(&Id { id: 1 }).await,
        Err(AlmanacError::DeviceNotFound { id: 30 })
    ));
}
