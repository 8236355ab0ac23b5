//! Tests for the job partitioner.

use serde_json::{json, Value};

use super::*;
use crate::models::index_by_id;

// 2024-06-03 is a Monday.
const MONDAY: u8 = 1;

fn ts(s: &str) -> Timestamp {
    s.parse().expect("valid timestamp")
}

fn create_test_registries(timezone: &str) -> (HashMap<u64, Device>, HashMap<u64, Gateway>) {
    let gateway = Gateway {
        id: 1,
        name: "Home".to_string(),
        timezone: timezone.to_string(),
        sunrise: ts("2024-06-03T06:00:00Z").as_second(),
        sunset: ts("2024-06-03T21:00:00Z").as_second(),
    };
    let device = Device {
        id: 10,
        name: "Porch light".to_string(),
        client_id: 1,
        supported_methods: 1 | 2,
    };
    (index_by_id([device]), index_by_id([gateway]))
}

fn sunrise_job(id: u64, offset: i32, weekdays: Value) -> Job {
    serde_json::from_value(json!({
        "id": id,
        "deviceId": 10,
        "method": 1,
        "type": "sunrise",
        "offset": offset,
        "active": true,
        "weekdays": weekdays,
    }))
    .expect("job should deserialize")
}

fn time_job(id: u64, hour: u8, minute: u8, weekdays: Value) -> Job {
    serde_json::from_value(json!({
        "id": id,
        "deviceId": 10,
        "method": 2,
        "type": "time",
        "hour": hour,
        "minute": minute,
        "active": true,
        "weekdays": weekdays,
    }))
    .expect("job should deserialize")
}

fn ids(entries: &[AgendaEntry]) -> Vec<u64> {
    entries.iter().map(|e| e.job.id).collect()
}

#[test]
fn test_upcoming_today_job_lands_in_today() {
    let (devices, gateways) = create_test_registries("UTC");
    let jobs = vec![sunrise_job(1, 30, json!([MONDAY]))];

    let agenda = partition_jobs(&jobs, &devices, &gateways, false, ts("2024-06-03T05:00:00Z"));

    assert_eq!(agenda.section_ids, vec![TODAY]);
    let today = agenda.bucket(TODAY);
    assert_eq!(today.len(), 1);
    assert!(!today[0].expired);
    assert_eq!(today[0].effective, EffectiveTime { hour: 6, minute: 30 });
}

#[test]
fn test_passed_today_job_is_expired_and_repeated_next_week() {
    let (devices, gateways) = create_test_registries("UTC");
    let jobs = vec![sunrise_job(1, 30, json!([MONDAY]))];

    let agenda = partition_jobs(&jobs, &devices, &gateways, false, ts("2024-06-03T07:00:00Z"));

    assert_eq!(agenda.section_ids, vec![TODAY, NEXT_WEEK]);
    assert!(agenda.bucket(TODAY)[0].expired);
    assert!(!agenda.bucket(NEXT_WEEK)[0].expired);
    assert_eq!(agenda.len(), 2);
}

#[test]
fn test_trigger_at_current_minute_is_not_expired() {
    let (devices, gateways) = create_test_registries("UTC");
    let jobs = vec![time_job(1, 7, 0, json!([MONDAY]))];

    let agenda = partition_jobs(&jobs, &devices, &gateways, false, ts("2024-06-03T07:00:45Z"));
    assert_eq!(agenda.section_ids, vec![TODAY]);
    assert!(!agenda.bucket(TODAY)[0].expired);
}

#[test]
fn test_dangling_references_are_skipped() {
    let (devices, gateways) = create_test_registries("UTC");
    let mut orphan = time_job(1, 8, 0, json!([1, 2, 3]));
    orphan.device_id = 99;

    let agenda = partition_jobs(&[orphan], &devices, &gateways, true, ts("2024-06-03T05:00:00Z"));
    assert!(agenda.is_empty());
    assert_eq!(agenda.buckets.len(), 8);

    let job = time_job(2, 8, 0, json!([1]));
    let agenda = partition_jobs(&[job], &devices, &HashMap::new(), true, ts("2024-06-03T05:00:00Z"));
    assert!(agenda.is_empty());
}

#[test]
fn test_out_of_range_offset_is_skipped() {
    let (devices, gateways) = create_test_registries("UTC");
    let jobs = vec![sunrise_job(1, i32::MIN, json!([1])), sunrise_job(2, 15, json!([1]))];

    let agenda = partition_jobs(&jobs, &devices, &gateways, false, ts("2024-06-03T05:00:00Z"));
    assert_eq!(ids(agenda.bucket(TODAY)), vec![2]);
}

#[test]
fn test_inactive_jobs_respect_visibility_flag() {
    let (devices, gateways) = create_test_registries("UTC");
    let mut job = time_job(1, 8, 0, json!([2]));
    job.active = false;
    let jobs = vec![job];
    let now = ts("2024-06-03T05:00:00Z");

    assert!(partition_jobs(&jobs, &devices, &gateways, false, now).is_empty());
    let shown = partition_jobs(&jobs, &devices, &gateways, true, now);
    assert_eq!(shown.section_ids, vec![1]);
}

#[test]
fn test_malformed_weekdays_skip_the_whole_job() {
    let (devices, gateways) = create_test_registries("UTC");
    let jobs = vec![
        time_job(1, 8, 0, json!([1, 9])),
        time_job(2, 8, 0, json!("mon")),
        time_job(3, 8, 0, Value::Null),
        time_job(4, 8, 0, json!([])),
    ];

    let agenda = partition_jobs(&jobs, &devices, &gateways, true, ts("2024-06-03T05:00:00Z"));
    assert!(agenda.is_empty());
}

#[test]
fn test_relative_day_buckets() {
    let (devices, gateways) = create_test_registries("UTC");
    // Wednesday and Sunday, seen from Monday
    let jobs = vec![time_job(1, 8, 0, json!("3,7"))];

    let agenda = partition_jobs(&jobs, &devices, &gateways, false, ts("2024-06-03T05:00:00Z"));
    assert_eq!(agenda.section_ids, vec![2, 6]);
    assert!(agenda.bucket(2).iter().all(|e| !e.expired));
}

#[test]
fn test_today_follows_gateway_time_zone() {
    // 13:00 UTC Monday is 01:00 Tuesday in Auckland.
    let (devices, gateways) = create_test_registries("Pacific/Auckland");
    let jobs = vec![time_job(1, 9, 0, json!([2])), time_job(2, 9, 0, json!([1]))];

    let agenda = partition_jobs(&jobs, &devices, &gateways, false, ts("2024-06-03T13:00:00Z"));

    assert_eq!(ids(agenda.bucket(TODAY)), vec![1]);
    assert!(!agenda.bucket(TODAY)[0].expired);
    assert_eq!(ids(agenda.bucket(6)), vec![2]);
    assert_eq!(agenda.reference_day, Some(2));
}

#[test]
fn test_reference_day_unset_when_gateways_disagree() {
    let (mut devices, mut gateways) = create_test_registries("UTC");
    let mut far_gateway = gateways[&1].clone();
    far_gateway.id = 2;
    far_gateway.timezone = "Pacific/Auckland".to_string();
    let mut far_device = devices[&10].clone();
    far_device.id = 20;
    far_device.client_id = 2;
    gateways.insert(2, far_gateway);
    devices.insert(20, far_device);

    let mut far_job = time_job(2, 9, 0, json!([2]));
    far_job.device_id = 20;
    let jobs = vec![time_job(1, 9, 0, json!([1])), far_job];

    let agenda = partition_jobs(&jobs, &devices, &gateways, false, ts("2024-06-03T13:00:00Z"));

    // Each job is due "today" on its own gateway's date.
    assert_eq!(ids(agenda.bucket(TODAY)), vec![1, 2]);
    assert_eq!(agenda.reference_day, None);
    assert_eq!(agenda.bucket_day(TODAY), None);
}

#[test]
fn test_buckets_sorted_by_effective_time_stably() {
    let (devices, gateways) = create_test_registries("UTC");
    let jobs = vec![
        time_job(1, 18, 0, json!([3])),
        time_job(2, 6, 30, json!([3])),
        // sunrise + 30 ties with job 2
        sunrise_job(3, 30, json!([3])),
        time_job(4, 0, 5, json!([3])),
    ];

    let agenda = partition_jobs(&jobs, &devices, &gateways, false, ts("2024-06-03T05:00:00Z"));
    assert_eq!(ids(agenda.bucket(2)), vec![4, 2, 3, 1]);
}

#[test]
fn test_entry_serializes_padded_effective_time() {
    let (devices, gateways) = create_test_registries("UTC");
    let jobs = vec![time_job(1, 7, 5, json!([MONDAY]))];

    let agenda = partition_jobs(&jobs, &devices, &gateways, false, ts("2024-06-03T09:00:00Z"));
    let value = serde_json::to_value(&agenda.bucket(TODAY)[0]).unwrap();

    assert_eq!(value["id"], json!(1));
    assert_eq!(value["effectiveHour"], json!("07"));
    assert_eq!(value["effectiveMinute"], json!("05"));
    assert_eq!(value["expired"], json!(true));
}

#[test]
fn test_bucket_day_wraps_the_week() {
    let mut agenda = Agenda::empty();
    assert_eq!(agenda.bucket_day(0), None);

    agenda.reference_day = Some(6);
    assert_eq!(agenda.bucket_day(0), Some(6));
    assert_eq!(agenda.bucket_day(1), Some(7));
    assert_eq!(agenda.bucket_day(2), Some(1));
    assert_eq!(agenda.bucket_day(NEXT_WEEK), Some(6));
}
