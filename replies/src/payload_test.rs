use super::*;
use serde_json::json;

#[test]
fn machine_type_accepts_english_and_chinese_labels() {
    assert_eq!(MachineType::from_label("tractor"), MachineType::Tractor);
    assert_eq!(MachineType::from_label(" Harvester "), MachineType::Harvester);
    assert_eq!(MachineType::from_label("播种机"), MachineType::Seeder);
    assert_eq!(MachineType::from_label("Sprayer"), MachineType::Other("Sprayer".to_owned()));
    assert_eq!(MachineType::from_label("Sprayer").label(), "Sprayer");
}

#[test]
fn task_status_normalizes_spacing_and_case() {
    assert_eq!(TaskStatus::from_label("Pending"), TaskStatus::Pending);
    assert_eq!(TaskStatus::from_label("In Progress"), TaskStatus::InProgress);
    assert_eq!(TaskStatus::from_label("in_progress"), TaskStatus::InProgress);
    assert_eq!(TaskStatus::from_label("COMPLETED"), TaskStatus::Completed);
    assert_eq!(TaskStatus::from_label("blocked"), TaskStatus::Other("blocked".to_owned()));
    assert_eq!(TaskStatus::InProgress.label(), "In Progress");
}

#[test]
fn machinery_spec_joins_list_fields() {
    let spec = MachinerySpec::from_value(&json!({
        "type": "Harvester",
        "brand": "雷沃",
        "model": "GK120",
        "horsepower": "120hp",
        "width": 2.5,
        "suitableFor": ["小麦", "水稻"]
    }))
    .expect("object");
    assert_eq!(spec.kind, MachineType::Harvester);
    assert_eq!(spec.width, "2.5");
    assert_eq!(spec.suitable_for, "小麦, 水稻");
}

#[test]
fn machinery_spec_rejects_non_objects() {
    assert!(MachinerySpec::from_value(&json!("Tractor")).is_none());
}

#[test]
fn schedule_skips_non_object_entries() {
    let tasks = ScheduleTask::list_from_value(&json!([
        {"id": "1", "taskName": "Sow", "durationDays": "3", "status": "Completed"},
        "garbage",
        {"id": 2, "taskName": "Spray", "durationDays": -1}
    ]))
    .expect("array");
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].duration_days, 3);
    assert_eq!(tasks[0].status, TaskStatus::Completed);
    assert_eq!(tasks[1].id, "2");
    assert_eq!(tasks[1].duration_days, 0);
    assert_eq!(tasks[1].status, TaskStatus::Pending);
}

#[test]
fn schedule_requires_array() {
    assert!(ScheduleTask::list_from_value(&json!({"id": "1"})).is_none());
}
