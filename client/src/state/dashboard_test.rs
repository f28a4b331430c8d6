use super::*;

use replies::{MachineType, TaskStatus};

const VIB_CSV: &str = "time,value\n0,2.1\n10,7.8\n20,16.4";

// =============================================================
// ingest_file
// =============================================================

#[test]
fn ingest_csv_replaces_series() {
    let mut state = DashboardState::default();
    assert_eq!(state.ingest_file("vib.csv", VIB_CSV), Ok(3));
    assert_eq!(state.points.len(), 3);
    assert_eq!(state.points[2].vibration, 16.4);
    assert_eq!(state.source_name.as_deref(), Some("vib.csv"));
    assert_eq!(state.upload_error, None);
}

#[test]
fn ingest_rejects_unsupported_extension_before_parsing() {
    let mut state = DashboardState::default();
    let err = state.ingest_file("report.xlsx", VIB_CSV).expect_err("rejected");
    assert!(err.starts_with("report.xlsx"));
    assert_eq!(state.upload_error, Some(err));
    assert!(state.points.is_empty());
}

#[test]
fn failed_upload_keeps_previous_series() {
    let mut state = DashboardState::default();
    state.ingest_file("vib.csv", VIB_CSV).expect("parsed");

    let err = state.ingest_file("bad.json", r#"{"not":"array"}"#).expect_err("rejected");
    assert_eq!(err, "bad.json: root must be an array");
    assert_eq!(state.points.len(), 3);
    assert_eq!(state.source_name.as_deref(), Some("vib.csv"));
}

#[test]
fn successful_upload_clears_previous_error() {
    let mut state = DashboardState::default();
    state.ingest_file("empty.txt", "\n\n").expect_err("no rows");
    assert_eq!(state.upload_error.as_deref(), Some("empty.txt: no rows produced"));
    state.ingest_file("vib.csv", VIB_CSV).expect("parsed");
    assert_eq!(state.upload_error, None);
}

// =============================================================
// apply_extraction
// =============================================================

#[test]
fn extraction_sets_machinery_and_replaces_schedule() {
    let mut state = DashboardState::default();
    state.apply_extraction(&replies::extract(
        "```json\n{\"schedule\":[{\"id\":\"1\",\"taskName\":\"Plow\"},{\"id\":\"2\",\"taskName\":\"Seed\"}]}\n```",
    ));
    assert_eq!(state.schedule.len(), 2);

    state.apply_extraction(&replies::extract(
        "新方案\n```json\n{\"machinery\":{\"type\":\"Harvester\",\"brand\":\"雷沃\"},\"schedule\":[{\"id\":\"9\",\"taskName\":\"Harvest\",\"status\":\"In Progress\"}]}\n```",
    ));
    let spec = state.machinery.as_ref().expect("machinery");
    assert_eq!(spec.kind, MachineType::Harvester);
    assert_eq!(spec.brand, "雷沃");
    assert_eq!(state.schedule.len(), 1);
    assert_eq!(state.schedule[0].id, "9");
    assert_eq!(state.schedule[0].status, TaskStatus::InProgress);
}

#[test]
fn extraction_without_payload_keeps_current_results() {
    let mut state = DashboardState::default();
    state.apply_extraction(&replies::extract("```json\n{\"machinery\":{\"type\":\"Tractor\"}}\n```"));
    state.apply_extraction(&replies::extract("普通回答"));
    assert_eq!(state.machinery.as_ref().map(|m| m.kind.clone()), Some(MachineType::Tractor));
}

#[test]
fn clear_recommendations_keeps_sensor_data() {
    let mut state = DashboardState::default();
    state.ingest_file("vib.csv", VIB_CSV).expect("parsed");
    state.apply_extraction(&replies::extract("```json\n{\"machinery\":{\"type\":\"Seeder\"}}\n```"));
    state.clear_recommendations();
    assert_eq!(state.machinery, None);
    assert!(state.schedule.is_empty());
    assert_eq!(state.points.len(), 3);
}

// =============================================================
// summary
// =============================================================

#[test]
fn summary_of_empty_series_is_none() {
    assert_eq!(DashboardState::default().summary(), None);
}

#[test]
fn summary_reports_peak_and_mean() {
    let mut state = DashboardState::default();
    state
        .ingest_file("s.csv", "t,v,temp\n0,1.5,50\n1,4.0,70\n2,2.5,60")
        .expect("parsed");
    let summary = state.summary().expect("summary");
    assert_eq!(summary.samples, 3);
    assert_eq!(summary.peak_vibration, 4.0);
    assert_eq!(summary.mean_temperature, 60.0);
}
