use super::*;
use serde_json::json;
use crate::{MachineType, TaskStatus};

const PLAN_REPLY: &str = "Here is the plan.\n```json\n{\"schedule\":[{\"id\":\"1\",\"taskName\":\"Plow\",\"machine\":\"A\",\"startDate\":\"2023-10-25\",\"durationDays\":2,\"status\":\"Pending\"}]}\n```";

// =============================================================
// No block
// =============================================================

#[test]
fn reply_without_block_is_returned_unchanged() {
    let raw = "  建议选择 120 马力拖拉机。\n\n| a | b |\n";
    let out = extract(raw);
    assert_eq!(out.clean_text, raw);
    assert!(out.machinery.is_none());
    assert!(out.schedule.is_none());
    assert!(out.json_error.is_none());
    assert!(!out.has_payload());
}

#[test]
fn other_language_tags_are_not_consumed() {
    let raw = "Diagram:\n```mermaid\ngraph TD; A-->B\n```";
    assert_eq!(extract(raw).clean_text, raw);
}

#[test]
fn tag_match_is_case_sensitive() {
    let raw = "x\n```JSON\n{\"machinery\":{}}\n```";
    let out = extract(raw);
    assert_eq!(out.clean_text, raw);
    assert!(out.machinery.is_none());
}

#[test]
fn longer_info_string_does_not_match() {
    let raw = "```jsonc\n{\"machinery\":{}}\n```";
    assert_eq!(extract(raw).clean_text, raw);
}

#[test]
fn unterminated_block_is_ignored() {
    let raw = "start\n```json\n{\"machinery\":{\"brand\":\"X\"}}";
    let out = extract(raw);
    assert_eq!(out.clean_text, raw);
    assert!(out.machinery.is_none());
}

// =============================================================
// Extraction
// =============================================================

#[test]
fn schedule_scenario_strips_block_and_keeps_literal() {
    let out = extract(PLAN_REPLY);
    assert_eq!(out.clean_text, "Here is the plan.");
    assert!(out.machinery.is_none());
    assert_eq!(
        out.schedule,
        Some(json!([{
            "id": "1",
            "taskName": "Plow",
            "machine": "A",
            "startDate": "2023-10-25",
            "durationDays": 2,
            "status": "Pending"
        }]))
    );
    let tasks = out.schedule_tasks().unwrap_or_default();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].task_name, "Plow");
    assert_eq!(tasks[0].duration_days, 2);
    assert_eq!(tasks[0].status, TaskStatus::Pending);
}

#[test]
fn machinery_is_returned_verbatim_even_when_malformed() {
    let raw = "推荐如下：\n```json\n{\"machinery\":{\"type\":\"Tractor\",\"horsepower\":120,\"extra\":[1,2]}}\n```\n祝丰收！";
    let out = extract(raw);
    assert_eq!(out.clean_text, "推荐如下：\n\n祝丰收！");
    assert_eq!(out.machinery, Some(json!({"type": "Tractor", "horsepower": 120, "extra": [1, 2]})));
    let spec = out.machinery_spec().expect("object converts");
    assert_eq!(spec.kind, MachineType::Tractor);
    assert_eq!(spec.horsepower, "120");
    assert_eq!(spec.brand, "");
}

#[test]
fn only_first_json_block_is_consumed() {
    let raw = "a\n```json\n{\"machinery\":{\"brand\":\"First\"}}\n```\nb\n```json\n{\"machinery\":{\"brand\":\"Second\"}}\n```";
    let out = extract(raw);
    assert_eq!(out.machinery, Some(json!({"brand": "First"})));
    assert_eq!(out.clean_text, "a\n\nb\n```json\n{\"machinery\":{\"brand\":\"Second\"}}\n```");
}

#[test]
fn null_payload_keys_count_as_absent() {
    let out = extract("```json\n{\"machinery\":null,\"schedule\":[]}\n```");
    assert!(out.machinery.is_none());
    assert_eq!(out.schedule, Some(json!([])));
    assert_eq!(out.clean_text, "");
}

#[test]
fn block_without_known_keys_is_still_removed() {
    let out = extract("text\n```json\n{\"note\":1}\n```");
    assert_eq!(out.clean_text, "text");
    assert!(!out.has_payload());
    assert!(out.json_error.is_none());
}

#[test]
fn crlf_fences_are_accepted() {
    let out = extract("hi\r\n```json\r\n{\"machinery\":{\"brand\":\"K\"}}\r\n```\r\n");
    assert_eq!(out.clean_text, "hi");
    assert_eq!(out.machinery, Some(json!({"brand": "K"})));
}

// =============================================================
// Parse failure
// =============================================================

#[test]
fn malformed_block_falls_back_to_raw_text() {
    let raw = "plan\n```json\n{\"schedule\": [ oops ]}\n```";
    let out = extract(raw);
    assert_eq!(out.clean_text, raw);
    assert!(out.schedule.is_none());
    assert!(out.machinery.is_none());
    assert!(out.json_error.is_some());
}
