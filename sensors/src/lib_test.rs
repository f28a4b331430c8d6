use super::*;

fn point(time: &str, vibration: f64, temperature: f64) -> SensorDataPoint {
    SensorDataPoint { time: time.to_owned(), vibration, temperature }
}

// =============================================================
// Dispatch
// =============================================================

#[test]
fn detect_format_is_case_insensitive() {
    assert_eq!(detect_format("log.JSON"), SourceFormat::Json);
    assert_eq!(detect_format("log.json"), SourceFormat::Json);
    assert_eq!(detect_format("log.csv"), SourceFormat::Delimited);
    assert_eq!(detect_format("noext"), SourceFormat::Delimited);
}

#[test]
fn supported_uploads_are_csv_json_txt() {
    assert!(is_supported_upload("a.CSV"));
    assert!(is_supported_upload("b.json"));
    assert!(is_supported_upload("c.txt"));
    assert!(!is_supported_upload("d.xlsx"));
    assert!(!is_supported_upload("readme"));
}

// =============================================================
// Delimited
// =============================================================

#[test]
fn csv_with_header_scenario() {
    let points = parse("vib.csv", "time,value\n0,2.1\n10,7.8\n20,16.4").expect("rows");
    assert_eq!(points, vec![point("0", 2.1, 60.0), point("10", 7.8, 60.0), point("20", 16.4, 60.0)]);
}

#[test]
fn header_line_is_skipped_exactly_once() {
    let content = "t,vib,temp\na,1,50\nb,2,51\nc,3,52\nd,4,53";
    let line_count = content.lines().count();
    let points = parse("x.txt", content).expect("rows");
    assert_eq!(points.len(), line_count - 1);
    assert_eq!(points[0], point("a", 1.0, 50.0));
}

#[test]
fn header_only_file_has_no_rows() {
    assert_eq!(parse("x.csv", "time,value\n"), Err(ParseError::NoRows));
}

#[test]
fn empty_and_blank_files_have_no_rows() {
    assert_eq!(parse("x.csv", ""), Err(ParseError::NoRows));
    assert_eq!(parse("x.csv", "\n   \r\n\t\n"), Err(ParseError::NoRows));
}

// =============================================================
// JSON
// =============================================================

#[test]
fn json_reads_alias_keys_and_defaults() {
    let content = r#"[
        {"time": "t0", "vibration": 1.5, "temperature": 70},
        {"value": 2.5, "temp": "65.5"},
        {"v": "3"},
        {"time": 42},
        7
    ]"#;
    let points = parse("data.json", content).expect("rows");
    assert_eq!(
        points,
        vec![
            point("t0", 1.5, 70.0),
            point("10ms", 2.5, 65.5),
            point("20ms", 3.0, 60.0),
            point("42", 0.0, 60.0),
            point("40ms", 0.0, 60.0),
        ]
    );
}

#[test]
fn json_first_present_vibration_key_wins() {
    let points = parse("d.json", r#"[{"vibration": null, "value": 4, "v": 9}]"#).expect("rows");
    assert_eq!(points[0].vibration, 4.0);
}

#[test]
fn json_non_numeric_value_uses_default() {
    let points = parse("d.json", r#"[{"vibration": "loud", "temperature": true}]"#).expect("rows");
    assert_eq!(points[0], point("0ms", 0.0, 60.0));
}

#[test]
fn json_root_must_be_array() {
    let err = parse("d.json", r#"{"vibration": 1}"#).expect_err("object root");
    assert_eq!(err, ParseError::RootNotArray);
    assert_eq!(err.to_string(), "root must be an array");
}

#[test]
fn json_empty_array_has_no_rows() {
    let err = parse("d.json", "[]").expect_err("empty");
    assert_eq!(err.to_string(), "no rows produced");
}

#[test]
fn invalid_json_is_reported() {
    assert!(matches!(parse("d.json", "[1,"), Err(ParseError::InvalidJson(_))));
}

#[test]
fn custom_options_change_defaults() {
    let options = ParseOptions { default_vibration: -1.0, default_temperature: 20.0, time_step_ms: 100 };
    let points = parse_with(&options, "d.json", r#"[{}, {}]"#).expect("rows");
    assert_eq!(points, vec![point("0ms", -1.0, 20.0), point("100ms", -1.0, 20.0)]);
}
