use super::*;

#[test]
fn empty_series_has_no_points() {
    assert_eq!(polyline_points(&[], 100.0, 40.0), "");
}

#[test]
fn series_spans_the_box() {
    assert_eq!(polyline_points(&[0.0, 5.0, 10.0], 100.0, 40.0), "0.0,40.0 50.0,20.0 100.0,0.0");
}

#[test]
fn flat_series_sits_on_the_midline() {
    assert_eq!(polyline_points(&[3.0, 3.0], 10.0, 20.0), "0.0,10.0 10.0,10.0");
}
