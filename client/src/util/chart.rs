//! Geometry for the sensor sparkline.
//!
//! Maps a series onto an SVG viewbox: x spreads samples evenly, y is scaled
//! between the series min and max with the max at the top edge.

#[cfg(test)]
#[path = "chart_test.rs"]
mod chart_test;

/// SVG `points` attribute for `values` inside a `width` x `height` box.
pub fn polyline_points(values: &[f64], width: f64, height: f64) -> String {
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
    let span = max - min;
    #[allow(clippy::cast_precision_loss)]
    let step = if values.len() > 1 { width / (values.len() - 1) as f64 } else { 0.0 };

    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            #[allow(clippy::cast_precision_loss)]
            let x = step * i as f64;
            let y = if span > 0.0 { height - (v - min) / span * height } else { height / 2.0 };
            format!("{x:.1},{y:.1}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}
