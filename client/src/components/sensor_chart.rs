//! SVG sparklines for the uploaded sensor series.

use leptos::prelude::*;

use crate::state::dashboard::DashboardState;
use crate::util::chart::polyline_points;

const WIDTH: f64 = 320.0;
const HEIGHT: f64 = 80.0;

#[component]
pub fn SensorChart() -> impl IntoView {
    let dashboard = expect_context::<RwSignal<DashboardState>>();

    let series = move |pick: fn(&sensors::SensorDataPoint) -> f64| {
        dashboard.with(|d| polyline_points(&d.points.iter().map(pick).collect::<Vec<_>>(), WIDTH, HEIGHT))
    };
    let view_box = format!("0 0 {WIDTH} {HEIGHT}");

    view! {
        <div class="sensor-chart">
            <p class="sensor-chart__label">"振动"</p>
            <svg class="sensor-chart__svg" viewBox=view_box.clone() preserveAspectRatio="none">
                <polyline class="sensor-chart__line sensor-chart__line--vibration" fill="none" points=move || series(|p| p.vibration)/>
            </svg>
            <p class="sensor-chart__label">"温度"</p>
            <svg class="sensor-chart__svg" viewBox=view_box preserveAspectRatio="none">
                <polyline class="sensor-chart__line sensor-chart__line--temperature" fill="none" points=move || series(|p| p.temperature)/>
            </svg>
        </div>
    }
}
