//! Dashboard panel: sensor data, machinery recommendation, schedule.

use leptos::prelude::*;

use super::sensor_chart::SensorChart;
use super::upload_zone::UploadZone;
use crate::state::dashboard::DashboardState;
use crate::state::ui::{DashboardTab, UiState};

#[component]
pub fn DashboardPanel() -> impl IntoView {
    let dashboard = expect_context::<RwSignal<DashboardState>>();
    let ui = expect_context::<RwSignal<UiState>>();

    let tabs = DashboardTab::ALL
        .into_iter()
        .map(|tab| {
            view! {
                <button
                    class="dashboard__tab"
                    class:dashboard__tab--active=move || ui.get().dashboard_tab == tab
                    on:click=move |_| ui.update(|u| u.dashboard_tab = tab)
                >
                    {tab.label()}
                </button>
            }
        })
        .collect::<Vec<_>>();

    view! {
        <aside class="dashboard">
            <nav class="dashboard__tabs">{tabs}</nav>
            <div class="dashboard__body">
                {move || match ui.get().dashboard_tab {
                    DashboardTab::Sensors => view! { <SensorsTab dashboard=dashboard/> }.into_any(),
                    DashboardTab::Machinery => view! { <MachineryTab dashboard=dashboard/> }.into_any(),
                    DashboardTab::Schedule => view! { <ScheduleTab dashboard=dashboard/> }.into_any(),
                }}
            </div>
        </aside>
    }
}

#[component]
fn SensorsTab(dashboard: RwSignal<DashboardState>) -> impl IntoView {
    view! {
        <UploadZone/>
        {move || {
            dashboard
                .with(DashboardState::summary)
                .map(|s| {
                    let source = dashboard.with(|d| d.source_name.clone().unwrap_or_default());
                    view! {
                        <dl class="dashboard__summary">
                            <dt>"数据源"</dt>
                            <dd>{source}</dd>
                            <dt>"样本数"</dt>
                            <dd>{s.samples}</dd>
                            <dt>"峰值振动"</dt>
                            <dd>{format!("{:.2}", s.peak_vibration)}</dd>
                            <dt>"平均温度"</dt>
                            <dd>{format!("{:.1} ℃", s.mean_temperature)}</dd>
                        </dl>
                        <SensorChart/>
                    }
                })
        }}
    }
}

#[component]
fn MachineryTab(dashboard: RwSignal<DashboardState>) -> impl IntoView {
    move || match dashboard.with(|d| d.machinery.clone()) {
        None => view! { <p class="dashboard__empty">"暂无农机推荐，可在对话中询问选型建议。"</p> }.into_any(),
        Some(spec) => view! {
            <div class="machinery-card">
                <h3>{format!("{} {}", spec.brand, spec.model)}</h3>
                <dl>
                    <dt>"类型"</dt>
                    <dd>{spec.kind.label().to_owned()}</dd>
                    <dt>"马力"</dt>
                    <dd>{spec.horsepower}</dd>
                    <dt>"作业幅宽"</dt>
                    <dd>{spec.width}</dd>
                    <dt>"适用场景"</dt>
                    <dd>{spec.suitable_for}</dd>
                </dl>
            </div>
        }
        .into_any(),
    }
}

#[component]
fn ScheduleTab(dashboard: RwSignal<DashboardState>) -> impl IntoView {
    move || {
        let tasks = dashboard.with(|d| d.schedule.clone());
        if tasks.is_empty() {
            return view! { <p class="dashboard__empty">"暂无作业计划，可在调度模式下让助手生成。"</p> }.into_any();
        }
        let rows = tasks
            .into_iter()
            .map(|task| {
                view! {
                    <tr>
                        <td>{task.task_name}</td>
                        <td>{task.machine}</td>
                        <td>{task.start_date}</td>
                        <td>{format!("{} 天", task.duration_days)}</td>
                        <td>{task.status.label().to_owned()}</td>
                    </tr>
                }
            })
            .collect::<Vec<_>>();
        view! {
            <table class="schedule-table">
                <thead>
                    <tr>
                        <th>"作业"</th>
                        <th>"机具"</th>
                        <th>"开始日期"</th>
                        <th>"工期"</th>
                        <th>"状态"</th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
        }
        .into_any()
    }
}
