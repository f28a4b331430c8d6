//! Mode picker shown when no session is open.

use leptos::prelude::*;

use crate::app::AppServices;
use crate::state::chat::ChatState;
use crate::state::dashboard::DashboardState;
use crate::state::sessions::AssistantMode;

#[component]
pub fn ModePicker() -> impl IntoView {
    let chat = expect_context::<RwSignal<ChatState>>();
    let dashboard = expect_context::<RwSignal<DashboardState>>();
    let services = expect_context::<AppServices>();

    let start = move |mode: Option<AssistantMode>| {
        let model = services.model.clone();
        chat.update(|c| {
            c.start_session(model.as_ref(), mode);
        });
        dashboard.update(DashboardState::clear_recommendations);
    };

    let cards = AssistantMode::ALL
        .into_iter()
        .map(|mode| {
            let start = start.clone();
            view! {
                <button class="mode-card" on:click=move |_| start(Some(mode))>
                    <span class="mode-card__title">{mode.label()}</span>
                    <span class="mode-card__description">{mode.description()}</span>
                </button>
            }
        })
        .collect::<Vec<_>>();

    view! {
        <div class="mode-picker">
            <h2>"请选择助手模式"</h2>
            <div class="mode-picker__cards">{cards}</div>
            <button class="btn mode-picker__free" on:click=move |_| start(None)>
                "直接开始对话"
            </button>
        </div>
    }
}
