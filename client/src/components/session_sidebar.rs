//! Session history sidebar with new-chat, theme and logout controls.

use chrono::Local;
use leptos::prelude::*;

use crate::app::AppServices;
use crate::state::auth::AuthState;
use crate::state::chat::ChatState;
use crate::state::dashboard::DashboardState;
use crate::state::ui::UiState;
use crate::util::dark_mode;

#[component]
pub fn SessionSidebar() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let chat = expect_context::<RwSignal<ChatState>>();
    let dashboard = expect_context::<RwSignal<DashboardState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let services = expect_context::<AppServices>();

    let on_new = move |_| {
        chat.update(ChatState::reset_to_picker);
        dashboard.update(DashboardState::clear_recommendations);
    };

    let theme_storage = services.storage.clone();
    let on_toggle_theme = move |_| {
        ui.update(|u| u.dark_mode = dark_mode::toggle(theme_storage.as_ref(), u.dark_mode));
    };

    let logout_storage = services.storage.clone();
    let on_logout = move |_| {
        auth.update(|a| a.sign_out(logout_storage.as_ref()));
    };

    let model = services.model.clone();
    let session_list = move || {
        let active = chat.with(|c| c.active_id().map(str::to_owned));
        let sessions = chat.with(|c| c.sessions().to_vec());
        if sessions.is_empty() {
            return view! { <li class="session-list__empty">"暂无历史对话"</li> }.into_any();
        }
        sessions
            .into_iter()
            .map(|session| {
                let is_active = active.as_deref() == Some(session.id.as_str());
                let select_id = session.id.clone();
                let delete_id = session.id.clone();
                let model = model.clone();
                let when = session.last_modified.with_timezone(&Local).format("%m-%d %H:%M").to_string();
                view! {
                    <li
                        class="session-list__item"
                        class:session-list__item--active=is_active
                        on:click=move |_| {
                            if chat.try_update(|c| c.select_session(model.as_ref(), &select_id)).unwrap_or(false) {
                                dashboard.update(DashboardState::clear_recommendations);
                            }
                        }
                    >
                        <span class="session-list__title">{session.title}</span>
                        <span class="session-list__time">{when}</span>
                        <button
                            class="session-list__delete"
                            title="删除对话"
                            on:click=move |ev| {
                                ev.stop_propagation();
                                chat.update(|c| {
                                    c.delete_session(&delete_id);
                                });
                            }
                        >
                            "×"
                        </button>
                    </li>
                }
            })
            .collect::<Vec<_>>()
            .into_any()
    };

    view! {
        <aside class="session-sidebar">
            <div class="session-sidebar__header">
                <span class="session-sidebar__user">{move || auth.get().user.unwrap_or_default()}</span>
                <button class="btn btn--primary" on:click=on_new>
                    "新建对话"
                </button>
            </div>
            <ul class="session-list">{session_list}</ul>
            <div class="session-sidebar__footer">
                <button class="btn" on:click=on_toggle_theme>
                    {move || if ui.get().dark_mode { "浅色模式" } else { "深色模式" }}
                </button>
                <button class="btn" on:click=on_logout>
                    "退出登录"
                </button>
            </div>
        </aside>
    }
}
