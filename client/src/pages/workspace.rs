//! Workspace page: session sidebar, chat column, dashboard panel.
//!
//! ARCHITECTURE
//! ============
//! With no active session the chat column shows the mode picker; otherwise
//! the transcript. The dashboard panel sits beside both.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::{
    chat_panel::ChatPanel, dashboard_panel::DashboardPanel, mode_picker::ModePicker, session_sidebar::SessionSidebar,
};
use crate::state::auth::AuthState;
use crate::state::chat::{ChatPhase, ChatState};
use crate::state::ui::UiState;
use crate::util::auth::install_unauth_redirect;

#[component]
pub fn WorkspacePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let chat = expect_context::<RwSignal<ChatState>>();
    let ui = expect_context::<RwSignal<UiState>>();

    install_unauth_redirect(auth, use_navigate());

    let picking = move || chat.with(|c| c.phase() == ChatPhase::Idle);
    let on_toggle_sidebar = move |_| ui.update(UiState::toggle_sidebar);

    view! {
        <div class="workspace" class:workspace--sidebar-closed=move || !ui.get().sidebar_open>
            <Show when=move || ui.get().sidebar_open>
                <SessionSidebar/>
            </Show>
            <main class="workspace__chat">
                <button class="btn workspace__sidebar-toggle" on:click=on_toggle_sidebar>
                    {move || if ui.get().sidebar_open { "收起会话列表" } else { "展开会话列表" }}
                </button>
                <Show when=picking fallback=|| view! { <ChatPanel/> }>
                    <ModePicker/>
                </Show>
            </main>
            <DashboardPanel/>
        </div>
    }
}
