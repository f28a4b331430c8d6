//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::net::config::ModelConfig;
use crate::net::gemini::GeminiClient;
use crate::pages::{login::LoginPage, workspace::WorkspacePage};
use crate::state::{auth::AuthState, chat::ChatState, dashboard::DashboardState, ui::UiState};
use crate::util::clock::{Clock, SystemClock};
use crate::util::dark_mode;
use crate::util::storage::{BrowserStorage, KeyValueStore};

/// Non-reactive collaborators shared by pages and components.
#[derive(Clone)]
pub struct AppServices {
    pub storage: Arc<dyn KeyValueStore>,
    pub clock: Arc<dyn Clock>,
    pub model: Arc<GeminiClient>,
}

impl AppServices {
    pub fn browser() -> Self {
        Self {
            storage: Arc::new(BrowserStorage),
            clock: Arc::new(SystemClock),
            model: Arc::new(GeminiClient::new(ModelConfig::from_build_env())),
        }
    }
}

/// Root application component.
///
/// Provides all shared state contexts and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let services = AppServices::browser();
    if services.model.config().api_key.is_none() {
        log::warn!("GEMINI_API_KEY was not set at build time; replies will fail");
    }

    let auth = RwSignal::new(AuthState::restore(services.storage.as_ref()));
    let chat = RwSignal::new(ChatState::default());
    let dashboard = RwSignal::new(DashboardState::default());
    let dark = dark_mode::read_preference(services.storage.as_ref());
    dark_mode::apply(dark);
    let ui = RwSignal::new(UiState { dark_mode: dark, ..UiState::default() });

    // Session history follows the signed-in name.
    let session_services = services.clone();
    Effect::new(move || {
        let user = auth.with(|a| a.user.clone());
        let current = chat.with_untracked(|c| c.user().map(str::to_owned));
        if user == current {
            return;
        }
        match user {
            Some(name) => {
                chat.update(|c| c.sign_in(&name, session_services.storage.clone(), session_services.clock.clone()));
            }
            None => chat.update(ChatState::sign_out),
        }
        dashboard.set(DashboardState::default());
    });

    provide_context(services);
    provide_context(auth);
    provide_context(chat);
    provide_context(dashboard);
    provide_context(ui);

    view! {
        <Title text="农机智能助手"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("") view=WorkspacePage/>
            </Routes>
        </Router>
    }
}
