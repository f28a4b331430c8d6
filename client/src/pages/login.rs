//! Login page: a display name that namespaces the user's chat history.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::app::AppServices;
use crate::state::auth::{AuthState, MAX_USERNAME_CHARS};

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let services = expect_context::<AppServices>();
    let navigate = use_navigate();

    let name = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());

    // Already signed in (restored from a previous visit).
    let already_in = navigate.clone();
    Effect::new(move || {
        if auth.with(|a| a.user.is_some()) {
            already_in("/", NavigateOptions::default());
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let raw = name.get();
        let accepted = auth
            .try_update(|a| a.sign_in(services.storage.as_ref(), &raw))
            .flatten();
        match accepted {
            Some(user) => {
                log::info!("signed in as {user}");
                navigate("/", NavigateOptions::default());
            }
            None => info.set("请输入用户名。".to_owned()),
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"农机智能助手"</h1>
                <p class="login-card__subtitle">"选型 · 调度 · 诊断"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        maxlength=MAX_USERNAME_CHARS.to_string()
                        placeholder="用户名"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit">
                        "进入"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
