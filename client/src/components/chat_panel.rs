//! Transcript and composer for the active session.
//!
//! SYSTEM CONTEXT
//! ==============
//! Sending runs the turn in two halves around the model call (see
//! `state::chat`), so the chat signal is never borrowed across the await.
//! Structured results from replies to the active session go to the dashboard.

use chrono::Local;
use leptos::prelude::*;

use crate::app::AppServices;
#[cfg(feature = "csr")]
use crate::net::model::ChatModel;
use crate::state::chat::ChatState;
use crate::state::dashboard::DashboardState;
use crate::state::sessions::Role;
use crate::util::markdown::{render_diagrams, render_markdown_html};

#[component]
pub fn ChatPanel() -> impl IntoView {
    let chat = expect_context::<RwSignal<ChatState>>();
    let dashboard = expect_context::<RwSignal<DashboardState>>();
    let services = expect_context::<AppServices>();

    let input = RwSignal::new(String::new());
    let messages_ref = NodeRef::<leptos::html::Div>::new();

    Effect::new(move || {
        chat.track();
        #[cfg(feature = "csr")]
        {
            if let Some(el) = messages_ref.get() {
                el.set_scroll_top(el.scroll_height());
            }
        }
        render_diagrams();
    });

    let model = services.model.clone();
    let do_send = move || {
        let text = input.get_untracked();
        let Some(pending) = chat.try_update(|c| c.begin_turn(model.as_ref(), &text)).flatten() else {
            return;
        };
        input.set(String::new());

        #[cfg(feature = "csr")]
        {
            let model = model.clone();
            leptos::task::spawn_local(async move {
                let mut pending = pending;
                let result = model.send_message(&mut pending.handle, &pending.text).await;
                let outcome = chat.try_update(|c| c.complete_turn(pending, result));
                if let Some(extraction) = outcome.and_then(|o| o.extraction) {
                    dashboard.update(|d| d.apply_extraction(&extraction));
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (pending, dashboard);
        }
    };

    let send_click = do_send.clone();
    let on_click = move |_| send_click();

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() && !ev.is_composing() {
            ev.prevent_default();
            do_send();
        }
    };

    let waiting = move || chat.with(ChatState::is_waiting);
    let can_send = move || !input.get().trim().is_empty() && !waiting();

    view! {
        <div class="chat-panel">
            <div class="chat-panel__header">
                {move || chat.with(|c| c.mode().map_or("自由对话", |m| m.label()))}
            </div>
            <div class="chat-panel__messages" node_ref=messages_ref>
                {move || {
                    chat.with(|c| c.messages().to_vec())
                        .into_iter()
                        .map(|msg| {
                            let is_model = msg.role == Role::Model;
                            let time = msg.timestamp.with_timezone(&Local).format("%H:%M").to_string();
                            view! {
                                <div class="chat-message" class:chat-message--model=is_model>
                                    {if is_model {
                                        let rendered = render_markdown_html(&msg.text);
                                        view! { <div class="chat-message__markdown" inner_html=rendered></div> }
                                            .into_any()
                                    } else {
                                        view! { <span class="chat-message__text">{msg.text}</span> }.into_any()
                                    }}
                                    <time class="chat-message__time">{time}</time>
                                </div>
                            }
                        })
                        .collect::<Vec<_>>()
                }}
                {move || waiting().then(|| view! { <div class="chat-panel__loading">"正在思考..."</div> })}
            </div>
            <div class="chat-panel__input-row">
                <textarea
                    class="chat-panel__input"
                    rows="2"
                    placeholder="输入您的问题，Enter 发送，Shift+Enter 换行"
                    disabled=waiting
                    prop:value=move || input.get()
                    on:input=move |ev| input.set(event_target_value(&ev))
                    on:keydown=on_keydown
                ></textarea>
                <button class="btn btn--primary chat-panel__send" on:click=on_click disabled=move || !can_send()>
                    "发送"
                </button>
            </div>
        </div>
    }
}
