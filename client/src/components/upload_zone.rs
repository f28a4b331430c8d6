//! Sensor file picker.

use leptos::prelude::*;

use crate::state::dashboard::DashboardState;

const ACCEPT: &str = ".csv,.json,.txt";

#[component]
pub fn UploadZone() -> impl IntoView {
    let dashboard = expect_context::<RwSignal<DashboardState>>();
    let input_ref = NodeRef::<leptos::html::Input>::new();

    let on_change = move |_| {
        #[cfg(feature = "csr")]
        {
            let Some(input) = input_ref.get() else {
                return;
            };
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            input.set_value("");
            let name = file.name();
            leptos::task::spawn_local(async move {
                match wasm_bindgen_futures::JsFuture::from(file.text()).await {
                    Ok(value) => {
                        let content = value.as_string().unwrap_or_default();
                        if let Some(Ok(count)) = dashboard.try_update(|d| d.ingest_file(&name, &content)) {
                            log::info!("loaded {count} sensor points from {name}");
                        }
                    }
                    Err(e) => {
                        log::warn!("reading {name} failed: {e:?}");
                        dashboard.update(|d| d.upload_error = Some(format!("{name}: 文件读取失败")));
                    }
                }
            });
        }
    };

    view! {
        <label class="upload-zone">
            <input class="upload-zone__input" type="file" accept=ACCEPT node_ref=input_ref on:change=on_change/>
            <span>"上传传感器数据（.csv / .json / .txt）"</span>
        </label>
        <Show when=move || dashboard.with(|d| d.upload_error.is_some())>
            <p class="upload-zone__error">{move || dashboard.with(|d| d.upload_error.clone().unwrap_or_default())}</p>
        </Show>
    }
}
