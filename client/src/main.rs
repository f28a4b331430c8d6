//! Browser entry point, built by `trunk` with the `csr` feature.

fn main() {
    #[cfg(feature = "csr")]
    {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Debug) {
            web_sys::console::error_1(&format!("logger init failed: {e}").into());
        }
        leptos::mount::mount_to_body(client::app::App);
    }
}
