//! Browser entry point. Trunk builds this binary with `--features csr`.

fn main() {
    #[cfg(feature = "csr")]
    {
        console_error_panic_hook::set_once();
        if let Err(err) = console_log::init_with_level(log::Level::Debug) {
            web_sys::console::error_1(&format!("logger init failed: {err}").into());
        }
        log::info!("book-tracker starting");
        leptos::mount::mount_to_body(book_tracker::app::App);
    }
}
