pub mod app;
pub mod domain;
pub mod layout;
pub mod pages;
pub mod shared;

use leptos::prelude::*;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::JsCast;

use crate::app::App;
use crate::shared::config::{load_config, PageConfig};

/// Mount the page into the configured container. A missing container is a
/// configuration error: it is logged and nothing is mounted.
pub fn mount(config: PageConfig) {
    let selector = config.page.root_selector.clone();
    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.query_selector(&selector).ok().flatten())
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok());

    match root {
        Some(root) => {
            log::info!("Mounting transactions page into {}", selector);
            leptos::mount::mount_to(root, move || view! { <App config=config /> }).forget();
        }
        None => log::error!("Element {} does not exist, transactions page is not mounted", selector),
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    let config = load_config().unwrap_or_else(|e| {
        log::warn!("Invalid page config, falling back to defaults: {}", e);
        PageConfig::default()
    });
    mount(config);
}
