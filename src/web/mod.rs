//! Browser entry point
//!
//! Reads the page config, then brings up every page behaviour independently:
//! a missing element or an unsupported API only disables its own part.

mod accordion;
mod consent;
mod dom;
mod field;
mod form;
mod icons;
mod menu;
mod reveal;

use std::cell::RefCell;

use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::Document;

use crate::config::{SiteConfig, CONFIG_GLOBAL};
use dom::EventListener;
pub use field::FieldHandle;

thread_local! {
    static FIELD: RefCell<Option<FieldHandle>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    // Initialize tracing for browser console
    tracing_wasm::set_as_global_default();

    let document = match dom::document() {
        Ok(document) => document,
        Err(e) => {
            warn!(?e, "No document, nothing to do");
            return;
        }
    };

    if document.ready_state() == "loading" {
        let ready_document = document.clone();
        match EventListener::new(&document, "DOMContentLoaded", move |_: web_sys::Event| {
            boot(&ready_document);
        }) {
            Ok(listener) => listener.forget(),
            Err(e) => warn!(?e, "Could not wait for DOMContentLoaded"),
        }
    } else {
        boot(&document);
    }
}

/// Stop the particle field animation and detach its listeners.
#[wasm_bindgen]
pub fn teardown_particle_field() {
    match FIELD.with(|slot| slot.borrow_mut().take()) {
        Some(handle) => handle.teardown(),
        None => debug!("No particle field to tear down"),
    }
}

fn page_config() -> SiteConfig {
    let json = js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str(CONFIG_GLOBAL))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
        .and_then(|v| js_sys::JSON::stringify(&v).ok())
        .map(String::from);
    SiteConfig::from_json_or_default(json.as_deref())
}

fn boot(document: &Document) {
    let config = page_config();
    info!("Landing page effects starting");

    if let Err(e) = menu::install(document) {
        warn!(?e, "Mobile menu unavailable");
    }
    if let Err(e) = reveal::install(document, &config.reveal) {
        warn!(?e, "Scroll reveal unavailable");
    }
    if let Err(e) = accordion::install(document) {
        warn!(?e, "Accordion unavailable");
    }
    if let Err(e) = form::install(document, &config.form) {
        warn!(?e, "Contact form unavailable");
    }
    if let Err(e) = consent::install(document, &config.consent) {
        warn!(?e, "Cookie banner unavailable");
    }
    if let Err(e) = icons::install() {
        warn!(?e, "Icons unavailable");
    }

    let field_config = config.field;
    wasm_bindgen_futures::spawn_local(async move {
        match field::mount(&field_config).await {
            Ok(handle) => {
                FIELD.with(|slot| {
                    if let Some(previous) = slot.borrow_mut().replace(handle) {
                        previous.teardown();
                    }
                });
            }
            Err(e) if e.is_unsupported() => info!(reason = %e, "Particle field disabled"),
            Err(e) => warn!(error = %e, "Particle field failed to start"),
        }
    });
}
