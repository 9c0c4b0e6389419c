//! Scroll reveal: `.reveal-up` elements get `active` the first time they
//! scroll into view

use tracing::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use super::dom;
use crate::config::RevealConfig;

const REVEAL_SELECTOR: &str = ".reveal-up";

pub fn install(document: &Document, config: &RevealConfig) -> Result<(), JsValue> {
    let elements = dom::query_all(document, REVEAL_SELECTOR)?;
    if elements.is_empty() {
        return Ok(());
    }

    let callback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    let target = entry.target();
                    let _ = dom::set_class(&target, "active", true);
                    // Reveal once
                    observer.unobserve(&target);
                }
            }
        },
    ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(config.threshold));
    options.set_root_margin(&config.root_margin);

    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    callback.forget();

    for element in &elements {
        observer.observe(element);
    }
    debug!(count = elements.len(), "Scroll reveal observing");
    Ok(())
}
