//! Cookie banner backed by `localStorage`

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Storage};

use super::dom::{self, EventListener};
use crate::config::ConsentConfig;
use crate::site::{Consent, ConsentStore, PageStore};

const POPUP_ID: &str = "cookiePopup";
const ACCEPT_ID: &str = "cookieAccept";

struct LocalStorage(Storage);

impl ConsentStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        match self.0.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(?e, key, "localStorage read failed");
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        self.0
            .set_item(key, value)
            .map_err(|e| format!("{e:?}"))
    }
}

pub fn install(document: &Document, config: &ConsentConfig) -> Result<(), JsValue> {
    let storage = match dom::window()?.local_storage() {
        Ok(storage) => storage,
        Err(e) => {
            warn!(?e, "localStorage unavailable");
            None
        }
    };
    let consent = Rc::new(RefCell::new(Consent::new(
        PageStore::or_session(storage.map(LocalStorage)),
        config.storage_key.clone(),
    )));
    let popup = document.get_element_by_id(POPUP_ID);

    if consent.borrow().needs_prompt() {
        if let Some(popup) = popup.clone() {
            dom::set_timeout(config.show_delay_ms, move || {
                let _ = dom::set_class(&popup, "show", true);
            })?;
        }
    } else {
        debug!("Cookie consent already given");
    }

    if let Some(button) = document.get_element_by_id(ACCEPT_ID) {
        EventListener::new(&button, "click", move |_: web_sys::Event| {
            consent.borrow_mut().accept();
            if let Some(popup) = &popup {
                let _ = dom::set_class(popup, "show", false);
            }
        })?
        .forget();
    }
    Ok(())
}
