//! FAQ accordion wiring

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use super::dom::{self, EventListener};
use crate::site::Accordion;

const ITEM_SELECTOR: &str = ".accordion__item";
const HEADER_SELECTOR: &str = ".accordion__header";

struct Item {
    element: Element,
    /// The header's next sibling
    body: Option<HtmlElement>,
}

/// Show open items at their full content height, collapse the rest.
fn apply(items: &[Item], open: &[bool]) {
    for (item, &is_open) in items.iter().zip(open) {
        let _ = dom::set_class(&item.element, "active", is_open);
        if let Some(body) = &item.body {
            let style = body.style();
            let _ = if is_open {
                style.set_property("max-height", &format!("{}px", body.scroll_height()))
            } else {
                style.remove_property("max-height").map(|_| ())
            };
        }
    }
}

pub fn install(document: &Document) -> Result<(), JsValue> {
    let mut items = Vec::new();
    let mut headers = Vec::new();
    for element in dom::query_all(document, ITEM_SELECTOR)? {
        let header = element.query_selector(HEADER_SELECTOR)?;
        let body = header
            .as_ref()
            .and_then(|h| h.next_element_sibling())
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        headers.push(header);
        items.push(Item { element, body });
    }

    let open = items
        .iter()
        .map(|item| item.element.class_list().contains("active"))
        .collect();
    let state = Rc::new(RefCell::new(Accordion::from_open(open)));
    let items = Rc::new(items);

    for (index, header) in headers.into_iter().enumerate() {
        let Some(header) = header else {
            continue;
        };
        let items = items.clone();
        let state = state.clone();
        EventListener::new(&header, "click", move |_: web_sys::Event| {
            let mut state = state.borrow_mut();
            apply(&items, state.toggle(index));
        })?
        .forget();
    }
    Ok(())
}
