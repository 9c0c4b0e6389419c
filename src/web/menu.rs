//! Mobile menu wiring

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

use super::dom::{self, EventListener};
use crate::site::Menu;

struct MenuElements {
    burger: Element,
    nav: Element,
    body: Option<Element>,
}

impl MenuElements {
    fn show(&self, open: bool) {
        let _ = dom::set_class(&self.nav, "header__nav--open", open);
        let _ = dom::set_class(&self.burger, "active", open);
        if let Some(body) = &self.body {
            let _ = dom::set_class(body, "no-scroll", open);
        }
    }
}

pub fn install(document: &Document) -> Result<(), JsValue> {
    let (Some(burger), Some(nav)) = (
        document.query_selector(".header__burger")?,
        document.query_selector(".header__nav")?,
    ) else {
        return Ok(());
    };
    let elements = Rc::new(MenuElements {
        burger,
        nav,
        body: document.body().map(Into::into),
    });
    let menu = Rc::new(RefCell::new(Menu::default()));

    {
        let burger = elements.burger.clone();
        let elements = elements.clone();
        let menu = menu.clone();
        EventListener::new(&burger, "click", move |_: web_sys::Event| {
            let open = menu.borrow_mut().toggle();
            elements.show(open);
        })?
        .forget();
    }

    let links = dom::query_all(document, ".header__link")?;
    for link in links {
        let elements = elements.clone();
        let menu = menu.clone();
        EventListener::new(&link, "click", move |_: web_sys::Event| {
            if menu.borrow_mut().close() {
                elements.show(false);
            }
        })?
        .forget();
    }
    Ok(())
}
