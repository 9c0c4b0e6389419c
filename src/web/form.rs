//! Contact form wiring: captcha label, submit validation, simulated send

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlButtonElement, HtmlFormElement, HtmlInputElement};

use super::dom::{self, EventListener};
use crate::config::FormConfig;
use crate::site::{Captcha, ContactForm, FormField, FormInput, SubmitOutcome, ValidationReport};

const FORM_ID: &str = "contactForm";
const CAPTCHA_LABEL_ID: &str = "captchaLabel";
const SUCCESS_ID: &str = "formSuccess";
const BUTTON_SELECTOR: &str = ".form-btn";

fn input(document: &Document, field: FormField) -> Option<HtmlInputElement> {
    document
        .get_element_by_id(field.input_id())
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
}

fn read_input(document: &Document) -> FormInput {
    let value = |field| input(document, field).map(|i| i.value()).unwrap_or_default();
    FormInput {
        name: value(FormField::Name),
        email: value(FormField::Email),
        phone: value(FormField::Phone),
        captcha: value(FormField::Captcha),
    }
}

/// Toggle `error` on each input's parent group.
fn mark_fields(document: &Document, report: &ValidationReport) {
    for (field, ok) in report.verdicts() {
        let group = input(document, field).and_then(|i| i.parent_element());
        if let Some(group) = group {
            let _ = dom::set_class(&group, "error", !ok);
        }
    }
}

pub fn install(document: &Document, config: &FormConfig) -> Result<(), JsValue> {
    let Some(form_el) = document
        .get_element_by_id(FORM_ID)
        .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
    else {
        debug!("No contact form on this page");
        return Ok(());
    };

    let captcha = Captcha::generate(&mut rand::thread_rng(), config.captcha_max);
    if let Some(label) = document.get_element_by_id(CAPTCHA_LABEL_ID) {
        label.set_text_content(Some(&captcha.prompt()));
    }

    let state = Rc::new(RefCell::new(ContactForm::new(captcha)));
    let document = document.clone();
    let config = config.clone();
    let form = form_el.clone();

    EventListener::new(&form_el, "submit", move |event: web_sys::Event| {
        event.prevent_default();

        let outcome = state.borrow_mut().submit(&read_input(&document));
        match outcome {
            SubmitOutcome::Ignored => {}
            SubmitOutcome::Rejected(report) => {
                mark_fields(&document, &report);
                debug!(
                    invalid = report.invalid_fields().count(),
                    "Contact form rejected"
                );
            }
            SubmitOutcome::Sending(report) => {
                mark_fields(&document, &report);
                if let Err(e) = begin_send(&document, &form, &config, state.clone()) {
                    warn!(?e, "Contact form send failed");
                    state.borrow_mut().complete();
                }
            }
        }
    })?
    .forget();

    info!("Contact form ready");
    Ok(())
}

/// Swap the button into its sending state and finish after the configured delay.
fn begin_send(
    document: &Document,
    form: &HtmlFormElement,
    config: &FormConfig,
    state: Rc<RefCell<ContactForm>>,
) -> Result<(), JsValue> {
    let button = form
        .query_selector(BUTTON_SELECTOR)?
        .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok());
    let original_html = button.as_ref().map(|b| b.inner_html());
    if let Some(button) = &button {
        button.set_inner_html(&config.sending_html);
        button.set_disabled(true);
    }

    let document = document.clone();
    let form = form.clone();
    dom::set_timeout(config.submit_delay_ms, move || {
        if let Some(success) = document.get_element_by_id(SUCCESS_ID) {
            let _ = dom::set_class(&success, "visible", true);
        }
        form.reset();
        if let (Some(button), Some(html)) = (button, original_html) {
            button.set_inner_html(&html);
            button.set_disabled(false);
        }
        if let Some(captcha) = input(&document, FormField::Captcha) {
            captcha.set_value("");
            if let Some(group) = captcha.parent_element() {
                let _ = dom::set_class(&group, "error", false);
            }
        }
        state.borrow_mut().complete();
        info!("Contact form sent");
    })?;
    Ok(())
}
