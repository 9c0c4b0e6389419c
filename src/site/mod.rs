//! Page glue around the particle field: contact form, captcha, cookie banner,
//! FAQ accordion and the mobile menu
//!
//! State and rules only; the browser wiring lives in `crate::web`.

pub mod accordion;
pub mod captcha;
pub mod consent;
pub mod form;
pub mod menu;

pub use accordion::Accordion;
pub use captcha::{parse_int, Captcha};
pub use consent::{Consent, ConsentStore, MemoryStore, PageStore};
pub use form::{validate, ContactForm, FormField, FormInput, SubmitOutcome, ValidationReport};
pub use menu::Menu;
