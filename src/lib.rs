//! Landing page effects
//!
//! A rotating particle field behind the hero section plus the small page
//! behaviours around it (contact form, cookie banner, accordion, menu,
//! scroll reveal). Built for the browser with `--features wasm`; the
//! particle field can also be previewed natively with `--features preview`.

pub mod config;
pub mod error;
pub mod field;
pub mod site;
pub mod time;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub mod web;

#[cfg(all(not(target_arch = "wasm32"), feature = "preview"))]
pub mod app;
#[cfg(all(not(target_arch = "wasm32"), feature = "preview"))]
pub mod theme;
