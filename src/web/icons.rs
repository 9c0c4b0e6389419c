//! Icon font bootstrap through the page's `lucide` global, when loaded

use tracing::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

pub fn install() -> Result<(), JsValue> {
    let global = js_sys::global();
    let lucide = js_sys::Reflect::get(&global, &JsValue::from_str("lucide"))?;
    if lucide.is_undefined() || lucide.is_null() {
        debug!("lucide not loaded, skipping icons");
        return Ok(());
    }
    let create = js_sys::Reflect::get(&lucide, &JsValue::from_str("createIcons"))?;
    let create = create.dyn_into::<js_sys::Function>()?;
    create.call0(&lucide)?;
    Ok(())
}
