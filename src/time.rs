//! Platform-agnostic wall-clock time
//!
//! Milliseconds since the Unix epoch, the same scale as `Date.now()`.

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub fn now_millis() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(all(target_arch = "wasm32", feature = "wasm")))]
pub fn now_millis() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_millis_is_wall_clock() {
        // 2020-01-01T00:00:00Z
        assert!(now_millis() > 1_577_836_800_000.0);
    }
}
