//! Site configuration
//!
//! Every section has defaults matching the shipped landing page, so an empty
//! object (or no config at all) reproduces it. On the web the config is read
//! from `window.__landing_fx_config`; the native preview reads the
//! `LANDING_FX_CONFIG` environment variable.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;
use crate::field::{Camera, MotionParams, MAX_PIXEL_RATIO};

/// Environment variable holding a JSON config for the native preview
pub const CONFIG_ENV_VAR: &str = "LANDING_FX_CONFIG";

/// Global object property holding the config on the page
pub const CONFIG_GLOBAL: &str = "__landing_fx_config";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub field: FieldConfig,
    pub form: FormConfig,
    pub consent: ConsentConfig,
    pub reveal: RevealConfig,
}

/// Particle field appearance and motion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Id of the element the canvas is appended to
    pub container_id: String,
    pub point_count: usize,
    /// Edge length of the cube the points are drawn from
    pub cube_side: f32,
    /// Point size in world units
    pub point_size: f32,
    /// 0xRRGGBB
    pub color: u32,
    pub opacity: f32,
    pub max_pixel_ratio: f64,
    pub camera: Camera,
    pub motion: MotionParams,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            container_id: "canvas-container".to_string(),
            point_count: 700,
            cube_side: 3.5,
            point_size: 0.012,
            color: 0x2563EB,
            opacity: 0.8,
            max_pixel_ratio: MAX_PIXEL_RATIO,
            camera: Camera::default(),
            motion: MotionParams::default(),
        }
    }
}

impl FieldConfig {
    /// Colour as straight (non-premultiplied) RGBA in 0..1
    pub fn rgba(&self) -> [f32; 4] {
        let channel = |shift: u32| ((self.color >> shift) & 0xFF) as f32 / 255.0;
        [channel(16), channel(8), channel(0), self.opacity]
    }
}

/// Contact form behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Simulated submission time before the success banner shows
    pub submit_delay_ms: u32,
    /// Largest captcha operand (operands are drawn from 1..=max)
    pub captcha_max: u32,
    /// Button markup shown while the submission is "in flight"
    pub sending_html: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: 1500,
            captcha_max: 10,
            sending_html: "<span>Отправка...</span>".to_string(),
        }
    }
}

/// Cookie banner behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsentConfig {
    pub storage_key: String,
    /// Delay before the banner slides in for visitors who have not accepted
    pub show_delay_ms: u32,
}

impl Default for ConsentConfig {
    fn default() -> Self {
        Self {
            storage_key: "cookiesAccepted".to_string(),
            show_delay_ms: 2000,
        }
    }
}

/// Scroll reveal observer options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub threshold: f64,
    pub root_margin: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.15,
            root_margin: "0px 0px -50px 0px".to_string(),
        }
    }
}

impl SiteConfig {
    /// Parse and validate a JSON config. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse `json` if present, falling back to defaults on any error.
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        match json.map(Self::from_json) {
            Some(Ok(config)) => config,
            Some(Err(e)) => {
                warn!(error = %e, "Ignoring site config, using defaults");
                Self::default()
            }
            None => Self::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let f = &self.field;
        if !(f.cube_side.is_finite() && f.cube_side > 0.0) {
            return Err(invalid("field.cube_side", "must be a positive number"));
        }
        if !(f.point_size.is_finite() && f.point_size > 0.0) {
            return Err(invalid("field.point_size", "must be a positive number"));
        }
        if !(0.0..=1.0).contains(&f.opacity) {
            return Err(invalid("field.opacity", "must be within 0..=1"));
        }
        if f.color > 0xFF_FFFF {
            return Err(invalid("field.color", "must be a 0xRRGGBB value"));
        }
        if !(1.0..=MAX_PIXEL_RATIO).contains(&f.max_pixel_ratio) {
            return Err(invalid("field.max_pixel_ratio", "must be within 1..=2"));
        }
        let cam = &f.camera;
        if !(cam.fov_degrees > 0.0 && cam.fov_degrees < 180.0) {
            return Err(invalid("field.camera.fov_degrees", "must be within (0, 180)"));
        }
        if !(cam.near > 0.0 && cam.far > cam.near) {
            return Err(invalid("field.camera", "requires 0 < near < far"));
        }
        let k = f.motion.smoothing;
        if !(k > 0.0 && k <= 1.0) {
            return Err(invalid("field.motion.smoothing", "must be within (0, 1]"));
        }
        if self.form.captcha_max == 0 {
            return Err(invalid("form.captcha_max", "must be at least 1"));
        }
        if self.consent.storage_key.is_empty() {
            return Err(invalid("consent.storage_key", "must not be empty"));
        }
        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(invalid("reveal.threshold", "must be within 0..=1"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_gives_defaults() {
        let config = SiteConfig::from_json("{}").unwrap();
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.field.point_count, 700);
        assert_eq!(config.field.max_pixel_ratio, 2.0);
        assert_eq!(config.form.submit_delay_ms, 1500);
        assert_eq!(config.consent.storage_key, "cookiesAccepted");
        assert_eq!(config.reveal.root_margin, "0px 0px -50px 0px");
    }

    #[test]
    fn test_nested_partial_override() {
        let config = SiteConfig::from_json(
            r#"{"field": {"point_count": 1200, "motion": {"drift_y": 0.0}}, "consent": {"show_delay_ms": 0}}"#,
        )
        .unwrap();
        assert_eq!(config.field.point_count, 1200);
        assert_eq!(config.field.motion.drift_y, 0.0);
        assert_eq!(config.field.motion.drift_x, 0.001);
        assert_eq!(config.field.cube_side, 3.5);
        assert_eq!(config.consent.show_delay_ms, 0);
        assert_eq!(config.consent.storage_key, "cookiesAccepted");
    }

    #[test]
    fn test_parse_error() {
        let err = SiteConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_invalid_values_rejected() {
        for (json, field) in [
            (r#"{"field": {"cube_side": 0.0}}"#, "field.cube_side"),
            (r#"{"field": {"opacity": 1.5}}"#, "field.opacity"),
            (r#"{"field": {"color": 16777216}}"#, "field.color"),
            (r#"{"field": {"max_pixel_ratio": 0.5}}"#, "field.max_pixel_ratio"),
            (r#"{"field": {"max_pixel_ratio": 3.0}}"#, "field.max_pixel_ratio"),
            (r#"{"field": {"camera": {"near": 5.0, "far": 1.0}}}"#, "field.camera"),
            (r#"{"field": {"motion": {"smoothing": 0.0}}}"#, "field.motion.smoothing"),
            (r#"{"form": {"captcha_max": 0}}"#, "form.captcha_max"),
            (r#"{"consent": {"storage_key": ""}}"#, "consent.storage_key"),
            (r#"{"reveal": {"threshold": 2.0}}"#, "reveal.threshold"),
        ] {
            match SiteConfig::from_json(json) {
                Err(ConfigError::Invalid { field: f, .. }) => assert_eq!(f, field, "{}", json),
                other => panic!("expected invalid {} for {}, got {:?}", field, json, other),
            }
        }
    }

    #[test]
    fn test_fallback_to_defaults() {
        assert_eq!(SiteConfig::from_json_or_default(None), SiteConfig::default());
        assert_eq!(
            SiteConfig::from_json_or_default(Some("{\"field\": 3")),
            SiteConfig::default()
        );
        let custom = SiteConfig::from_json_or_default(Some(r#"{"form": {"captcha_max": 5}}"#));
        assert_eq!(custom.form.captcha_max, 5);
    }

    #[test]
    fn test_rgba_from_hex() {
        let rgba = FieldConfig::default().rgba();
        assert!((rgba[0] - 0x25 as f32 / 255.0).abs() < 1e-6);
        assert!((rgba[1] - 0x63 as f32 / 255.0).abs() < 1e-6);
        assert!((rgba[2] - 0xEB as f32 / 255.0).abs() < 1e-6);
        assert_eq!(rgba[3], 0.8);
    }

    #[test]
    fn test_round_trips_through_json() {
        let config = SiteConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(SiteConfig::from_json(&json).unwrap(), config);
    }
}
