//! Error types shared by the particle field and the configuration loader

/// Why the particle field did not come up, or why a surface operation failed.
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    #[error("particle field container not found")]
    MissingTarget,

    #[error("3D rendering is not available")]
    NoGraphics,

    #[error("surface error: {0}")]
    Surface(String),

    #[error("device error: {0}")]
    Device(String),
}

impl FieldError {
    /// Degradation cases: the page simply runs without the field.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, FieldError::MissingTarget | FieldError::NoGraphics)
    }
}

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
impl From<wgpu::CreateSurfaceError> for FieldError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        FieldError::Surface(e.to_string())
    }
}

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
impl From<wgpu::RequestDeviceError> for FieldError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        FieldError::Device(e.to_string())
    }
}

/// Configuration could not be read or holds values the page cannot use.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}
