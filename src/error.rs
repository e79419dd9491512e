//! Structured error types for advent.
//!
//! Only construction and configuration can fail. Everything that runs in
//! response to page events degrades silently instead of returning an error.

/// All errors that can occur while configuring or driving the calendar.
#[derive(Debug, thiserror::Error)]
pub enum AdventError {
    /// Grid geometry violates one of its invariants.
    #[error("Invalid grid geometry: {0}")]
    InvalidGeometry(String),

    /// Configuration value out of range or inconsistent.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// JSON (de)serialization error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A DOM call failed in a way the caller cannot recover from.
    #[error("DOM error: {0}")]
    Dom(String),

    /// I/O error (CLI only).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AdventError>;

impl From<String> for AdventError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for AdventError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for AdventError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<AdventError> for wasm_bindgen::JsValue {
    fn from(e: AdventError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
