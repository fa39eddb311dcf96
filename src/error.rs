//! Cart Errors
//!
//! Error type shared by the widget, loaders and exports.

use wasm_bindgen::{JsCast, JsValue};

/// Common result type for cart operations
pub type CartResult<T> = Result<T, CartError>;

/// Cart widget errors
#[derive(Debug, Clone, PartialEq)]
pub enum CartError {
    /// A required element is not in the page
    MissingElement(String),
    /// Configuration failed to parse or validate
    InvalidConfig(String),
    /// A DOM call threw
    Dom(String),
    /// The cart loader failed
    Load(String),
}

impl std::fmt::Display for CartError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CartError::MissingElement(what) => write!(f, "Missing element: {}", what),
            CartError::InvalidConfig(msg) => write!(f, "Invalid config: {}", msg),
            CartError::Dom(msg) => write!(f, "DOM error: {}", msg),
            CartError::Load(msg) => write!(f, "Cart load failed: {}", msg),
        }
    }
}

impl std::error::Error for CartError {}

impl From<JsValue> for CartError {
    fn from(value: JsValue) -> Self {
        CartError::Dom(js_error_message(&value))
    }
}

impl From<CartError> for JsValue {
    fn from(err: CartError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Best-effort message for a thrown JS value
pub fn js_error_message(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    match value.dyn_ref::<js_sys::Error>() {
        Some(err) => String::from(err.message()),
        None => format!("{:?}", value),
    }
}
