//! Errors that can stop the deck from starting.
//!
//! Navigation itself never fails: out-of-range targets are clamped and
//! missing elements turn their render ops into no-ops.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum DeckError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("document has no body")]
    NoBody,
    #[error("javascript error: {0}")]
    Js(String),
    #[error("invalid deck config: {0}")]
    Config(#[from] serde_json::Error),
}

impl From<JsValue> for DeckError {
    fn from(value: JsValue) -> Self {
        DeckError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

pub type Result<T> = std::result::Result<T, DeckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        assert_eq!(
            DeckError::Js("SecurityError".into()).to_string(),
            "javascript error: SecurityError"
        );
        assert_eq!(DeckError::NoBody.to_string(), "document has no body");
    }

    #[test]
    fn json_errors_convert() {
        let err: DeckError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, DeckError::Config(_)));
        assert!(err.to_string().starts_with("invalid deck config"));
    }
}
