use thiserror::Error;

/// Malformed user input, rejected before it reaches the core.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("invalid alert threshold '{value}', expected a non-negative number")]
    InvalidThreshold { value: String },
    #[error("invalid alert kind '{value}', expected one of price, pe, volume")]
    InvalidAlertKind { value: String },
    #[error("invalid alert condition '{value}', expected above or below")]
    InvalidCondition { value: String },
}

/// Durable storage could not be read or written.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] fjall::Error),

    #[error("corrupt value under key '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Upper-cases and trims a user supplied symbol, rejecting empty input.
pub fn normalize_symbol(input: &str) -> Result<String, ValidationError> {
    let symbol = input.trim();
    if symbol.is_empty() {
        return Err(ValidationError::EmptySymbol);
    }
    Ok(symbol.to_uppercase())
}
