use thiserror::Error;

/// Errors raised while parsing core configuration values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid {kind}: {value}")]
    InvalidValue { kind: &'static str, value: String },
}
