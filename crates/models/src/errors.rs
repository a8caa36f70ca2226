use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("{0}")]
    Validation(String),
    #[error("unknown {field} value: {value}")]
    UnknownVariant { field: &'static str, value: String },
}
