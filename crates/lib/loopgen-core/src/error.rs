//! Errors raised while validating inputs and building the ring scenario.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid configuration for `{field}`: {reason}")]
    Configuration { field: String, reason: String },

    #[error("invalid network parameter `{parameter}`: {reason}")]
    Geometry {
        parameter: &'static str,
        reason: String,
    },

    #[error("`positions` holds {available} entries but {required} vehicles need placing")]
    PlacementRange { required: usize, available: usize },
}

impl CoreError {
    pub fn configuration(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::Configuration {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
