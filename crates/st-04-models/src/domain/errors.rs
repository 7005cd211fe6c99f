//! Error types for Models

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// The factory could not produce an instance.
    #[error("Model '{model}' could not be constructed: {reason}")]
    Construct { model: String, reason: String },

    /// The instance was built but its init hook failed.
    #[error("Model '{model}' failed to initialize: {reason}")]
    Init { model: String, reason: String },
}

impl ModelError {
    pub fn construct(model: impl Into<String>, reason: impl Into<String>) -> Self {
        ModelError::Construct {
            model: model.into(),
            reason: reason.into(),
        }
    }

    pub fn init(model: impl Into<String>, reason: impl Into<String>) -> Self {
        ModelError::Init {
            model: model.into(),
            reason: reason.into(),
        }
    }
}
