use thiserror::Error;

/// Problems detected while building page state from configuration.
///
/// All of these surface once, at construction; nothing downstream re-checks.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("phrase queue is empty")]
    EmptyPhraseQueue,
    #[error("section registry is empty")]
    EmptyRegistry,
    #[error("duplicate section id: {0}")]
    DuplicateSection(String),
    #[error("{name} must be greater than zero")]
    ZeroInterval { name: &'static str },
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Rejections from the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactFormError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
    #[error("a message is already being sent")]
    AlreadySubmitting,
}
