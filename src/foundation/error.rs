pub type VerdantResult<T> = Result<T, VerdantError>;

/// Errors produced by the orchestration layer.
///
/// Most of these never escape [`crate::Stage::mount`]: setup and teardown absorb them and log
/// instead. They surface through the lower-level APIs (document, selectors, renderers, JSON
/// loading) where a caller can act on them.
#[derive(thiserror::Error, Debug)]
pub enum VerdantError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("selector error: {0}")]
    Selector(String),

    #[error("document error: {0}")]
    Dom(String),

    #[error("animation error: {0}")]
    Animation(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VerdantError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn selector(msg: impl Into<String>) -> Self {
        Self::Selector(msg.into())
    }

    pub fn dom(msg: impl Into<String>) -> Self {
        Self::Dom(msg.into())
    }

    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for VerdantError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
