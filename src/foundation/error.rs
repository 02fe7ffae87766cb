/// Convenience result type used across Slidecast.
pub type SlidecastResult<T> = Result<T, SlidecastError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum SlidecastError {
    /// A slide's own duration/transition values violate the ordering
    /// invariant. Raised at slide construction, before any timeline work.
    #[error("invalid slide: {0}")]
    InvalidSlide(String),

    /// Uniform-mode placement math yields a per-slide duration that cannot
    /// fit the requested transition.
    #[error("insufficient audio duration: {0}")]
    InsufficientAudioDuration(String),

    /// Invalid user-provided data outside the slide invariants.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors probing or decoding external media sources.
    #[error("media error: {0}")]
    Media(String),

    /// Opaque failure reported by a render driver; propagated unchanged.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SlidecastError {
    /// Build a [`SlidecastError::InvalidSlide`] value.
    pub fn invalid_slide(msg: impl Into<String>) -> Self {
        Self::InvalidSlide(msg.into())
    }

    /// Build a [`SlidecastError::InsufficientAudioDuration`] value.
    pub fn insufficient_audio(msg: impl Into<String>) -> Self {
        Self::InsufficientAudioDuration(msg.into())
    }

    /// Build a [`SlidecastError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SlidecastError::Media`] value.
    pub fn media(msg: impl Into<String>) -> Self {
        Self::Media(msg.into())
    }

    /// Build a [`SlidecastError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
