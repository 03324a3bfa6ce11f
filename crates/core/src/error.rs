/// Result alias that carries the custom [`LightingError`] type.
pub type Result<T> = std::result::Result<T, LightingError>;

/// Common error type for the core crate.
///
/// Only load-time shape problems and infrastructure failures surface here.
/// Out-of-range values and unknown identifiers degrade to defaults instead.
#[derive(Debug, thiserror::Error)]
pub enum LightingError {
    /// Free-form message for conditions without a dedicated variant.
    #[error("{0}")]
    Message(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Instruction, config or inventory JSON that could not be decoded.
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    /// An instruction failed the load-time shape checks.
    #[error("instruction `{scene_id}` rejected: {reason}")]
    InvalidInstruction { scene_id: String, reason: String },
    /// A shared lock was poisoned by a panicking holder.
    #[error("{0} has been poisoned")]
    Poisoned(&'static str),
}

impl LightingError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }

    pub(crate) fn invalid_instruction(scene_id: &str, reason: impl Into<String>) -> Self {
        Self::InvalidInstruction {
            scene_id: scene_id.to_string(),
            reason: reason.into(),
        }
    }
}
