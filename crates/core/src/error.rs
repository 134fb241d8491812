use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Why a synthesizer could not produce a value for the current tick.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SynthesisError {
    #[error("catalog has no templates")]
    NoTemplates,

    #[error("catalog has no authors")]
    NoAuthors,

    #[error("catalog has no image styles")]
    NoStyles,

    #[error("template '{theme}' has no candidates for slot '{slot}'")]
    EmptyCandidates { theme: String, slot: String },

    #[error("template '{theme}' has a malformed skeleton: {reason}")]
    MalformedSkeleton { theme: String, reason: String },
}

/// Failure to load or validate a template catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid catalog: {0}")]
    Invalid(String),
}
