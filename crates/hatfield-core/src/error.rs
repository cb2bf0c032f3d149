use std::io;

/// Result type for field operations
pub type FieldResult<T> = Result<T, FieldError>;

/// Errors that can stop a session before or while it runs.
///
/// Gameplay endings (falling into a hole, leaving the field, a bad key) are
/// not errors; they are reported as [`crate::Outcome`]s.
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    /// Dimensions or hole percentage cannot describe a playable field
    #[error("Invalid field configuration: {0}")]
    InvalidConfig(String),

    /// No free cell was left to place on
    #[error("No free cell left to place on after {attempts} random draws")]
    GenerationExhausted { attempts: usize },

    /// Every regenerated field was unsolvable
    #[error("No solvable field found after {attempts} generations")]
    NoSolvableField { attempts: usize },

    /// A renderer, input source or clock failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
