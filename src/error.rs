use thiserror::Error;

/// Errors that abort a whole prediction run.
///
/// A driver whose team can't be matched is not an error; it is reported
/// through [`crate::ranking::Prediction::skipped`] instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PredictError {
    /// No track matched the identifier by code or by name
    #[error("Track '{0}' not found.")]
    TrackNotFound(String),
}
