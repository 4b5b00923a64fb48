//! Field construction errors.

/// Errors raised when a field is constructed with unusable parameters.
///
/// All of these are fatal at construction time; queries themselves are total
/// and never fail.
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    /// The height field domain must be a positive extent.
    #[error("domain size must be positive, got {0}")]
    DomainSize(i64),

    /// The cellular field needs a positive point density.
    #[error("point density must be positive, got {0}")]
    Density(f64),

    /// The cellular field needs a positive expected point count per cell.
    #[error("expected points per cell must be positive, got {0}")]
    ExpectedPoints(f64),

    /// The wave field needs at least one octave.
    #[error("octave count must be at least 1")]
    Octaves,

    /// The wave field's logistic squash needs a positive temperature.
    #[error("logistic temperature must be positive, got {0}")]
    Temperature(f64),
}
