//! Result type alias for medroi

use super::errors::MedRoiError;

/// Result type alias for medroi operations
///
/// # Examples
///
/// ```
/// use medroi::domain::result::Result;
/// use medroi::domain::errors::MedRoiError;
///
/// fn failing_function() -> Result<()> {
///     Err(MedRoiError::validation("hospital.name", "must not be empty"))
/// }
/// ```
pub type Result<T> = std::result::Result<T, MedRoiError>;
