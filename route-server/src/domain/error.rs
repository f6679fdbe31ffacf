//! Domain error types.
//!
//! These errors represent validation failures in the domain layer.
//! They are distinct from store and API errors.

use super::StopId;

/// Domain-level errors for validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Latitude outside [-90, 90] or longitude outside [-180, 180]
    #[error("coordinate out of range: ({latitude}, {longitude})")]
    CoordinateOutOfRange { latitude: f64, longitude: f64 },

    /// Only one of latitude/longitude was given
    #[error("stop {0} has only one of latitude/longitude")]
    PartialCoordinate(StopId),

    /// Stop record without an English or Myanmar name
    #[error("stop {0} has an empty name")]
    EmptyStopName(StopId),
}
