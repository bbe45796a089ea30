//! Error types for level generation and persistence

use std::fmt;

/// A level could not be generated under the current tuning.
///
/// These indicate a broken difficulty curve or tuning file rather than a
/// recoverable runtime condition, so callers are expected to fail fast.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationError {
    /// Asked to split `total` into `parts` positive integers with `total < parts`
    InvalidPartition { parts: usize, total: u32 },
    /// More distinct colors requested than the palette holds
    PaletteTooSmall { needed: usize, available: usize },
    /// Obstacle budget cannot fit under the per-wedge density bound
    DensityInfeasible { obstacles: u32, capacity: u32 },
    /// A rejection-sampling loop ran out of attempts
    ResampleBudgetExhausted { what: &'static str, attempts: u32 },
    /// Tuning values that can never produce a playable level
    InvalidTuning(String),
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::InvalidPartition { parts, total } => {
                write!(f, "cannot split {total} into {parts} positive parts")
            }
            GenerationError::PaletteTooSmall { needed, available } => {
                write!(f, "need {needed} distinct colors but palette has {available}")
            }
            GenerationError::DensityInfeasible { obstacles, capacity } => write!(
                f,
                "{obstacles} obstacles exceed remaining wedge capacity {capacity}"
            ),
            GenerationError::ResampleBudgetExhausted { what, attempts } => {
                write!(f, "gave up placing {what} after {attempts} attempts")
            }
            GenerationError::InvalidTuning(reason) => write!(f, "invalid tuning: {reason}"),
        }
    }
}

impl std::error::Error for GenerationError {}

/// Best score could not be read or written
#[derive(Debug)]
pub enum PersistError {
    Io(std::io::Error),
    Json(serde_json::Error),
    /// Storage backend unavailable (no data directory, no LocalStorage)
    Unavailable,
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistError::Io(e) => write!(f, "best score I/O failed: {e}"),
            PersistError::Json(e) => write!(f, "best score record malformed: {e}"),
            PersistError::Unavailable => write!(f, "no storage available for best score"),
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistError::Io(e) => Some(e),
            PersistError::Json(e) => Some(e),
            PersistError::Unavailable => None,
        }
    }
}

impl From<std::io::Error> for PersistError {
    fn from(e: std::io::Error) -> Self {
        PersistError::Io(e)
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(e: serde_json::Error) -> Self {
        PersistError::Json(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_error_messages() {
        let e = GenerationError::PaletteTooSmall {
            needed: 4,
            available: 3,
        };
        assert_eq!(e.to_string(), "need 4 distinct colors but palette has 3");

        let e = GenerationError::InvalidPartition { parts: 5, total: 2 };
        assert!(e.to_string().contains("5 positive parts"));
    }

    #[test]
    fn test_persist_error_from_json() {
        let err = serde_json::from_str::<u32>("nope").unwrap_err();
        let e: PersistError = err.into();
        assert!(matches!(e, PersistError::Json(_)));
        assert!(std::error::Error::source(&e).is_some());
    }
}
