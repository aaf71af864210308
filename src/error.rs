use thiserror::Error;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Coarse classification of why a candidate block was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionKind {
    Structural,
    Linkage,
    Integrity,
}

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Structural error: {0}")]
    Structural(String),

    #[error("Invalid block index: expected {expected}, got {found}")]
    IndexMismatch { expected: u64, found: i128 },

    #[error("Invalid previous block hash: expected {expected}, got {found}")]
    PreviousHashMismatch { expected: String, found: String },

    #[error("Invalid block hash: computed {expected}, declared {found}")]
    HashMismatch { expected: String, found: String },

    #[error("Invalid genesis block: {0}")]
    InvalidGenesis(String),

    #[error("Chain has no blocks")]
    EmptyChain,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl LedgerError {
    /// Returns the rejection kind for validation failures, `None` otherwise.
    pub fn kind(&self) -> Option<RejectionKind> {
        match self {
            LedgerError::Structural(_) => Some(RejectionKind::Structural),
            LedgerError::IndexMismatch { .. }
            | LedgerError::PreviousHashMismatch { .. }
            | LedgerError::InvalidGenesis(_) => Some(RejectionKind::Linkage),
            LedgerError::HashMismatch { .. } => Some(RejectionKind::Integrity),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_kinds() {
        assert_eq!(
            LedgerError::Structural("index".to_string()).kind(),
            Some(RejectionKind::Structural)
        );
        assert_eq!(
            LedgerError::IndexMismatch { expected: 1, found: 2 }.kind(),
            Some(RejectionKind::Linkage)
        );
        assert_eq!(
            LedgerError::PreviousHashMismatch {
                expected: "a".to_string(),
                found: "b".to_string(),
            }
            .kind(),
            Some(RejectionKind::Linkage)
        );
        assert_eq!(
            LedgerError::HashMismatch {
                expected: "a".to_string(),
                found: "b".to_string(),
            }
            .kind(),
            Some(RejectionKind::Integrity)
        );
        assert_eq!(
            LedgerError::InvalidGenesis("root".to_string()).kind(),
            Some(RejectionKind::Linkage)
        );
        assert_eq!(LedgerError::EmptyChain.kind(), None);
    }

    #[test]
    fn test_error_messages() {
        let err = LedgerError::IndexMismatch { expected: 4, found: 6 };
        assert_eq!(err.to_string(), "Invalid block index: expected 4, got 6");

        let err = LedgerError::IndexMismatch { expected: 1, found: -1 };
        assert_eq!(err.to_string(), "Invalid block index: expected 1, got -1");
    }
}
