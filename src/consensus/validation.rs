use crate::core::Block;
use crate::{LedgerError, Result};
use serde_json::Value;

/// Gatekeeper for chain appends. Checks run in a fixed order and the first
/// failure decides the verdict: structure, index linkage, previous-hash
/// linkage, then hash integrity.
#[derive(Debug, Clone, Default)]
pub struct BlockValidator;

impl BlockValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate an untyped candidate against `previous` and return the
    /// decoded block on success.
    pub fn validate_value(&self, candidate: &Value, previous: &Block) -> Result<Block> {
        log::debug!("Checking candidate structure");
        Block::check_structure(candidate)?;

        let block = Block::decode(candidate, expected_index(previous)?)?;
        self.validate_block(&block, previous)?;
        Ok(block)
    }

    /// Validate a typed candidate against `previous`. A `Block` value always
    /// has the right field kinds, so only linkage and integrity remain.
    pub fn validate_block(&self, candidate: &Block, previous: &Block) -> Result<()> {
        log::debug!("Validating block at index {}", candidate.index);

        self.validate_linkage(candidate, previous)?;
        self.validate_integrity(candidate)?;

        log::debug!("✅ Block {} validation successful", candidate.index);
        Ok(())
    }

    pub fn is_valid(&self, candidate: &Block, previous: &Block) -> bool {
        self.validate_block(candidate, previous).is_ok()
    }

    fn validate_linkage(&self, candidate: &Block, previous: &Block) -> Result<()> {
        let expected = expected_index(previous)?;

        log::debug!("Checking index {} follows {}", candidate.index, previous.index);
        if candidate.index != expected {
            return Err(LedgerError::IndexMismatch {
                expected,
                found: i128::from(candidate.index),
            });
        }

        log::debug!("Checking previous hash of block {}", candidate.index);
        if candidate.previous_hash != previous.hash {
            return Err(LedgerError::PreviousHashMismatch {
                expected: previous.hash.clone(),
                found: candidate.previous_hash.clone(),
            });
        }

        Ok(())
    }

    fn validate_integrity(&self, candidate: &Block) -> Result<()> {
        log::debug!("Checking hash integrity of block {}", candidate.index);
        let computed = candidate.recompute_hash();
        if computed != candidate.hash {
            return Err(LedgerError::HashMismatch {
                expected: computed,
                found: candidate.hash.clone(),
            });
        }

        Ok(())
    }
}

fn expected_index(previous: &Block) -> Result<u64> {
    previous.index.checked_add(1).ok_or_else(|| {
        LedgerError::InvalidInput(format!("index overflow after block {}", previous.index))
    })
}
