use crate::config::GenesisConfig;
use crate::consensus::validation::BlockValidator;
use crate::core::Block;
use crate::{LedgerError, Result};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

/// Append-only sequence of blocks, ordered by index and never empty.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Chain {
    blocks: Vec<Block>,
    #[serde(skip)]
    validator: BlockValidator,
}

impl Chain {
    /// Creates a chain holding only the configured genesis block. Genesis is
    /// trusted as given and never validated.
    pub fn new(genesis: &GenesisConfig) -> Self {
        Self {
            blocks: vec![Block::genesis(genesis)],
            validator: BlockValidator::new(),
        }
    }

    /// Rebuilds a chain from an ordered list of blocks. The first block must
    /// have the genesis shape (index 0, empty previous hash) and is trusted;
    /// every later block goes through the append protocol.
    pub fn from_blocks(blocks: Vec<Block>) -> Result<Self> {
        let mut iter = blocks.into_iter();
        let genesis = iter.next().ok_or(LedgerError::EmptyChain)?;

        if genesis.index != 0 {
            return Err(LedgerError::IndexMismatch {
                expected: 0,
                found: i128::from(genesis.index),
            });
        }

        if !genesis.is_genesis() {
            return Err(LedgerError::InvalidGenesis(format!(
                "previous hash must be empty, got {}",
                genesis.previous_hash
            )));
        }

        let mut chain = Self {
            blocks: vec![genesis],
            validator: BlockValidator::new(),
        };

        for block in iter {
            chain.append(block)?;
        }

        Ok(chain)
    }

    /// Like [`Chain::from_blocks`], but the first block must also equal the
    /// genesis block built from `expected`.
    pub fn from_blocks_rooted(blocks: Vec<Block>, expected: &GenesisConfig) -> Result<Self> {
        let chain = Self::from_blocks(blocks)?;

        let root = Block::genesis(expected);
        if chain.genesis() != &root {
            return Err(LedgerError::InvalidGenesis(format!(
                "root {} does not match configured genesis {}",
                chain.genesis().hash,
                root.hash
            )));
        }

        Ok(chain)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn latest(&self) -> &Block {
        // The constructors always seed a genesis block and nothing removes it.
        &self.blocks[self.blocks.len() - 1]
    }

    pub fn genesis(&self) -> &Block {
        &self.blocks[0]
    }

    pub fn get(&self, index: u64) -> Option<&Block> {
        usize::try_from(index).ok().and_then(|i| self.blocks.get(i))
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// A chain always holds its genesis block.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Builds the next block for `data` stamped with the current time and
    /// runs it through the append protocol.
    pub fn create_and_append(&mut self, data: &str) -> Result<Block> {
        self.create_and_append_at(data, Utc::now().timestamp())
    }

    /// Same as [`Chain::create_and_append`] with a caller-chosen timestamp.
    /// Timestamps are not required to increase.
    pub fn create_and_append_at(&mut self, data: &str, timestamp: i64) -> Result<Block> {
        let candidate = self.next_block(data, timestamp)?;
        self.append(candidate)
    }

    /// Computes the linkage fields and hash for a block following the tip,
    /// without touching the chain.
    pub fn next_block(&self, data: &str, timestamp: i64) -> Result<Block> {
        let previous = self.latest();
        let index = previous.index.checked_add(1).ok_or_else(|| {
            LedgerError::InvalidInput(format!("index overflow after block {}", previous.index))
        })?;
        let hash = Block::compute_hash(index, &previous.hash, data, timestamp);

        Ok(Block::new(
            index,
            hash,
            previous.hash.clone(),
            data.to_string(),
            timestamp,
        ))
    }

    /// Validates `candidate` against the tip and commits it. On rejection the
    /// chain is left untouched and the failing check is returned.
    pub fn append(&mut self, candidate: Block) -> Result<Block> {
        if let Err(e) = self.validator.validate_block(&candidate, self.latest()) {
            log::warn!("Rejected block {}: {}", candidate.index, e);
            return Err(e);
        }

        self.commit(candidate)
    }

    /// Append protocol for a candidate in untyped form, starting with the
    /// structural check.
    pub fn append_value(&mut self, candidate: &Value) -> Result<Block> {
        let block = match self.validator.validate_value(candidate, self.latest()) {
            Ok(block) => block,
            Err(e) => {
                log::warn!("Rejected candidate: {}", e);
                return Err(e);
            }
        };

        self.commit(block)
    }

    /// Verdict of the validation protocol for `candidate` following `previous`.
    pub fn is_valid(&self, candidate: &Block, previous: &Block) -> bool {
        self.validator.is_valid(candidate, previous)
    }

    /// Validates `candidate` against the current tip without appending it.
    pub fn validate_candidate(&self, candidate: &Block) -> Result<()> {
        self.validator.validate_block(candidate, self.latest())
    }

    /// Re-checks every link from genesis to tip.
    pub fn verify(&self) -> Result<()> {
        for pair in self.blocks.windows(2) {
            self.validator.validate_block(&pair[1], &pair[0])?;
        }
        Ok(())
    }

    /// Pretty JSON dump of the full sequence, for inspection.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.blocks)?)
    }

    fn commit(&mut self, block: Block) -> Result<Block> {
        self.blocks.push(block.clone());
        log::info!("✅ Block {} added to chain ({})", block.index, block.hash);
        Ok(block)
    }
}
