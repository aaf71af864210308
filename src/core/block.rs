use crate::config::GenesisConfig;
use crate::crypto::hash::Hash256;
use crate::{LedgerError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One ledger entry. Fields are fixed at construction; the chain only ever
/// hands out clones or shared references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub index: u64,
    pub hash: String,
    pub previous_hash: String,
    pub data: String,
    pub timestamp: i64,
}

impl Block {
    pub fn new(index: u64, hash: String, previous_hash: String, data: String, timestamp: i64) -> Self {
        Self {
            index,
            hash,
            previous_hash,
            data,
            timestamp,
        }
    }

    pub fn genesis(config: &GenesisConfig) -> Self {
        Self::new(
            0,
            config.hash.clone(),
            String::new(),
            config.data.clone(),
            config.timestamp,
        )
    }

    /// SHA-256 over `index ++ previous_hash ++ data ++ timestamp`, numbers in
    /// decimal, no separators. Returns 64 lowercase hex characters.
    pub fn compute_hash(index: u64, previous_hash: &str, data: &str, timestamp: i64) -> String {
        let preimage = format!("{}{}{}{}", index, previous_hash, data, timestamp);
        Hash256::hash(preimage.as_bytes()).to_hex()
    }

    /// Hash derived from this block's own declared fields.
    pub fn recompute_hash(&self) -> String {
        Self::compute_hash(self.index, &self.previous_hash, &self.data, self.timestamp)
    }

    pub fn is_genesis(&self) -> bool {
        self.index == 0 && self.previous_hash.is_empty()
    }

    /// Field-kind check for a candidate in untyped form. Values are not
    /// range-checked: a negative `index` is still an integer and is left to
    /// the linkage check.
    pub fn validate_structure(candidate: &Value) -> bool {
        Self::check_structure(candidate).is_ok()
    }

    pub fn check_structure(candidate: &Value) -> Result<()> {
        let fields = candidate
            .as_object()
            .ok_or_else(|| LedgerError::Structural("candidate is not an object".to_string()))?;

        let index = field(fields, "index")?;
        if !(index.is_u64() || index.is_i64()) {
            return Err(LedgerError::Structural("`index` must be an integer".to_string()));
        }

        for name in ["hash", "previousHash", "data"] {
            if !field(fields, name)?.is_string() {
                return Err(LedgerError::Structural(format!("`{}` must be a string", name)));
            }
        }

        if field(fields, "timestamp")?.as_i64().is_none() {
            return Err(LedgerError::Structural("`timestamp` must be an integer".to_string()));
        }

        Ok(())
    }

    /// Structural check followed by decoding into a typed block. With no
    /// chain position known, a negative index is reported as an
    /// `IndexMismatch` against 0.
    pub fn from_value(candidate: &Value) -> Result<Self> {
        Self::check_structure(candidate)?;
        Self::decode(candidate, 0)
    }

    /// Decodes a structurally valid candidate. A negative index becomes an
    /// `IndexMismatch` against `expected_index`.
    pub(crate) fn decode(candidate: &Value, expected_index: u64) -> Result<Self> {
        if let Some(index) = candidate["index"].as_i64().filter(|i| *i < 0) {
            return Err(LedgerError::IndexMismatch {
                expected: expected_index,
                found: i128::from(index),
            });
        }

        Block::deserialize(candidate).map_err(|e| LedgerError::Structural(e.to_string()))
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

fn field<'a>(fields: &'a Map<String, Value>, name: &str) -> Result<&'a Value> {
    fields
        .get(name)
        .ok_or_else(|| LedgerError::Structural(format!("missing field `{}`", name)))
}
