//! Hash Ledger - A minimal append-only hash-chained ledger
//!
//! This library implements:
//! - SHA-256 linked blocks with a fixed genesis root of trust
//! - An ordered validation protocol (structure, linkage, integrity)
//! - Typed rejection errors for every refused append
//! - A small CLI for building and auditing chain dumps

pub mod core;
pub mod crypto;
pub mod consensus;
pub mod cli;
pub mod error;
pub mod config;

pub use error::{LedgerError, RejectionKind, Result};
