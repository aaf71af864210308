//! Core ledger components

pub mod blockchain;
pub mod block;

pub use blockchain::Chain;
pub use block::Block;
