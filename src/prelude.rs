//! Commonly used imports for convenience.
//!
//! # Example
//!
//! ```
//! use tegenome::prelude::*;
//!
//! let mut genome = LinkedGenome::new(20);
//! let te = genome.insert_te(5, 10).unwrap();
//! assert_eq!(genome.active_tes(), vec![te]);
//! assert_eq!(genome.len(), 30);
//! ```

pub use crate::base::{Symbol, SymbolClass};
pub use crate::errors::{self, GenomeError};
pub use crate::genome::{
    AnyGenome, ArrayGenome, Backend, Genome, LinkedGenome, TeId, TeRecord, TeStatus,
};
pub use crate::simulation::{GenomeConfig, Operation, Replay, ReplayScript, Snapshot};
