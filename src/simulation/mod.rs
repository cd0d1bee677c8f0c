//! Configuration and replay of genome operation scripts.

pub mod configs;
pub mod replay;

pub use configs::{GenomeConfig, Operation, ReplayScript};
pub use replay::{apply, compare_backends, Census, Divergence, Outcome, Replay, Snapshot};
