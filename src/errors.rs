use std::io;
use thiserror::Error;

use crate::genome::TeId;

/// Errors raised by the `Genome` operations.
///
/// The first two are contract violations by the caller. An operation that
/// returns any of these has not modified the genome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenomeError {
    /// The insertion position lies outside `[0, genome_length)` (or is not 0
    /// for an empty genome), or the requested TE length is zero.
    #[error(
        "Cannot insert TE of length {te_length} at position {position} (genome length = {genome_length})"
    )]
    IndexOutOfRange {
        position: usize,
        te_length: usize,
        genome_length: usize,
    },

    /// No TE with this id has ever been created.
    #[error("Unknown transposable element: {0}")]
    UnknownTe(TeId),

    /// Every `u32` id has been handed out.
    #[error("No transposable element ids left")]
    IdsExhausted,
}

/// A character that is not one of the rendered genome symbols `-`, `A`, `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid genome symbol: '{0}'")]
pub struct InvalidSymbol(pub char);

/// Errors that can occur while loading a replay script.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Malformed JSON
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A replay aborted because one of its operations was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Step {step}: {source}")]
pub struct ReplayError {
    /// 1-based index of the failing operation
    pub step: usize,
    #[source]
    pub source: GenomeError,
}
