//! Replay script configuration.
//!
//! A script names the genome to build and the operations to apply to it, and
//! round-trips through JSON so a run can be reproduced from a file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::genome::{Backend, TeId};

/// Initial genome parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenomeConfig {
    /// Number of empty positions at creation
    pub initial_length: usize,
    /// Storage strategy
    #[serde(default)]
    pub backend: Backend,
}

impl GenomeConfig {
    pub fn new(initial_length: usize, backend: Backend) -> Self {
        Self {
            initial_length,
            backend,
        }
    }
}

/// One call on the genome contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Insert { position: usize, length: usize },
    Copy { te: TeId, offset: i64 },
    Disable { te: TeId },
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Insert { position, length } => write!(f, "insert({position}, {length})"),
            Self::Copy { te, offset } => write!(f, "copy({te}, {offset})"),
            Self::Disable { te } => write!(f, "disable({te})"),
        }
    }
}

/// A genome plus the operations to replay on it, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayScript {
    pub genome: GenomeConfig,
    #[serde(default)]
    pub operations: Vec<Operation>,
}

impl ReplayScript {
    pub fn new(genome: GenomeConfig, operations: Vec<Operation>) -> Self {
        Self { genome, operations }
    }

    /// The scenario used to exercise both genome implementations by hand:
    /// two overlapping insertions, a forward and a backward copy, an
    /// insertion far into the grown genome, and a disable.
    pub fn demo(backend: Backend) -> Self {
        let te = TeId::new;
        Self::new(
            GenomeConfig::new(20, backend),
            vec![
                Operation::Insert { position: 5, length: 10 },
                Operation::Insert { position: 10, length: 10 },
                Operation::Copy { te: te(2), offset: 20 },
                Operation::Copy { te: te(2), offset: -15 },
                Operation::Insert { position: 50, length: 10 },
                Operation::Disable { te: te(3) },
            ],
        )
    }

    /// Same script on another backend.
    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.genome.backend = backend;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
