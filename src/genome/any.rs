use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ArrayGenome, Genome, LinkedGenome, TeId, TeTable};
use crate::base::Symbol;
use crate::errors::GenomeError;

/// Storage strategy for a genome.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Array,
    Linked,
}

impl Backend {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Array => "array",
            Self::Linked => "linked",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A genome whose storage strategy is chosen at runtime.
#[derive(Debug, Clone)]
pub enum AnyGenome {
    Array(ArrayGenome),
    Linked(LinkedGenome),
}

impl AnyGenome {
    /// Create an empty genome of `length` positions using `backend`.
    pub fn with_backend(backend: Backend, length: usize) -> Self {
        match backend {
            Backend::Array => Self::Array(ArrayGenome::new(length)),
            Backend::Linked => Self::Linked(LinkedGenome::new(length)),
        }
    }

    pub fn backend(&self) -> Backend {
        match self {
            Self::Array(_) => Backend::Array,
            Self::Linked(_) => Backend::Linked,
        }
    }

    fn inner(&self) -> &dyn Genome {
        match self {
            Self::Array(genome) => genome,
            Self::Linked(genome) => genome,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Genome {
        match self {
            Self::Array(genome) => genome,
            Self::Linked(genome) => genome,
        }
    }
}

impl Genome for AnyGenome {
    fn new(length: usize) -> Self {
        Self::with_backend(Backend::default(), length)
    }

    fn insert_te(&mut self, position: usize, length: usize) -> Result<TeId, GenomeError> {
        self.inner_mut().insert_te(position, length)
    }

    fn disable_te(&mut self, te: TeId) -> Result<(), GenomeError> {
        self.inner_mut().disable_te(te)
    }

    fn tes(&self) -> &TeTable {
        self.inner().tes()
    }

    fn len(&self) -> usize {
        self.inner().len()
    }

    fn symbols(&self) -> Vec<Symbol> {
        self.inner().symbols()
    }
}

impl From<ArrayGenome> for AnyGenome {
    fn from(genome: ArrayGenome) -> Self {
        Self::Array(genome)
    }
}

impl From<LinkedGenome> for AnyGenome {
    fn from(genome: LinkedGenome) -> Self {
        Self::Linked(genome)
    }
}

impl fmt::Display for AnyGenome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Array(genome) => fmt::Display::fmt(genome, f),
            Self::Linked(genome) => fmt::Display::fmt(genome, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_backend() {
        for backend in [Backend::Array, Backend::Linked] {
            let genome = AnyGenome::with_backend(backend, 4);
            assert_eq!(genome.backend(), backend);
            assert_eq!(genome.render(), "----");
        }
    }

    #[test]
    fn test_backend_serde_lowercase() {
        let json = serde_json::to_string(&Backend::Linked).unwrap();
        assert_eq!(json, "\"linked\"");
        let parsed: Backend = serde_json::from_str("\"array\"").unwrap();
        assert_eq!(parsed, Backend::Array);
    }

    #[test]
    fn test_delegated_copy_uses_backend() {
        let mut genome = AnyGenome::with_backend(Backend::Linked, 10);
        let te = genome.insert_te(2, 2).unwrap();
        let copy = genome.copy_te(te, -4).unwrap().unwrap();
        // (2 - 4) mod 12 = 10
        assert_eq!(genome.te(copy).unwrap().start, 10);
        assert_eq!(genome.to_string(), "--AA------AA--");
    }
}
