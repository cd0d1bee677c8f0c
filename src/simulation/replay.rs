//! Replaying operation scripts against a genome.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::configs::{Operation, ReplayScript};
use crate::base::SymbolClass;
use crate::errors::{GenomeError, InvalidSymbol, ReplayError};
use crate::genome::{AnyGenome, Backend, Genome, TeId};

/// What an applied operation returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Inserted(TeId),
    /// `None` when the source TE was inactive.
    Copied(Option<TeId>),
    Disabled,
}

/// Genome state after one replay step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// 0 for the initial state, then 1-based operation index
    pub step: usize,
    pub operation: Option<Operation>,
    pub outcome: Option<Outcome>,
    pub length: usize,
    pub rendered: String,
    pub active: Vec<TeId>,
}

impl Snapshot {
    /// Count the positions of each class in the rendered genome.
    pub fn census(&self) -> Result<Census, InvalidSymbol> {
        let mut census = Census::default();
        for c in self.rendered.chars() {
            match SymbolClass::try_from(c)? {
                SymbolClass::Empty => census.empty += 1,
                SymbolClass::Active => census.active += 1,
                SymbolClass::Inactive => census.inactive += 1,
            }
        }
        Ok(census)
    }
}

/// Number of empty, active and inactive positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Census {
    pub empty: usize,
    pub active: usize,
    pub inactive: usize,
}

/// Applies a script's operations one at a time to a freshly built genome.
#[derive(Debug, Clone)]
pub struct Replay {
    genome: AnyGenome,
    operations: Vec<Operation>,
    applied: usize,
}

impl Replay {
    pub fn new(script: &ReplayScript) -> Self {
        Self {
            genome: AnyGenome::with_backend(script.genome.backend, script.genome.initial_length),
            operations: script.operations.clone(),
            applied: 0,
        }
    }

    pub fn genome(&self) -> &AnyGenome {
        &self.genome
    }

    /// Number of operations not yet applied.
    pub fn remaining(&self) -> usize {
        self.operations.len() - self.applied
    }

    /// State before any operation.
    pub fn initial(&self) -> Snapshot {
        self.snapshot(None, None)
    }

    /// Apply the next operation, or return `Ok(None)` when the script is done.
    pub fn step(&mut self) -> Result<Option<Snapshot>, ReplayError> {
        let Some(&operation) = self.operations.get(self.applied) else {
            return Ok(None);
        };
        self.applied += 1;
        let outcome = apply(&mut self.genome, operation).map_err(|source| ReplayError {
            step: self.applied,
            source,
        })?;
        debug!("step {}: {operation} -> {outcome:?}", self.applied);
        Ok(Some(self.snapshot(Some(operation), Some(outcome))))
    }

    /// Apply every remaining operation, returning the initial snapshot
    /// followed by one per operation.
    pub fn run(mut self) -> Result<Vec<Snapshot>, ReplayError> {
        let mut snapshots = Vec::with_capacity(self.remaining() + 1);
        snapshots.push(self.initial());
        while let Some(snapshot) = self.step()? {
            snapshots.push(snapshot);
        }
        info!(
            "replayed {} operations on {} genome, final length {}",
            self.applied,
            self.genome.backend(),
            self.genome.len()
        );
        if let Some(last) = snapshots.last() {
            match last.census() {
                Ok(census) => info!(
                    "final genome: {} empty, {} active, {} inactive positions",
                    census.empty, census.active, census.inactive
                ),
                Err(err) => warn!("could not summarise final genome: {err}"),
            }
        }
        Ok(snapshots)
    }

    fn snapshot(&self, operation: Option<Operation>, outcome: Option<Outcome>) -> Snapshot {
        Snapshot {
            step: self.applied,
            operation,
            outcome,
            length: self.genome.len(),
            rendered: self.genome.render(),
            active: self.genome.active_tes(),
        }
    }
}

/// Apply one operation through the genome contract.
pub fn apply<G: Genome + ?Sized>(genome: &mut G, operation: Operation) -> Result<Outcome, GenomeError> {
    match operation {
        Operation::Insert { position, length } => {
            genome.insert_te(position, length).map(Outcome::Inserted)
        }
        Operation::Copy { te, offset } => genome.copy_te(te, offset).map(Outcome::Copied),
        Operation::Disable { te } => genome.disable_te(te).map(|()| Outcome::Disabled),
    }
}

/// First step at which two backends disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Divergence {
    pub step: usize,
    pub array: Snapshot,
    pub linked: Snapshot,
}

/// Replay `script` on both backends and report the first differing step.
pub fn compare_backends(script: &ReplayScript) -> Result<Option<Divergence>, ReplayError> {
    let array = Replay::new(&script.clone().with_backend(Backend::Array)).run()?;
    let linked = Replay::new(&script.clone().with_backend(Backend::Linked)).run()?;
    Ok(array
        .into_iter()
        .zip(linked)
        .find(|(a, l)| a != l)
        .map(|(array, linked)| Divergence {
            step: array.step,
            array,
            linked,
        }))
}
