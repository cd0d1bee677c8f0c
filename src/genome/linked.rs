use std::fmt;
use std::iter;

use log::{debug, trace};

use super::{check_insertion, Genome, TeId, TeTable};
use crate::base::{NodeHandle, RingArena, Symbol};
use crate::errors::GenomeError;

/// Genome stored as a circular doubly-linked ring of symbols.
///
/// A new TE is built as a detached chain and spliced in with O(1) relinking,
/// but finding the node at a position walks the ring, O(n). Each TE keeps
/// the handles of the nodes it owns, so disabling it touches only those
/// nodes no matter where later insertions have moved them.
#[derive(Debug, Clone)]
pub struct LinkedGenome {
    ring: RingArena<Symbol>,
    tes: TeTable,
    /// Nodes owned by TE `k`, at slot `k - 1`.
    te_nodes: Vec<Vec<NodeHandle>>,
}

impl LinkedGenome {
    /// Symbol at `position`, or `None` if out of range. O(n).
    pub fn get(&self, position: usize) -> Option<Symbol> {
        self.ring.node_at(position).map(|node| *self.ring.get(node))
    }

    fn deactivate(&mut self, te: TeId) {
        if !self.tes.deactivate(te) {
            trace!("TE {te} already inactive");
            return;
        }
        let Some(nodes) = self.te_nodes.get(te.get() as usize - 1) else {
            return;
        };
        for &node in nodes {
            let symbol = self.ring.get_mut(node);
            *symbol = symbol.deactivated();
        }
        debug!("disabled TE {te} ({} nodes)", nodes.len());
    }
}

impl Genome for LinkedGenome {
    fn new(length: usize) -> Self {
        Self {
            ring: iter::repeat(Symbol::Empty).take(length).collect(),
            tes: TeTable::new(),
            te_nodes: Vec::new(),
        }
    }

    fn insert_te(&mut self, position: usize, length: usize) -> Result<TeId, GenomeError> {
        let genome_length = self.ring.len();
        check_insertion(position, length, genome_length)?;

        let id = self.tes.next_id().ok_or(GenomeError::IdsExhausted)?;
        let chain = self
            .ring
            .build_chain(iter::repeat(Symbol::Active(id)).take(length))
            .ok_or(GenomeError::IndexOutOfRange {
                position,
                te_length: length,
                genome_length,
            })?;
        let nodes: Vec<NodeHandle> = self.ring.walk(chain.first, chain.len).collect();

        // The chain goes between the node at `position` and its predecessor.
        // On an empty genome both are the header.
        let anchor = match self.ring.node_at(position) {
            Some(node) => {
                let occupant = *self.ring.get(node);
                if let Symbol::Active(occupant) = occupant {
                    debug!("TE {id} at position {position} collides with active TE {occupant}");
                    self.deactivate(occupant);
                }
                self.ring.prev(node)
            }
            None => self.ring.head(),
        };
        self.ring.splice_after(anchor, chain);

        let shifted = self.tes.shift_after(position, length);
        let registered = self.tes.register(position, length);
        debug_assert_eq!(registered, Some(id));
        self.te_nodes.push(nodes);

        debug!(
            "inserted TE {id} at [{position}, {}), shifted {shifted} records, genome length {}",
            position + length,
            self.ring.len()
        );
        Ok(id)
    }

    fn disable_te(&mut self, te: TeId) -> Result<(), GenomeError> {
        if self.tes.get(te).is_none() {
            return Err(GenomeError::UnknownTe(te));
        }
        self.deactivate(te);
        Ok(())
    }

    fn tes(&self) -> &TeTable {
        &self.tes
    }

    #[inline]
    fn len(&self) -> usize {
        self.ring.len()
    }

    fn symbols(&self) -> Vec<Symbol> {
        self.ring.iter().copied().collect()
    }
}

impl fmt::Display for LinkedGenome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in self.ring.iter() {
            write!(f, "{symbol}")?;
        }
        Ok(())
    }
}
