use std::fmt;
use std::iter;

use log::{debug, trace};

use super::{check_insertion, Genome, TeId, TeTable};
use crate::base::Symbol;
use crate::errors::GenomeError;

/// Genome stored as a flat vector of symbols.
///
/// Random access is O(1). Every insertion moves the tail of the vector, so
/// inserting is O(n) in the genome length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayGenome {
    symbols: Vec<Symbol>,
    tes: TeTable,
}

impl ArrayGenome {
    /// Symbol at `position`, or `None` if out of range.
    #[inline]
    pub fn get(&self, position: usize) -> Option<Symbol> {
        self.symbols.get(position).copied()
    }

    /// Flip the symbols of an active TE and mark its record inactive.
    fn deactivate(&mut self, te: TeId) {
        let Some(record) = self.tes.get(te).copied() else {
            return;
        };
        if !self.tes.deactivate(te) {
            trace!("TE {te} already inactive");
            return;
        }
        for symbol in &mut self.symbols[record.start..record.end()] {
            debug_assert_eq!(*symbol, Symbol::Active(te));
            *symbol = symbol.deactivated();
        }
        debug!("disabled TE {te} at [{}, {})", record.start, record.end());
    }
}

impl Genome for ArrayGenome {
    fn new(length: usize) -> Self {
        Self {
            symbols: vec![Symbol::Empty; length],
            tes: TeTable::new(),
        }
    }

    fn insert_te(&mut self, position: usize, length: usize) -> Result<TeId, GenomeError> {
        check_insertion(position, length, self.symbols.len())?;

        let id = self.tes.next_id().ok_or(GenomeError::IdsExhausted)?;
        if let Some(Symbol::Active(occupant)) = self.get(position) {
            debug!("TE {id} at position {position} collides with active TE {occupant}");
            self.deactivate(occupant);
        }

        self.symbols.splice(
            position..position,
            iter::repeat(Symbol::Active(id)).take(length),
        );
        let shifted = self.tes.shift_after(position, length);
        let registered = self.tes.register(position, length);
        debug_assert_eq!(registered, Some(id));

        debug!(
            "inserted TE {id} at [{position}, {}), shifted {shifted} records, genome length {}",
            position + length,
            self.symbols.len()
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
        self.symbols.len()
    }

    fn symbols(&self) -> Vec<Symbol> {
        self.symbols.clone()
    }
}

impl fmt::Display for ArrayGenome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.symbols {
            write!(f, "{symbol}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::TeStatus;

    fn id(n: u32) -> TeId {
        TeId::new(n)
    }

    #[test]
    fn test_new_is_empty_symbols() {
        let genome = ArrayGenome::new(5);
        assert_eq!(genome.len(), 5);
        assert_eq!(genome.render(), "-----");
        assert!(genome.active_tes().is_empty());
    }

    #[test]
    fn test_insert_splices_before_position() {
        let mut genome = ArrayGenome::new(6);
        let te = genome.insert_te(2, 3).unwrap();
        assert_eq!(te, id(1));
        assert_eq!(genome.render(), "--AAA----");
        assert_eq!(genome.get(2), Some(Symbol::Active(te)));
        assert_eq!(genome.get(5), Some(Symbol::Empty));
    }

    #[test]
    fn test_disable_flips_only_own_range() {
        let mut genome = ArrayGenome::new(10);
        let first = genome.insert_te(1, 2).unwrap();
        let second = genome.insert_te(6, 2).unwrap();
        genome.disable_te(first).unwrap();
        assert_eq!(genome.render(), "-xx---AA------");
        assert_eq!(genome.te(first).unwrap().status, TeStatus::Inactive);
        assert_eq!(genome.te(second).unwrap().status, TeStatus::Active);
    }

    #[test]
    fn test_interior_collision_splits_evicted_te() {
        let mut genome = ArrayGenome::new(4);
        let old = genome.insert_te(1, 4).unwrap(); // -AAAA---
        let new = genome.insert_te(3, 2).unwrap();
        assert_eq!(genome.render(), "-xxAAxx---");
        assert_eq!(genome.get(1), Some(Symbol::Inactive(old)));
        assert_eq!(genome.get(5), Some(Symbol::Inactive(old)));
        assert_eq!(genome.get(3), Some(Symbol::Active(new)));
        assert_eq!(genome.te(old).unwrap().start, 1);
    }

    #[test]
    fn test_rejected_insert_leaves_state() {
        let mut genome = ArrayGenome::new(3);
        genome.insert_te(0, 1).unwrap();
        let before = genome.clone();
        assert!(genome.insert_te(4, 1).is_err());
        assert!(genome.insert_te(0, 0).is_err());
        assert_eq!(genome, before);
    }

    #[test]
    fn test_display_matches_render() {
        let mut genome = ArrayGenome::new(4);
        genome.insert_te(1, 2).unwrap();
        assert_eq!(genome.to_string(), genome.render());
    }
}
