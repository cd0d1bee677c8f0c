//! Circular genomes that accumulate transposable elements (TEs).
//!
//! [`Genome`] is the contract shared by the two storage strategies:
//!
//! - [`ArrayGenome`] keeps one `Symbol` per position in a `Vec`. Indexing is
//!   O(1); every insertion shifts the tail, O(n).
//! - [`LinkedGenome`] keeps symbols in a circular doubly-linked ring. Splicing
//!   a new TE is O(1) once the insertion point is found, but finding a
//!   position by index walks the ring, O(n).
//!
//! TE bookkeeping (`TeTable`) lives beside the symbol store in both cases, so
//! position arithmetic such as `copy_te`'s circular offset is written once,
//! here, in terms of integer positions.

mod any;
mod array;
mod linked;
mod te;

use std::fmt;

use log::{debug, trace};

use crate::base::Symbol;
use crate::errors::GenomeError;

pub use any::{AnyGenome, Backend};
pub use array::ArrayGenome;
pub use linked::LinkedGenome;
pub use te::{TeId, TeRecord, TeStatus, TeTable};

/// A circular genome with transposable elements.
pub trait Genome: fmt::Display {
    /// Create a genome of `length` empty positions.
    fn new(length: usize) -> Self
    where
        Self: Sized;

    /// Insert a new active TE of `length` positions immediately before
    /// `position`, returning its id.
    ///
    /// If `position` currently belongs to an active TE, that TE is disabled
    /// first: a new TE never shares its range with an active one. Every
    /// record starting strictly after `position` moves right by `length`.
    ///
    /// Fails with [`GenomeError::IndexOutOfRange`] if `position` is not in
    /// `[0, len)` (only 0 is accepted on an empty genome) or `length` is 0.
    fn insert_te(&mut self, position: usize, length: usize) -> Result<TeId, GenomeError>;

    /// Disable an active TE. Disabling an inactive TE does nothing.
    ///
    /// Fails with [`GenomeError::UnknownTe`] if `te` was never created.
    fn disable_te(&mut self, te: TeId) -> Result<(), GenomeError>;

    /// Every TE this genome has created, active or not.
    fn tes(&self) -> &TeTable;

    /// Number of positions.
    fn len(&self) -> usize;

    /// The symbol at every position, starting from position 0.
    fn symbols(&self) -> Vec<Symbol>;

    /// Copy an active TE to `offset` positions from its current start.
    ///
    /// The target is `(start + offset) mod len()` taken in the mathematical
    /// sense, so negative offsets wrap to the high end. The copy is then an
    /// ordinary [`insert_te`](Genome::insert_te), collisions included.
    /// Returns `Ok(None)` without touching the genome if `te` is inactive.
    fn copy_te(&mut self, te: TeId, offset: i64) -> Result<Option<TeId>, GenomeError> {
        let record = *self.te(te).ok_or(GenomeError::UnknownTe(te))?;
        if !record.is_active() {
            trace!("copy of inactive TE {te} skipped");
            return Ok(None);
        }
        let position = wrap_position(record.start, offset, self.len());
        debug!(
            "copying TE {te} (start {}, length {}) by {offset} to position {position}",
            record.start, record.length
        );
        self.insert_te(position, record.length).map(Some)
    }

    /// Record for `id`, kept after the TE becomes inactive.
    fn te(&self, id: TeId) -> Option<&TeRecord> {
        self.tes().get(id)
    }

    /// Ids of active TEs in ascending order.
    fn active_tes(&self) -> Vec<TeId> {
        self.tes().active_ids()
    }

    /// Ids of inactive TEs in ascending order.
    fn inactive_tes(&self) -> Vec<TeId> {
        self.tes().inactive_ids()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// One character per position: `-` empty, `A` active, `x` inactive.
    fn render(&self) -> String {
        self.symbols().into_iter().map(Symbol::to_char).collect()
    }
}

/// `(start + offset) mod len` with a non-negative result.
///
/// Returns 0 for an empty genome.
pub fn wrap_position(start: usize, offset: i64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let shift = offset.rem_euclid(len as i64) as usize;
    (start % len + shift) % len
}

/// Reject insertions outside the genome or of zero length.
pub(crate) fn check_insertion(
    position: usize,
    te_length: usize,
    genome_length: usize,
) -> Result<(), GenomeError> {
    let in_range = position < genome_length || (genome_length == 0 && position == 0);
    if te_length == 0 || !in_range {
        return Err(GenomeError::IndexOutOfRange {
            position,
            te_length,
            genome_length,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_position_forward() {
        assert_eq!(wrap_position(5, 3, 20), 8);
        assert_eq!(wrap_position(15, 10, 20), 5);
        assert_eq!(wrap_position(0, 40, 20), 0);
    }

    #[test]
    fn test_wrap_position_backward() {
        assert_eq!(wrap_position(5, -3, 20), 2);
        assert_eq!(wrap_position(5, -6, 20), 19);
        assert_eq!(wrap_position(0, -41, 20), 19);
    }

    #[test]
    fn test_wrap_position_extreme_offsets() {
        assert_eq!(wrap_position(3, i64::MAX, 7), (3 + (i64::MAX % 7) as usize) % 7);
        assert!(wrap_position(3, i64::MIN, 7) < 7);
    }

    #[test]
    fn test_wrap_position_empty() {
        assert_eq!(wrap_position(0, -5, 0), 0);
    }

    #[test]
    fn test_check_insertion() {
        assert!(check_insertion(0, 1, 0).is_ok());
        assert!(check_insertion(19, 1, 20).is_ok());
        assert!(check_insertion(20, 1, 20).is_err());
        assert!(check_insertion(1, 1, 0).is_err());
        assert_eq!(
            check_insertion(3, 0, 20),
            Err(GenomeError::IndexOutOfRange {
                position: 3,
                te_length: 0,
                genome_length: 20,
            })
        );
    }
}
