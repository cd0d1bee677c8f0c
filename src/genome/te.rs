use core::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a transposable element.
///
/// Ids are handed out by a genome starting at 1, strictly increasing and
/// never reused, so ascending id order is creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeId(u32);

impl TeId {
    #[inline(always)]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline(always)]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Id of the record stored at table slot `slot`, or `None` once the
    /// id space is used up.
    pub fn for_slot(slot: usize) -> Option<Self> {
        u32::try_from(slot).ok()?.checked_add(1).map(Self)
    }
}

impl From<u32> for TeId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for TeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a TE. `Inactive` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeStatus {
    Active,
    Inactive,
}

/// Bookkeeping for one TE, independent of how the genome stores its symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeRecord {
    pub id: TeId,
    /// Position of the first symbol at creation, moved right by insertions
    /// strictly before it.
    pub start: usize,
    /// Number of positions; fixed at creation.
    pub length: usize,
    pub status: TeStatus,
}

impl TeRecord {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == TeStatus::Active
    }

    /// One past the last position covered by the record.
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    /// Whether `position` lies in `[start, start + length)`.
    #[inline]
    pub fn covers(&self, position: usize) -> bool {
        (self.start..self.end()).contains(&position)
    }
}

/// Table of every TE a genome has ever created, indexed by id.
///
/// Ids are dense, so record `k` lives at slot `k - 1`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeTable {
    records: Vec<TeRecord>,
}

impl TeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id the next registered TE will receive, or `None` when no id is left.
    pub fn next_id(&self) -> Option<TeId> {
        TeId::for_slot(self.records.len())
    }

    /// Number of TEs ever created.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: TeId) -> Option<&TeRecord> {
        let slot = (id.0 as usize).checked_sub(1)?;
        self.records.get(slot)
    }

    fn get_mut(&mut self, id: TeId) -> Option<&mut TeRecord> {
        let slot = (id.0 as usize).checked_sub(1)?;
        self.records.get_mut(slot)
    }

    /// Record a new active TE and return its id.
    pub fn register(&mut self, start: usize, length: usize) -> Option<TeId> {
        let id = self.next_id()?;
        self.records.push(TeRecord {
            id,
            start,
            length,
            status: TeStatus::Active,
        });
        Some(id)
    }

    /// Mark `id` inactive. Returns `true` if it was active before the call.
    pub fn deactivate(&mut self, id: TeId) -> bool {
        match self.get_mut(id) {
            Some(record) if record.is_active() => {
                record.status = TeStatus::Inactive;
                true
            }
            _ => false,
        }
    }

    /// Move every record starting strictly after `position` right by `by`.
    /// Returns the number of records moved.
    pub fn shift_after(&mut self, position: usize, by: usize) -> usize {
        let mut moved = 0;
        for record in self.records.iter_mut().filter(|r| r.start > position) {
            record.start += by;
            moved += 1;
        }
        moved
    }

    /// Ids of active TEs in ascending order.
    pub fn active_ids(&self) -> Vec<TeId> {
        self.ids_with(TeStatus::Active)
    }

    /// Ids of inactive TEs in ascending order.
    pub fn inactive_ids(&self) -> Vec<TeId> {
        self.ids_with(TeStatus::Inactive)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TeRecord> {
        self.records.iter()
    }

    fn ids_with(&self, status: TeStatus) -> Vec<TeId> {
        self.records
            .iter()
            .filter(|r| r.status == status)
            .map(|r| r.id)
            .collect()
    }
}
