//! Participant interning for rotation and fast hash lookups.
//!
//! Converts participant IDs to dense integer slots so seat rotation and
//! pair bookkeeping work on `Copy` values.

use rustc_hash::FxHashMap;
use std::hash::Hash;

/// Interned participant slot (u32 for compact storage and fast hashing).
pub type SlotId = u32;

/// Interner that maps participant IDs to slots in first-seen order.
#[derive(Debug, Clone)]
pub struct ParticipantInterner<T> {
    to_slot: FxHashMap<T, SlotId>,
    from_slot: Vec<T>,
}

impl<T: Clone + Eq + Hash> ParticipantInterner<T> {
    /// Create a new interner with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            to_slot: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            from_slot: Vec::with_capacity(capacity),
        }
    }

    /// Intern an ID, returning its slot.
    /// If already interned, returns the existing slot.
    pub fn intern(&mut self, id: &T) -> SlotId {
        if let Some(&slot) = self.to_slot.get(id) {
            return slot;
        }
        self.push(id)
    }

    /// Intern an ID that must not have been seen before.
    ///
    /// Returns `None` (and leaves the interner unchanged) for a duplicate.
    pub fn intern_new(&mut self, id: &T) -> Option<SlotId> {
        if self.to_slot.contains_key(id) {
            return None;
        }
        Some(self.push(id))
    }

    fn push(&mut self, id: &T) -> SlotId {
        let slot = self.from_slot.len() as SlotId;
        self.from_slot.push(id.clone());
        self.to_slot.insert(id.clone(), slot);
        slot
    }

    /// Get the ID for a slot.
    #[inline]
    pub fn resolve(&self, slot: SlotId) -> Option<&T> {
        self.from_slot.get(slot as usize)
    }

    /// All interned IDs in slot order.
    pub fn ids(&self) -> &[T] {
        &self.from_slot
    }

    /// Number of slots handed out so far.
    pub fn slot_count(&self) -> usize {
        self.from_slot.len()
    }
}

impl<T: Clone + Eq + Hash> Default for ParticipantInterner<T> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}
