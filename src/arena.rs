//! Slot storage for tree nodes. Each slot carries a generation which is bumped when the slot is
//! released, so a [`NodeId`] handed out before the release no longer resolves. A slot whose
//! generation reaches `u32::MAX` is retired rather than reused.

use std::ops::{Index, IndexMut};

use crate::handle::NodeId;

#[derive(Clone, Debug)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

impl<T> Slot<T> {
    /// Bumps the generation of an emptied slot. Returns `false` once the generation is spent, in
    /// which case the slot must never be handed out again.
    fn recycle(&mut self) -> bool {
        debug_assert!(self.value.is_none());
        match self.generation.checked_add(1) {
            Some(next) if next < u32::MAX => {
                self.generation = next;
                true
            }
            _ => {
                self.generation = u32::MAX;
                false
            }
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    /// Indices of released slots, reused before growing `slots`.
    free: Vec<u32>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Arena<T> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn alloc(&mut self, value: T) -> NodeId {
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                debug_assert!(slot.value.is_none());
                slot.value = Some(value);
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index =
                    u32::try_from(self.slots.len()).expect("arena holds at most u32::MAX nodes");
                self.slots.push(Slot {
                    generation: 0,
                    value: Some(value),
                });
                NodeId {
                    index,
                    generation: 0,
                }
            }
        }
    }

    /// Releases the slot and returns what it held. Panics on a stale handle.
    pub(crate) fn release(&mut self, id: NodeId) -> T {
        let slot = &mut self.slots[id.index as usize];
        assert_eq!(slot.generation, id.generation, "release of stale handle {id}");
        let value = slot.value.take().expect("release of empty slot");
        if slot.recycle() {
            self.free.push(id.index);
        }
        value
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&T> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.value.as_ref())
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.value.as_mut())
    }

    /// Mutable access to two distinct live slots at once.
    pub(crate) fn pair_mut(&mut self, a: NodeId, b: NodeId) -> (&mut T, &mut T) {
        assert_ne!(a.index, b.index, "pair_mut needs two distinct slots");
        let (first, second) = if a.index < b.index { (a, b) } else { (b, a) };
        let (head, tail) = self.slots.split_at_mut(second.index as usize);
        let lo = live_mut(&mut head[first.index as usize], first);
        let hi = live_mut(&mut tail[0], second);
        if a.index < b.index {
            (lo, hi)
        } else {
            (hi, lo)
        }
    }

    /// Releases every live slot. Slots are kept so that old handles stay stale.
    pub(crate) fn clear(&mut self) {
        for (index, slot) in (0u32..).zip(self.slots.iter_mut()) {
            if slot.value.take().is_some() && slot.recycle() {
                self.free.push(index);
            }
        }
    }
}

fn live_mut<T>(slot: &mut Slot<T>, id: NodeId) -> &mut T {
    assert_eq!(slot.generation, id.generation, "stale handle {id}");
    slot.value.as_mut().expect("handle to empty slot")
}

impl<T> Index<NodeId> for Arena<T> {
    type Output = T;

    fn index(&self, id: NodeId) -> &T {
        self.get(id).unwrap_or_else(|| panic!("stale node handle {id}"))
    }
}

impl<T> IndexMut<NodeId> for Arena<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut T {
        self.get_mut(id).unwrap_or_else(|| panic!("stale node handle {id}"))
    }
}
