//! Fixed slot array, stacking rules and hotbar selection.

use std::ops::Range;

use bevy::prelude::*;

use super::stack::ItemStack;
use crate::combat::ItemKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    Storage,
    Hotbar,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub kind: SlotKind,
    pub stack: Option<ItemStack>,
}

/// What happened to a stack offered to [`Inventory::pick_up`].
#[derive(Debug, Clone, PartialEq)]
pub enum PickupOutcome {
    /// Everything went in
    Absorbed,
    /// A stack filled up; the remainder stays behind
    Partial(ItemStack),
    /// No slot could take anything
    Refused(ItemStack),
}

/// Ordered slots: storage first, then the hotbar.
///
/// Pickup priority does not follow slot order. Hotbar slots are tried
/// before storage so new items land in reach.
#[derive(Component, Debug, Clone)]
pub struct Inventory {
    slots: Vec<Slot>,
    storage: usize,
    /// Stack carried by the cursor while the inventory screen is open
    pub held: Option<ItemStack>,
    pub is_open: bool,
}

impl Inventory {
    pub fn new(storage: usize, hotbar: usize) -> Self {
        let slots = (0..storage)
            .map(|_| SlotKind::Storage)
            .chain((0..hotbar).map(|_| SlotKind::Hotbar))
            .map(|kind| Slot { kind, stack: None })
            .collect();
        Self {
            slots,
            storage,
            held: None,
            is_open: false,
        }
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.stack.is_none())
    }

    pub fn storage_range(&self) -> Range<usize> {
        0..self.storage
    }

    pub fn hotbar_range(&self) -> Range<usize> {
        self.storage..self.slots.len()
    }

    pub fn hotbar_len(&self) -> usize {
        self.slots.len() - self.storage
    }

    /// Slot index of hotbar position `position`.
    pub fn hotbar_slot(&self, position: usize) -> Option<usize> {
        (position < self.hotbar_len()).then_some(self.storage + position)
    }

    pub fn get(&self, index: usize) -> Option<&ItemStack> {
        self.slots.get(index).and_then(|slot| slot.stack.as_ref())
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut ItemStack> {
        self.slots.get_mut(index).and_then(|slot| slot.stack.as_mut())
    }

    /// Put `stack` into slot `index`, returning what was there.
    pub fn insert(&mut self, index: usize, stack: ItemStack) -> Option<ItemStack> {
        self.slots
            .get_mut(index)
            .and_then(|slot| slot.stack.replace(stack))
    }

    pub fn take(&mut self, index: usize) -> Option<ItemStack> {
        self.slots.get_mut(index).and_then(|slot| slot.stack.take())
    }

    /// Offer a stack: hotbar pass, then storage pass.
    ///
    /// Each pass merges into the first same-kind stack with room. If that
    /// stack fills up, the remainder is handed back and no further slot is
    /// tried. Otherwise the first empty slot of the pass takes the stack.
    pub fn pick_up(&mut self, mut stack: ItemStack) -> PickupOutcome {
        if stack.amount == 0 {
            return PickupOutcome::Absorbed;
        }
        for pass in [self.hotbar_range(), self.storage_range()] {
            let kind = stack.kind();
            let mergeable = pass.clone().find(|&i| {
                self.slots[i]
                    .stack
                    .as_ref()
                    .is_some_and(|s| s.kind() == kind && s.room() > 0)
            });
            if let Some(index) = mergeable {
                if let Some(target) = self.slots[index].stack.as_mut() {
                    target.absorb(&mut stack);
                }
                return if stack.amount == 0 {
                    PickupOutcome::Absorbed
                } else {
                    PickupOutcome::Partial(stack)
                };
            }
            if let Some(index) = pass.clone().find(|&i| self.slots[i].stack.is_none()) {
                self.slots[index].stack = Some(stack);
                return PickupOutcome::Absorbed;
            }
        }
        PickupOutcome::Refused(stack)
    }

    /// Swap the cursor stack with slot `index`. Matching kinds are swapped too, never merged.
    pub fn choose_item(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            std::mem::swap(&mut self.held, &mut slot.stack);
        }
    }

    /// Empty every slot whose stack ran out or was used up. Returns how many were cleared.
    pub fn reconcile(&mut self) -> usize {
        let mut cleared = 0;
        for slot in self.slots.iter_mut() {
            if slot.stack.as_ref().is_some_and(ItemStack::is_empty) {
                slot.stack = None;
                cleared += 1;
            }
        }
        cleared
    }

    pub fn find_kind(&self, kind: ItemKind) -> Option<usize> {
        self.slots.iter().position(|slot| {
            slot.stack
                .as_ref()
                .is_some_and(|stack| stack.kind() == kind && stack.amount > 0)
        })
    }

    pub fn count(&self, kind: ItemKind) -> u32 {
        self.slots
            .iter()
            .filter_map(|slot| slot.stack.as_ref())
            .filter(|stack| stack.kind() == kind)
            .map(|stack| stack.amount)
            .sum()
    }

    /// Use up one item of `kind` from the first stack holding it.
    pub fn consume_one(&mut self, kind: ItemKind) -> bool {
        let Some(index) = self.find_kind(kind) else {
            return false;
        };
        if let Some(stack) = self.slots[index].stack.as_mut() {
            stack.amount -= 1;
        }
        self.reconcile();
        true
    }
}

/// Which hotbar position is active.
#[derive(Component, Debug, Clone)]
pub struct Hotbar {
    active: usize,
    synced: usize,
    len: usize,
}

impl Hotbar {
    pub fn new(len: usize) -> Self {
        Self {
            active: 0,
            synced: 0,
            len: len.max(1),
        }
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn select(&mut self, position: usize) {
        if position < self.len {
            self.active = position;
        }
    }

    /// Move by `steps`, wrapping around either end.
    pub fn cycle(&mut self, steps: i32) {
        let len = self.len as i32;
        self.active = (self.active as i32 + steps).rem_euclid(len) as usize;
    }

    /// The previously active position if the selection changed since the last call.
    pub fn take_change(&mut self) -> Option<usize> {
        if self.synced == self.active {
            return None;
        }
        let previous = self.synced;
        self.synced = self.active;
        Some(previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::Usable;
    use crate::inventory::ItemSpec;

    fn arrows(amount: u32) -> ItemStack {
        ItemStack::new(Usable::Arrows, amount)
    }

    fn inventory() -> Inventory {
        Inventory::new(18, 9)
    }

    #[test]
    fn hotbar_is_filled_before_storage() {
        let mut inv = inventory();
        assert_eq!(inv.pick_up(arrows(3)), PickupOutcome::Absorbed);
        assert_eq!(inv.find_kind(ItemKind::Arrows), Some(18));
    }

    #[test]
    fn overflow_leaves_remainder_without_scanning_on() {
        let mut inv = inventory();
        inv.insert(18, arrows(12));
        inv.insert(19, arrows(1));

        let outcome = inv.pick_up(arrows(7));
        assert_eq!(outcome, PickupOutcome::Partial(arrows(3)));
        assert_eq!(inv.get(18).map(|s| s.amount), Some(16));
        assert_eq!(inv.get(19).map(|s| s.amount), Some(1));
    }

    #[test]
    fn full_stacks_fall_through_to_an_empty_slot() {
        let mut inv = inventory();
        inv.insert(18, arrows(16));
        assert_eq!(inv.pick_up(arrows(2)), PickupOutcome::Absorbed);
        assert_eq!(inv.get(19).map(|s| s.amount), Some(2));
    }

    #[test]
    fn storage_used_when_hotbar_is_full() {
        let mut inv = inventory();
        for index in inv.hotbar_range() {
            inv.insert(index, ItemSpec::Gun.instantiate(1));
        }
        assert_eq!(inv.pick_up(arrows(1)), PickupOutcome::Absorbed);
        assert_eq!(inv.find_kind(ItemKind::Arrows), Some(0));
    }

    #[test]
    fn full_inventory_refuses() {
        let mut inv = Inventory::new(0, 1);
        inv.insert(0, ItemSpec::Bow.instantiate(1));
        assert_eq!(inv.pick_up(arrows(1)), PickupOutcome::Refused(arrows(1)));
    }

    #[test]
    fn choose_item_swaps_even_matching_kinds() {
        let mut inv = inventory();
        inv.insert(18, arrows(4));
        inv.held = Some(arrows(5));
        inv.choose_item(18);
        assert_eq!(inv.held, Some(arrows(4)));
        assert_eq!(inv.get(18), Some(&arrows(5)));

        inv.choose_item(0);
        assert_eq!(inv.held, None);
        assert_eq!(inv.get(0), Some(&arrows(4)));
    }

    #[test]
    fn spent_and_empty_stacks_are_purged() {
        let mut inv = inventory();
        inv.insert(18, arrows(1));
        assert!(inv.consume_one(ItemKind::Arrows));
        assert_eq!(inv.get(18), None);
        assert!(!inv.consume_one(ItemKind::Arrows));
    }

    #[test]
    fn hotbar_cycles_and_reports_changes() {
        let mut hotbar = Hotbar::new(9);
        hotbar.cycle(-1);
        assert_eq!(hotbar.active(), 8);
        assert_eq!(hotbar.take_change(), Some(0));
        assert_eq!(hotbar.take_change(), None);
        hotbar.cycle(1);
        assert_eq!(hotbar.active(), 0);
        hotbar.select(12);
        assert_eq!(hotbar.active(), 0);
    }
}
