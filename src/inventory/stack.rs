//! Item stacks and their data form.

use bevy::log::warn;
use serde::Deserialize;

use crate::combat::{Bow, EffectTemplate, Gun, ItemKind, Potion, Sword, Usable};

/// A number of identical items occupying one slot or one world pickup.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemStack {
    pub item: Usable,
    pub amount: u32,
}

impl ItemStack {
    /// A stack of `amount`, capped at the item's stack size.
    pub fn new(item: Usable, amount: u32) -> Self {
        let stack_size = item.kind().stack_size();
        if amount > stack_size {
            warn!(
                "{} x{} exceeds the stack size, clamped to {}",
                item.kind().name(),
                amount,
                stack_size
            );
        }
        Self {
            item,
            amount: amount.min(stack_size),
        }
    }

    pub fn single(item: Usable) -> Self {
        Self::new(item, 1)
    }

    pub fn kind(&self) -> ItemKind {
        self.item.kind()
    }

    pub fn stack_size(&self) -> u32 {
        self.kind().stack_size()
    }

    pub fn room(&self) -> u32 {
        self.stack_size().saturating_sub(self.amount)
    }

    /// Nothing left worth keeping in a slot.
    pub fn is_empty(&self) -> bool {
        self.amount == 0 || self.item.is_spent()
    }

    /// Move as much of `other` into this stack as fits. Returns how many moved.
    pub fn absorb(&mut self, other: &mut ItemStack) -> u32 {
        if other.kind() != self.kind() {
            return 0;
        }
        let moved = other.amount.min(self.room());
        self.amount += moved;
        other.amount -= moved;
        moved
    }
}

/// Serialized description of an item, as found in chests, loot tables and maps.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub enum ItemSpec {
    Sword { damage: i32, knockback: (f32, f32) },
    Bow,
    Gun,
    Potion(EffectTemplate),
    Arrows,
}

impl ItemSpec {
    pub fn heal_potion() -> Self {
        ItemSpec::Potion(EffectTemplate::heal_potion())
    }

    pub fn build(&self) -> Usable {
        match self {
            ItemSpec::Sword { damage, knockback } => {
                Usable::Sword(Sword::new(*damage, (*knockback).into()))
            }
            ItemSpec::Bow => Usable::Bow(Bow::default()),
            ItemSpec::Gun => Usable::Gun(Gun::default()),
            ItemSpec::Potion(effect) => Usable::Potion(Potion::new(*effect)),
            ItemSpec::Arrows => Usable::Arrows,
        }
    }

    pub fn instantiate(&self, amount: u32) -> ItemStack {
        ItemStack::new(self.build(), amount)
    }

    /// `amount` items as full stacks plus one partial stack for the rest.
    pub fn stacks(&self, amount: u32) -> Vec<ItemStack> {
        let stack_size = self.build().kind().stack_size().max(1);
        let mut left = amount;
        let mut stacks = Vec::new();
        while left > 0 {
            let take = left.min(stack_size);
            stacks.push(self.instantiate(take));
            left -= take;
        }
        stacks
    }
}

/// An item spec with an amount, the unit chests and loot tables hold.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StackSpec {
    pub item: ItemSpec,
    #[serde(default = "one")]
    pub amount: u32,
}

fn one() -> u32 {
    1
}

impl StackSpec {
    pub fn new(item: ItemSpec, amount: u32) -> Self {
        Self { item, amount }
    }

    pub fn instantiate(&self) -> Vec<ItemStack> {
        self.item.stacks(self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absorb_stops_at_capacity() {
        let mut slot = ItemStack::new(Usable::Arrows, 12);
        let mut incoming = ItemStack::new(Usable::Arrows, 7);
        assert_eq!(slot.absorb(&mut incoming), 4);
        assert_eq!(slot.amount, 16);
        assert_eq!(incoming.amount, 3);
    }

    #[test]
    fn different_kinds_never_merge() {
        let mut slot = ItemStack::new(Usable::Arrows, 1);
        let mut incoming = ItemSpec::heal_potion().instantiate(1);
        assert_eq!(slot.absorb(&mut incoming), 0);
    }

    #[test]
    fn oversized_amounts_split_into_full_stacks() {
        let amounts: Vec<u32> = StackSpec::new(ItemSpec::Arrows, 40)
            .instantiate()
            .iter()
            .map(|stack| stack.amount)
            .collect();
        assert_eq!(amounts, vec![16, 16, 8]);

        let bows = ItemSpec::Bow.stacks(2);
        assert_eq!(bows.len(), 2);
        assert!(bows.iter().all(|stack| stack.amount == 1));
        assert!(ItemSpec::Gun.stacks(0).is_empty());
    }

    #[test]
    fn direct_stack_is_clamped_to_capacity() {
        assert_eq!(ItemStack::new(Usable::Arrows, 40).amount, 16);
    }

    #[test]
    fn spec_parses_from_ron() {
        let spec: StackSpec = ron::from_str("(item: Arrows, amount: 5)").expect("valid stack");
        assert_eq!(spec.instantiate()[0].amount, 5);
        let sword: ItemSpec =
            ron::from_str("Sword(damage: 3, knockback: (5.0, -10.0))").expect("valid sword");
        assert_eq!(sword.build().kind(), ItemKind::Sword);
        let potion: ItemSpec =
            ron::from_str("Potion((kind: Speed, power: 3.0, duration_ms: 4000))").expect("valid potion");
        assert_eq!(potion.build().kind(), ItemKind::Potion);
    }
}
