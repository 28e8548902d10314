//! Bounded, ordered item container shared by players and monsters.
//!
//! Insertion order is preserved for display. Adding to a full container fails
//! and hands the rejected item back inside the error, so an item is never
//! lost when a transfer between containers is refused.

use crate::error::{ErrorSeverity, GameError};
use crate::item::{Item, ItemKind};

/// Errors raised by inventory operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    /// Container is full; the rejected item is returned to the caller.
    #[error("inventory is full ({capacity} items)")]
    CapacityExceeded { capacity: usize, item: Box<Item> },

    /// No item at this slot.
    #[error("no item in slot {index} (inventory holds {len})")]
    InvalidSlot { index: usize, len: usize },

    /// The item exists but cannot be used right now.
    #[error("{name} cannot be used: {reason}")]
    NotUsable { name: String, reason: &'static str },
}

impl InventoryError {
    /// Recovers the item rejected by a full container.
    pub fn into_rejected_item(self) -> Option<Item> {
        match self {
            Self::CapacityExceeded { item, .. } => Some(*item),
            _ => None,
        }
    }
}

impl GameError for InventoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::CapacityExceeded { .. } | Self::NotUsable { .. } => ErrorSeverity::Recoverable,
            Self::InvalidSlot { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CapacityExceeded { .. } => "INVENTORY_CAPACITY_EXCEEDED",
            Self::InvalidSlot { .. } => "INVENTORY_INVALID_SLOT",
            Self::NotUsable { .. } => "INVENTORY_NOT_USABLE",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Inventory {
    items: Vec<Item>,
    max_size: usize,
}

impl Inventory {
    pub fn new(max_size: usize) -> Self {
        Self {
            items: Vec::new(),
            max_size,
        }
    }

    /// Builds a container from existing items, failing if they do not fit.
    pub fn from_items(items: Vec<Item>, max_size: usize) -> Result<Self, InventoryError> {
        let mut inventory = Self::new(max_size);
        for item in items {
            inventory.add(item)?;
        }
        Ok(inventory)
    }

    pub fn capacity(&self) -> usize {
        self.max_size
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.max_size
    }

    /// Free slots left.
    pub fn remaining(&self) -> usize {
        self.max_size.saturating_sub(self.items.len())
    }

    /// Appends `item`, or returns it inside [`InventoryError::CapacityExceeded`].
    pub fn add(&mut self, item: Item) -> Result<(), InventoryError> {
        if self.is_full() {
            return Err(InventoryError::CapacityExceeded {
                capacity: self.max_size,
                item: Box::new(item),
            });
        }
        self.items.push(item);
        Ok(())
    }

    /// Removes and returns the item at `index`.
    pub fn remove(&mut self, index: usize) -> Result<Item, InventoryError> {
        if index >= self.items.len() {
            return Err(InventoryError::InvalidSlot {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    /// Removes the first item equal to `item`. Returns whether one was removed.
    pub fn drop_item(&mut self, item: &Item) -> bool {
        match self.items.iter().position(|held| held == item) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Empties the container, yielding items in insertion order.
    pub fn take_all(&mut self) -> Vec<Item> {
        std::mem::take(&mut self.items)
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Result<&mut Item, InventoryError> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or(InventoryError::InvalidSlot { index, len })
    }

    /// Read-only view in insertion order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Owned copy of the contents.
    pub fn snapshot(&self) -> Vec<Item> {
        self.items.clone()
    }

    /// Items of one variant, in insertion order.
    pub fn find_by_kind(&self, kind: ItemKind) -> Vec<&Item> {
        self.items.iter().filter(|item| item.kind() == kind).collect()
    }

    /// Slot of the first item whose name contains `query` (case-insensitive).
    pub fn position_by_name(&self, query: &str) -> Option<usize> {
        self.items.iter().position(|item| item.name_matches(query))
    }

    /// Flips the equipped flag of the weapon or armor at `index`.
    ///
    /// Equipping unequips any other item of the same variant. Returns the new
    /// equipped state.
    pub fn toggle_equipped(&mut self, index: usize) -> Result<bool, InventoryError> {
        let kind = self.get_mut(index)?.kind();
        if !matches!(kind, ItemKind::Weapon | ItemKind::Armor) {
            let name = self.items[index].name().to_owned();
            return Err(InventoryError::NotUsable {
                name,
                reason: "only weapons and armor can be equipped",
            });
        }

        let equip = !self.items[index].is_equipped();
        for (slot, item) in self.items.iter_mut().enumerate() {
            let target = slot == index;
            match item {
                Item::Weapon(w) if kind == ItemKind::Weapon => {
                    w.equipped = target && equip;
                }
                Item::Armor(a) if kind == ItemKind::Armor => {
                    a.equipped = target && equip;
                }
                _ => {}
            }
        }
        Ok(equip)
    }

    /// Attack bonus from the equipped weapon.
    pub fn damage_bonus(&self) -> u32 {
        self.items.iter().map(Item::active_damage_bonus).sum()
    }

    /// Defense bonus from the equipped armor.
    pub fn defense_bonus(&self) -> u32 {
        self.items.iter().map(Item::active_defense_bonus).sum()
    }
}
