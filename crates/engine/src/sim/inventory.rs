use std::collections::BTreeSet;

use crate::content::{names_match, GameObject, ItemGrant, ObjectRole};

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryItem {
    pub name: String,
    pub description: String,
    pub can_take: bool,
    pub tags: Vec<String>,
}

impl InventoryItem {
    pub fn from_object(object: &GameObject) -> Self {
        let tags = match &object.role {
            ObjectRole::Item { tags } => tags.clone(),
            _ => Vec::new(),
        };
        Self {
            name: object.name.clone(),
            description: object.description.clone(),
            can_take: true,
            tags,
        }
    }

    pub fn from_grant(grant: &ItemGrant) -> Self {
        Self {
            name: grant.name.clone(),
            description: grant.description.clone(),
            can_take: true,
            tags: grant.tags.clone(),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|candidate| names_match(candidate, tag))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inventory {
    items: Vec<InventoryItem>,
}

impl Inventory {
    pub fn add(&mut self, item: InventoryItem) {
        self.items.push(item);
    }

    pub fn remove(&mut self, name: &str) -> Option<InventoryItem> {
        let index = self
            .items
            .iter()
            .position(|item| names_match(&item.name, name))?;
        Some(self.items.remove(index))
    }

    pub fn has(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn find(&self, name: &str) -> Option<&InventoryItem> {
        self.items.iter().find(|item| names_match(&item.name, name))
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameFlags {
    set: BTreeSet<String>,
}

impl GameFlags {
    pub fn get(&self, key: &str) -> bool {
        self.set.contains(key)
    }

    pub fn set(&mut self, key: impl Into<String>) -> bool {
        self.set.insert(key.into())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    value: u32,
}

impl Score {
    pub fn value(self) -> u32 {
        self.value
    }

    pub fn add(&mut self, points: u32) -> u32 {
        self.value = self.value.saturating_add(points);
        self.value
    }
}

pub fn visited_flag(room: &str) -> String {
    format!("visited_{room}")
}

pub fn unlocked_flag(room: &str, door: &str) -> String {
    format!("unlocked_{room}_{}", door.to_lowercase().replace(' ', "_"))
}
