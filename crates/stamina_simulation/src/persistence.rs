//! Stamina attributes in the host's watched entity-state store.
//!
//! The ledger is the live owner; the store is where it is loaded from on
//! attach and flushed back to whenever it is dirty. Layout under the
//! `stamina` path:
//!
//! | field            | type  | default |
//! |------------------|-------|---------|
//! | `currentstamina` | float | 100     |
//! | `maxstamina`     | float | 100     |
//! | `exhausted`      | bool  | false   |

use std::collections::{BTreeSet, HashMap};

use bevy::prelude::*;

use crate::fatigue::{StaminaLedger, DEFAULT_MAX_STAMINA};

pub const STAMINA_ATTRIBUTE_PATH: &str = "stamina";
pub const CURRENT_STAMINA_FIELD: &str = "currentstamina";
pub const MAX_STAMINA_FIELD: &str = "maxstamina";
pub const EXHAUSTED_FIELD: &str = "exhausted";

/// Persistent per-entity attribute tree.
pub trait AttributeStore {
    fn get_float(&self, entity: Entity, path: &str, field: &str) -> Option<f32>;
    fn set_float(&mut self, entity: Entity, path: &str, field: &str, value: f32);
    fn get_bool(&self, entity: Entity, path: &str, field: &str) -> Option<bool>;
    fn set_bool(&mut self, entity: Entity, path: &str, field: &str, value: bool);

    /// Flags `path` for the network sync layer.
    fn mark_path_dirty(&mut self, entity: Entity, path: &str);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttributeValue {
    Float(f32),
    Bool(bool),
}

/// In-memory attribute store (headless host, tests).
#[derive(Resource, Debug, Default)]
pub struct WatchedAttributes {
    values: HashMap<(Entity, String, String), AttributeValue>,
    dirty_paths: BTreeSet<(Entity, String)>,
}

impl WatchedAttributes {
    pub fn get(&self, entity: Entity, path: &str, field: &str) -> Option<AttributeValue> {
        self.values
            .get(&(entity, path.to_string(), field.to_string()))
            .copied()
    }

    pub fn is_path_dirty(&self, entity: Entity, path: &str) -> bool {
        self.dirty_paths.contains(&(entity, path.to_string()))
    }

    /// Dirty paths in entity order; clears the set.
    pub fn take_dirty_paths(&mut self) -> Vec<(Entity, String)> {
        std::mem::take(&mut self.dirty_paths).into_iter().collect()
    }

    fn set(&mut self, entity: Entity, path: &str, field: &str, value: AttributeValue) {
        self.values
            .insert((entity, path.to_string(), field.to_string()), value);
    }
}

impl AttributeStore for WatchedAttributes {
    fn get_float(&self, entity: Entity, path: &str, field: &str) -> Option<f32> {
        match self.get(entity, path, field) {
            Some(AttributeValue::Float(value)) => Some(value),
            _ => None,
        }
    }

    fn set_float(&mut self, entity: Entity, path: &str, field: &str, value: f32) {
        self.set(entity, path, field, AttributeValue::Float(value));
    }

    fn get_bool(&self, entity: Entity, path: &str, field: &str) -> Option<bool> {
        match self.get(entity, path, field) {
            Some(AttributeValue::Bool(value)) => Some(value),
            _ => None,
        }
    }

    fn set_bool(&mut self, entity: Entity, path: &str, field: &str, value: bool) {
        self.set(entity, path, field, AttributeValue::Bool(value));
    }

    fn mark_path_dirty(&mut self, entity: Entity, path: &str) {
        self.dirty_paths.insert((entity, path.to_string()));
    }
}

/// Rebuilds a ledger from the store.
///
/// Missing fields fall back to 100/100/false. A stored max of zero (or
/// anything non-positive) is repaired to `configured_max`.
pub fn load_ledger(
    store: &dyn AttributeStore,
    entity: Entity,
    configured_max: f32,
) -> StaminaLedger {
    let path = STAMINA_ATTRIBUTE_PATH;

    let mut max_stamina = store
        .get_float(entity, path, MAX_STAMINA_FIELD)
        .unwrap_or(DEFAULT_MAX_STAMINA);
    if !(max_stamina.is_finite() && max_stamina > 0.0) {
        max_stamina = configured_max;
    }

    let stamina = store
        .get_float(entity, path, CURRENT_STAMINA_FIELD)
        .unwrap_or(DEFAULT_MAX_STAMINA);
    let exhausted = store
        .get_bool(entity, path, EXHAUSTED_FIELD)
        .unwrap_or(false);

    StaminaLedger::restore(stamina, max_stamina, exhausted)
}

/// Writes all three fields and marks the path dirty.
pub fn store_ledger(store: &mut dyn AttributeStore, entity: Entity, ledger: &StaminaLedger) {
    let path = STAMINA_ATTRIBUTE_PATH;
    store.set_float(entity, path, CURRENT_STAMINA_FIELD, ledger.stamina());
    store.set_float(entity, path, MAX_STAMINA_FIELD, ledger.max_stamina());
    store.set_bool(entity, path, EXHAUSTED_FIELD, ledger.exhausted());
    store.mark_path_dirty(entity, path);
}

/// System: flush dirty ledgers into the attribute store.
pub fn sync_stamina_attributes(
    mut store: ResMut<WatchedAttributes>,
    mut ledgers: Query<(Entity, &mut StaminaLedger)>,
) {
    for (entity, mut ledger) in ledgers.iter_mut() {
        if !ledger.is_dirty() {
            continue;
        }
        ledger.take_dirty();
        store_ledger(&mut *store, entity, &ledger);
    }
}
