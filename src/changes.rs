//! Pending field edits collected before they are saved to the backend.

use crate::reference::{Clock, SystemClock};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// One edited field of one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeEntry {
    /// `{block_id}_{item_index}_{field}_{timestamp}`.
    pub id: String,
    pub block_id: String,
    pub item_index: usize,
    pub field: String,
    pub old_value: Value,
    pub new_value: Value,
    pub timestamp: i64,
}

impl ChangeEntry {
    fn same_target(&self, block_id: &str, item_index: usize, field: &str) -> bool {
        self.block_id == block_id && self.item_index == item_index && self.field == field
    }
}

/// Edits keyed by `(block_id, item_index, field)`, in the order first made.
///
/// Editing the same field again replaces the earlier entry in place, so the set
/// never holds two entries for one target.
#[derive(Debug, Default)]
pub struct ChangeSet<C = SystemClock> {
    changes: Vec<ChangeEntry>,
    clock: C,
}

impl ChangeSet<SystemClock> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Clock> ChangeSet<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            changes: Vec::new(),
            clock,
        }
    }

    /// Records an edit, replacing any earlier edit of the same target.
    pub fn add(
        &mut self,
        block_id: impl Into<String>,
        item_index: usize,
        field: impl Into<String>,
        old_value: impl Into<Value>,
        new_value: impl Into<Value>,
    ) -> &ChangeEntry {
        let block_id = block_id.into();
        let field = field.into();
        let timestamp = self.clock.now_secs();
        let entry = ChangeEntry {
            id: format!("{}_{}_{}_{}", block_id, item_index, field, timestamp),
            block_id,
            item_index,
            field,
            old_value: old_value.into(),
            new_value: new_value.into(),
            timestamp,
        };

        let existing = self
            .changes
            .iter()
            .position(|c| c.same_target(&entry.block_id, entry.item_index, &entry.field));
        let slot = match existing {
            Some(slot) => {
                debug!(block = %entry.block_id, field = %entry.field, "replacing pending change");
                self.changes[slot] = entry;
                slot
            }
            None => {
                self.changes.push(entry);
                self.changes.len() - 1
            }
        };
        &self.changes[slot]
    }

    /// Drops the entry with the given id. Unknown ids are ignored.
    pub fn remove(&mut self, change_id: &str) -> Option<ChangeEntry> {
        let slot = self.changes.iter().position(|c| c.id == change_id)?;
        Some(self.changes.remove(slot))
    }

    pub fn clear(&mut self) {
        self.changes.clear();
    }

    pub fn by_block<'a>(&'a self, block_id: &'a str) -> impl Iterator<Item = &'a ChangeEntry> {
        self.changes.iter().filter(move |c| c.block_id == block_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChangeEntry> {
        self.changes.iter()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// The latest value of each edited field name, ordered by first edit.
    ///
    /// This is the shape [`field_update_request`](crate::request::field_update_request)
    /// sends: the same field edited in two items is sent once, with the newer value.
    pub fn changed_fields(&self) -> Vec<(String, Value)> {
        let mut slots: AHashMap<&str, usize> = AHashMap::with_capacity(self.changes.len());
        let mut fields: Vec<(String, Value)> = Vec::with_capacity(self.changes.len());
        let mut newest: Vec<i64> = Vec::with_capacity(self.changes.len());

        for change in &self.changes {
            match slots.get(change.field.as_str()) {
                Some(&slot) if change.timestamp >= newest[slot] => {
                    fields[slot].1 = change.new_value.clone();
                    newest[slot] = change.timestamp;
                }
                Some(_) => {}
                None => {
                    slots.insert(change.field.as_str(), fields.len());
                    fields.push((change.field.clone(), change.new_value.clone()));
                    newest.push(change.timestamp);
                }
            }
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_same_target_is_replaced_in_place() {
        let mut changes = ChangeSet::with_clock(|| 7i64);
        changes.add("0.1", 0, "email", "", "a@b.c");
        changes.add("0.2", 0, "age", 1, 2);
        let entry = changes.add("0.1", 0, "email", "", "x@y.z").clone();

        assert_eq!(changes.len(), 2);
        assert_eq!(entry.id, "0.1_0_email_7");
        assert_eq!(changes.iter().next(), Some(&entry));
        assert_eq!(entry.new_value, json!("x@y.z"));
    }

    #[test]
    fn test_changed_fields_keeps_newest_value() {
        let clock = std::sync::Mutex::new(0i64);
        let mut changes = ChangeSet::with_clock(move || {
            let mut now = clock.lock().unwrap();
            *now += 1;
            *now
        });
        changes.add("0", 0, "name", "", "Ann");
        changes.add("1", 0, "name", "", "Bob");
        changes.add("1", 1, "city", "", "Oslo");

        assert_eq!(
            changes.changed_fields(),
            vec![
                ("name".to_string(), json!("Bob")),
                ("city".to_string(), json!("Oslo")),
            ]
        );
    }
}
