//! Reconciles a backend's flat, partial response against the original tree.

use crate::block::{ActionParam, ComponentId, FlatBlock, TreeBlock};
use crate::error::MergeError;
use ahash::{AHashMap, AHashSet};
use serde_json::Value;
use tracing::{debug, trace};

type RecordIndex<'a> = AHashMap<&'a str, &'a FlatBlock>;

/// Applies backend records to the original tree and returns the updated tree.
///
/// Blocks are addressed by the positional ids [`tree_to_flat`](crate::convert::tree_to_flat)
/// would assign them, and backend records are indexed by `component_id`. When ids
/// repeat, the last record wins. A block's `components_id` alias is consulted when
/// no record carries its positional id. For a matched block:
///
/// * `items` are replaced wholesale when the record carries them;
/// * `action_params` are merged per [`merge_action_params`].
///
/// Nothing else is touched. Unmatched blocks come back equal to the input,
/// including any `component_id` of their own and an empty `children` list, and
/// the output always has the shape of `original`. Records matching no block are
/// dropped.
pub fn apply_backend_data(original: &[TreeBlock], backend: &[FlatBlock]) -> Vec<TreeBlock> {
    let index: RecordIndex = backend
        .iter()
        .map(|record| (record.component_id.as_str(), record))
        .collect();
    let mut matched: AHashSet<&str> = AHashSet::with_capacity(index.len());

    let mut merged = original.to_vec();
    apply_level(&mut merged, None, &index, &mut matched);

    for unmatched in index.keys().filter(|id| !matched.contains(*id)) {
        debug!(component_id = %unmatched, "backend record matches no block, dropping it");
    }
    debug!(
        records = index.len(),
        applied = matched.len(),
        "applied backend data"
    );

    merged
}

fn apply_level<'a>(
    blocks: &mut [TreeBlock],
    parent: Option<&ComponentId>,
    index: &RecordIndex<'a>,
    matched: &mut AHashSet<&'a str>,
) {
    for (position, block) in blocks.iter_mut().enumerate() {
        let id = match parent {
            Some(parent) => parent.child(position),
            None => ComponentId::root(position),
        };
        let positional = id.to_string();
        let record = index.get(positional.as_str()).copied().or_else(|| {
            block
                .components_id
                .as_deref()
                .and_then(|alias| index.get(alias).copied())
        });

        match record {
            Some(record) => {
                matched.insert(record.component_id.as_str());
                trace!(id = %id, component = %block.component_name, "applying backend record");
                merge_record(block, record);
            }
            None => trace!(id = %id, "no backend record for block"),
        }

        if let Some(children) = block.children.as_mut() {
            apply_level(children, Some(&id), index, matched);
        }
    }
}

/// Applies a raw JSON backend response.
///
/// The response must be a JSON array, otherwise this fails fast with
/// [`MergeError::NotAnArray`]. A record without a `component_id` (or with a
/// `null` one) is addressed by its array index. A numeric id is read as its
/// decimal string.
pub fn apply_backend_json(
    original: &[TreeBlock],
    response: &Value,
) -> Result<Vec<TreeBlock>, MergeError> {
    let records = response
        .as_array()
        .ok_or_else(|| MergeError::NotAnArray(json_kind(response)))?;

    let backend = records
        .iter()
        .enumerate()
        .map(|(index, record)| parse_record(index, record))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(apply_backend_data(original, &backend))
}

/// Merges `incoming` params into `target`.
///
/// A param whose `variable` already exists overwrites that entry in place. New
/// variables are appended in the order received.
pub fn merge_action_params(target: &mut Vec<ActionParam>, incoming: &[ActionParam]) {
    for param in incoming {
        match target.iter_mut().find(|p| p.variable == param.variable) {
            Some(existing) => *existing = param.clone(),
            None => target.push(param.clone()),
        }
    }
}

fn merge_record(block: &mut TreeBlock, record: &FlatBlock) {
    if let Some(items) = &record.items {
        block.items = Some(items.clone());
    }
    if !record.action_params.is_empty() {
        merge_action_params(&mut block.action_params, &record.action_params);
    }
}

fn parse_record(index: usize, record: &Value) -> Result<FlatBlock, MergeError> {
    let mut record = record.clone();
    if let Some(fields) = record.as_object_mut() {
        match fields.get("component_id") {
            None | Some(Value::Null) => {
                fields.insert("component_id".into(), Value::String(index.to_string()));
            }
            Some(Value::Number(n)) => {
                let id = n.to_string();
                fields.insert("component_id".into(), Value::String(id));
            }
            _ => {}
        }
    }
    serde_json::from_value(record).map_err(|source| MergeError::InvalidRecord { index, source })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
