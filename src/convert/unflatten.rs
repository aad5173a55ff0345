use crate::block::{ComponentId, FlatBlock, TreeBlock};
use crate::error::ShapeError;
use ahash::{AHashMap, AHashSet};
use tracing::debug;

type Groups = AHashMap<Option<ComponentId>, Vec<(ComponentId, FlatBlock)>>;

/// Rebuilds a block forest from flat records.
///
/// Records are grouped under the id obtained by dropping the last segment of
/// their `component_id`. Siblings keep the order in which they appear in `flat`,
/// so ids produced by [`tree_to_flat`](super::tree_to_flat) restore the original
/// order. A block with no children comes back with `children: None`.
///
/// Input is validated before anything is built. Every id must be a canonical
/// dot-path of non-negative integers, ids must be unique, and each non-root
/// record's parent must itself be present.
pub fn flat_to_tree(flat: &[FlatBlock]) -> Result<Vec<TreeBlock>, ShapeError> {
    let mut seen = AHashSet::with_capacity(flat.len());
    let mut parsed = Vec::with_capacity(flat.len());

    for block in flat {
        let id: ComponentId = block.component_id.parse()?;
        if !seen.insert(id.clone()) {
            return Err(ShapeError::DuplicateId(block.component_id.clone()));
        }
        parsed.push((id, block.clone()));
    }

    for (id, _) in &parsed {
        if let Some(parent) = id.parent() {
            if !seen.contains(&parent) {
                return Err(ShapeError::Orphan {
                    component_id: id.to_string(),
                    parent_id: parent.to_string(),
                });
            }
        }
    }

    Ok(assemble(parsed))
}

/// Builds the forest from records whose ids are already known to be consistent.
fn assemble(records: Vec<(ComponentId, FlatBlock)>) -> Vec<TreeBlock> {
    let total = records.len();
    let mut groups: Groups = AHashMap::new();
    for (id, block) in records {
        groups.entry(id.parent()).or_default().push((id, block));
    }
    debug!(blocks = total, parents = groups.len(), "rebuilding block tree");

    build_level(None, &mut groups)
}

fn build_level(parent: Option<ComponentId>, groups: &mut Groups) -> Vec<TreeBlock> {
    let Some(siblings) = groups.remove(&parent) else {
        return Vec::new();
    };

    siblings
        .into_iter()
        .map(|(id, block)| {
            let children = build_level(Some(id), groups);
            block.into_tree((!children.is_empty()).then_some(children))
        })
        .collect()
}
