use crate::block::{ComponentId, FlatBlock, TreeBlock};
use tracing::{debug, trace};

/// Flattens a block forest into backend-facing records.
///
/// Traversal is depth-first pre-order, so every parent precedes its descendants.
/// Each record's `component_id` is the dot-joined path of sibling indices leading
/// to it (`"0"`, `"0.1"`, ...), which makes ids a function of shape alone.
pub fn tree_to_flat(roots: &[TreeBlock]) -> Vec<FlatBlock> {
    let flat: Vec<FlatBlock> = flatten_with_ids(roots)
        .into_iter()
        .map(|(_, block)| block)
        .collect();
    debug!(blocks = flat.len(), "flattened block tree");
    flat
}

/// Same traversal as [`tree_to_flat`], keeping the parsed id next to each record.
fn flatten_with_ids(roots: &[TreeBlock]) -> Vec<(ComponentId, FlatBlock)> {
    let mut out = Vec::new();
    traverse(roots, None, &mut out);
    out
}

fn traverse(
    blocks: &[TreeBlock],
    parent: Option<&ComponentId>,
    out: &mut Vec<(ComponentId, FlatBlock)>,
) {
    for (index, block) in blocks.iter().enumerate() {
        let id = match parent {
            Some(parent) => parent.child(index),
            None => ComponentId::root(index),
        };
        trace!(component = %block.component_name, id = %id, "flattening block");

        out.push((id.clone(), FlatBlock::from_tree(block, id.to_string())));

        if let Some(children) = &block.children {
            traverse(children, Some(&id), out);
        }
    }
}
