use crate::block::{ActionParam, TreeBlock};
use crate::reference::ReferenceId;
use serde_json::Value;
use tracing::trace;

/// The action param carrying the session reference id.
pub const REFERENCE_ID_VARIABLE: &str = "reference_id";

/// Stamps the session reference id into every block of the tree.
///
/// Existing `reference_id` params get the new value in place. A block with no
/// params at all receives a single `reference_id` param. Blocks that have other
/// params but no `reference_id` are left as they are.
pub fn inject_reference_id(blocks: &[TreeBlock], reference_id: &ReferenceId) -> Vec<TreeBlock> {
    let value = Value::String(reference_id.to_string());
    inject(blocks, &value)
}

fn inject(blocks: &[TreeBlock], value: &Value) -> Vec<TreeBlock> {
    blocks
        .iter()
        .map(|block| {
            let mut updated = block.clone();

            for param in updated
                .action_params
                .iter_mut()
                .filter(|p| p.variable == REFERENCE_ID_VARIABLE)
            {
                trace!(component = %block.component_name, old = %param.data, "replacing reference_id");
                param.data = value.clone();
            }

            if updated.action_params.is_empty() {
                updated
                    .action_params
                    .push(ActionParam::new(REFERENCE_ID_VARIABLE, value.clone()));
            }

            if let Some(children) = &block.children {
                updated.children = Some(inject(children, value));
            }
            updated
        })
        .collect()
}
