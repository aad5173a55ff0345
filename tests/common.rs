//! Common test utilities for building block trees and backend responses.
use blocktree::prelude::*;
use serde_json::json;

/// A single text block with one button child.
///
/// Flattens to ids `"0"` and `"0.0"`.
#[allow(dead_code)]
pub fn create_simple_tree() -> Vec<TreeBlock> {
    serde_json::from_value(json!([
        {
            "component_name": "text_block",
            "children": [{ "component_name": "action_button" }]
        }
    ]))
    .expect("simple tree fixture")
}

/// A two-root page exercising params, items, aliases and unknown fields.
///
/// Shape (ids in brackets):
/// - card_6_fields [0]
///   - text_block [0.0]
///   - picture_block [0.1]
///     - action_button [0.1.0]
/// - info_panel [1]
#[allow(dead_code)]
pub fn create_page_tree() -> Vec<TreeBlock> {
    serde_json::from_value(json!([
        {
            "component_name": "card_6_fields",
            "parent_block_id": "block-0",
            "action_mode": "processing",
            "action_params": [
                { "variable": "reference_id", "data": "000.3654823.1" },
                { "variable": "input_title", "data": "" }
            ],
            "title": "Profile",
            "children": [
                {
                    "component_name": "text_block",
                    "action_mode": "layout",
                    "items": [{ "data": "Hello", "status": "normal" }]
                },
                {
                    "component_name": "picture_block",
                    "components_id": "hero-picture",
                    "items": [{ "title": "Logo", "data": { "src": "/logo.png", "alt": "logo" } }],
                    "children": [
                        {
                            "component_name": "action_button",
                            "action_params": [{ "variable": "url", "data": "/next" }]
                        }
                    ]
                }
            ]
        },
        {
            "component_name": "info_panel",
            "parent_block_id": "block-1",
            "action_mode": "layout"
        }
    ]))
    .expect("page tree fixture")
}

/// Builds a tree of the given depth where every block has `breadth` children.
#[allow(dead_code)]
pub fn create_uniform_tree(depth: usize, breadth: usize) -> Vec<TreeBlock> {
    fn level(depth: usize, breadth: usize) -> Vec<TreeBlock> {
        (0..breadth)
            .map(|i| {
                let block = TreeBlock::new(format!("block_{}_{}", depth, i))
                    .with_param(ActionParam::new("depth", depth));
                if depth > 1 {
                    block.with_children(level(depth - 1, breadth))
                } else {
                    block
                }
            })
            .collect()
    }
    level(depth, breadth)
}

/// Collects `(component_id, component_name)` pairs of a flat list.
#[allow(dead_code)]
pub fn ids_of(flat: &[FlatBlock]) -> Vec<(String, String)> {
    flat.iter()
        .map(|b| (b.component_id.clone(), b.component_name.clone()))
        .collect()
}

/// Clock for tests: returns `start`, then `start + 1`, ...
#[allow(dead_code)]
pub fn ticking_clock(start: i64) -> impl Fn() -> i64 + Send + Sync {
    let next = std::sync::atomic::AtomicI64::new(start);
    move || next.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}
