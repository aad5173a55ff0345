//! # blocktree - Block Configuration Conversion and Merging
//!
//! **blocktree** converts JSON-declared UI block configurations between their nested,
//! caller-authored form and the flat, addressable form a backend understands. It then
//! merges the backend's partial answer back into the original tree.
//!
//! ## Core Workflow
//!
//! 1.  **Describe the page**: Deserialize a forest of [`TreeBlock`](block::TreeBlock)s from JSON.
//! 2.  **Flatten**: [`tree_to_flat`](convert::tree_to_flat) assigns each block a positional
//!     `component_id` (`"0"`, `"0.1"`, ...) and drops the nesting.
//! 3.  **Exchange**: Post the flat list through any [`BlockBackend`](backend::BlockBackend).
//! 4.  **Merge**: [`apply_backend_data`](merge::apply_backend_data) folds the backend's items and
//!     params into the original tree without disturbing blocks it did not mention.
//!
//! A session [`ReferenceIdManager`](reference::ReferenceIdManager) keeps the
//! `project.user.timestamp` id that correlates requests of one dialog.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use blocktree::prelude::*;
//! use serde_json::json;
//!
//! fn main() -> Result<()> {
//!     let tree: Vec<TreeBlock> = serde_json::from_value(json!([
//!         { "component_name": "text_block", "children": [{ "component_name": "action_button" }] }
//!     ]))?;
//!
//!     let flat = tree_to_flat(&tree);
//!     assert_eq!(flat[1].component_id, "0.0");
//!
//!     // Normally this comes back from the backend.
//!     let response = json!([{ "component_id": "0.0", "items": [{ "title": "X", "data": "Y" }] }]);
//!     let updated = apply_backend_json(&tree, &response)?;
//!     println!("{}", serde_json::to_string_pretty(&updated)?);
//!
//!     let manager = ReferenceIdManager::new(&Settings::default(), MemoryStore::new());
//!     let session = manager.get_or_create()?;
//!     println!("-> Session: {}", session);
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod block;
pub mod changes;
pub mod chat;
pub mod config;
pub mod convert;
pub mod error;
pub mod loader;
pub mod merge;
pub mod prelude;
pub mod reference;
pub mod request;
