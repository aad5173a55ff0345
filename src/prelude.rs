//! Prelude module for convenient imports
//!
//! Re-exports the types and functions most callers need.
//!
//! # Example
//!
//! ```rust,no_run
//! use blocktree::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let tree_json = std::fs::read_to_string("path/to/page.json")?;
//! let tree: Vec<TreeBlock> = serde_json::from_str(&tree_json)?;
//!
//! let flat = tree_to_flat(&tree);
//! let rebuilt = flat_to_tree(&flat)?;
//! assert_eq!(rebuilt, tree);
//! # Ok(())
//! # }
//! ```

// Data model
pub use crate::block::{
    ActionParam, ButtonData, ComponentId, FlatBlock, Item, ItemData, PictureData, RichText,
    TreeBlock,
};

// Conversion and merging
pub use crate::convert::{flat_to_tree, inject_reference_id, tree_to_flat};
pub use crate::merge::{apply_backend_data, apply_backend_json, merge_action_params};

// Sessions
pub use crate::changes::{ChangeEntry, ChangeSet};
pub use crate::config::Settings;
pub use crate::reference::{
    Clock, FileStore, MemoryStore, ReferenceId, ReferenceIdManager, ReferenceStore, SystemClock,
};

// Backend exchange
pub use crate::backend::{BlockBackend, StaticBackend};
pub use crate::loader::{LoadResult, PageLoader};

// Error types
pub use crate::error::{
    BackendError, ConfigError, FormatError, MergeError, ReferenceError, ShapeError, StoreError,
};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
