//! Conversion between the nested block configuration and its flat,
//! backend-facing form.

mod flatten;
mod inject;
mod unflatten;

pub use flatten::tree_to_flat;
pub use inject::{REFERENCE_ID_VARIABLE, inject_reference_id};
pub use unflatten::flat_to_tree;
