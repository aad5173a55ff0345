pub mod id;
pub mod item;
pub mod model;

pub use id::*;
pub use item::*;
pub use model::*;
