mod load;
mod model;

pub use load::load_store;
pub use model::{GraphStore, NodePrototype};
