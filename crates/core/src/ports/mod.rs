mod node_source;
mod pagination;
mod repository;

pub use node_source::*;
pub use pagination::*;
pub use repository::*;
