//! Resolution services used by the query executor.

mod connection;
mod resolver;

pub use connection::{connection_from_vec, ConnectionBuilder, Window};
pub use resolver::NodeResolver;
