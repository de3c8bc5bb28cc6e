//! GraphQL API for Reel.
//!
//! Provides a GraphQL endpoint over the video catalogue, with Relay
//! global ids (`node`, `nodes`) and cursor connections (`videos`).
//!
//! # Building and Serving the Schema
//!
//! ```ignore
//! use reel_graphql::{bind, build_schema, serve_with_shutdown, ServerConfig};
//! use reel_store::MemoryVideoStore;
//!
//! let schema = build_schema(Arc::new(MemoryVideoStore::with_samples()))?;
//! let config = ServerConfig::default();
//! let listener = bind(&config).await?;
//! serve_with_shutdown(schema, listener, config.enable_playground, shutdown_signal).await?;
//! ```

mod schema;
mod server;
mod types;

pub use schema::{
    build_schema, node_registry, MutationRoot, Node, PageInfo, QueryRoot, Video, VideoConnection,
    VideoEdge, VideoInput, MAX_QUERY_COMPLEXITY, MAX_QUERY_DEPTH,
};
pub use server::{bind, router, serve_with_shutdown, ServerConfig};
pub use types::ReelSchema;
