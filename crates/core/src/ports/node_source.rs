//! Port traits for the data behind nodes and connections.
//!
//! The domain layer implements these; the resolution layer only awaits
//! them and propagates their failures unchanged.

use async_trait::async_trait;

use crate::error::StoreResult;

/// Fetches entities of one node type by local id.
///
/// Registered in a [`crate::registry::TypeRegistry`] under the type's name.
#[async_trait]
pub trait NodeFetcher<E>: Send + Sync {
    /// Fetch the entity with this local id.
    ///
    /// Returns `Ok(None)` when no such entity exists; that is not an error.
    async fn fetch(&self, local_id: &str) -> StoreResult<Option<E>>;
}

/// Produces the full ordered collection behind one paginated listing.
///
/// The connection builder slices the result itself, so implementations
/// return every candidate in order.
#[async_trait]
pub trait CollectionSource<T>: Send + Sync {
    /// Load the complete ordered collection.
    async fn load(&self) -> StoreResult<Vec<T>>;
}
