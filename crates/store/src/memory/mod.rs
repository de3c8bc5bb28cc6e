//! In-memory storage adapter.
//!
//! - [`MemoryVideoStore`] - Video repository backed by a `RwLock<Vec<_>>`
//! - [`VideoFetcher`] / [`VideoCollection`] - Node and connection adapters

mod node_sources;
mod video_repo;

pub use node_sources::{VideoCollection, VideoFetcher};
pub use video_repo::{sample_videos, MemoryVideoStore};
