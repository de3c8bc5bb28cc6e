//! Storage layer for Reel.
//!
//! This crate provides in-memory implementations of the repository traits
//! defined in `reel-core`, plus the adapters that plug the video catalogue
//! into the node registry and connection builder.
//!
//! # Usage
//!
//! ```ignore
//! use reel_store::{MemoryVideoStore, VideoCollection, VideoFetcher};
//!
//! let store = Arc::new(MemoryVideoStore::with_samples());
//!
//! registry.register(
//!     Video::TYPE_NAME,
//!     Arc::new(VideoFetcher::new(store.clone())),
//!     |e: &Entity| matches!(e, Entity::Video(_)),
//! )?;
//!
//! let videos = VideoCollection::new(store.clone());
//! ```

pub mod memory;

pub use memory::{MemoryVideoStore, VideoCollection, VideoFetcher};
