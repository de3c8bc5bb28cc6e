//! Port traits for data repositories.
//!
//! These traits define the storage interface used by the domain layer.
//! Implementations live in the infrastructure layer (e.g., `reel-store`).

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::models::{NewVideo, Video};

/// Repository for the video catalogue.
#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// Get a video by its local id.
    async fn get_video(&self, id: &str) -> StoreResult<Option<Video>>;

    /// List every video in insertion order.
    async fn list_videos(&self) -> StoreResult<Vec<Video>>;

    /// Store a new video and return it with its assigned id.
    async fn create_video(&self, video: NewVideo) -> StoreResult<Video>;
}
