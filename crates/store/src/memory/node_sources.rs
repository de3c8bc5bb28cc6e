//! Adapters exposing the video repository to the resolution layer.

use std::sync::Arc;

use async_trait::async_trait;

use reel_core::error::StoreResult;
use reel_core::models::{Entity, Video};
use reel_core::ports::{CollectionSource, NodeFetcher, VideoRepository};

/// Fetches videos as node entities.
pub struct VideoFetcher {
    videos: Arc<dyn VideoRepository>,
}

impl VideoFetcher {
    pub fn new(videos: Arc<dyn VideoRepository>) -> Self {
        Self { videos }
    }
}

#[async_trait]
impl NodeFetcher<Entity> for VideoFetcher {
    async fn fetch(&self, local_id: &str) -> StoreResult<Option<Entity>> {
        Ok(self.videos.get_video(local_id).await?.map(Entity::Video))
    }
}

/// The full video listing, in catalogue order.
pub struct VideoCollection {
    videos: Arc<dyn VideoRepository>,
}

impl VideoCollection {
    pub fn new(videos: Arc<dyn VideoRepository>) -> Self {
        Self { videos }
    }
}

#[async_trait]
impl CollectionSource<Video> for VideoCollection {
    async fn load(&self) -> StoreResult<Vec<Video>> {
        self.videos.list_videos().await
    }
}
