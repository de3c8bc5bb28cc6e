//! Video repository implementation kept in memory.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use reel_core::error::StoreResult;
use reel_core::models::{NewVideo, Video};
use reel_core::ports::VideoRepository;

// =============================================================================
// Repository Implementation
// =============================================================================

/// In-memory implementation of VideoRepository.
///
/// Videos are kept in insertion order, which is the order listings and
/// connections page through. Created videos get sequential ids.
pub struct MemoryVideoStore {
    inner: RwLock<Inner>,
}

struct Inner {
    videos: Vec<Video>,
    next_id: u64,
}

impl MemoryVideoStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::with_videos(Vec::new())
    }

    /// Create a store holding the given videos, in order.
    pub fn with_videos(videos: Vec<Video>) -> Self {
        Self {
            inner: RwLock::new(Inner {
                videos,
                next_id: 1,
            }),
        }
    }

    /// Create a store seeded with the sample catalogue.
    pub fn with_samples() -> Self {
        Self::with_videos(sample_videos())
    }
}

impl Default for MemoryVideoStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VideoRepository for MemoryVideoStore {
    async fn get_video(&self, id: &str) -> StoreResult<Option<Video>> {
        let inner = self.inner.read().await;
        Ok(inner.videos.iter().find(|v| v.id == id).cloned())
    }

    async fn list_videos(&self) -> StoreResult<Vec<Video>> {
        Ok(self.inner.read().await.videos.clone())
    }

    async fn create_video(&self, video: NewVideo) -> StoreResult<Video> {
        let mut inner = self.inner.write().await;

        // Skip ids already taken by seeded videos.
        let id = loop {
            let candidate = inner.next_id.to_string();
            inner.next_id += 1;
            if !inner.videos.iter().any(|v| v.id == candidate) {
                break candidate;
            }
        };

        let video = video.into_video(id);
        debug!(id = %video.id, title = %video.title, "Video created");
        inner.videos.push(video.clone());
        Ok(video)
    }
}

/// Sample catalogue used when the server starts seeded.
pub fn sample_videos() -> Vec<Video> {
    vec![
        Video {
            id: "a".to_string(),
            title: "Create a GraphQL Schema".to_string(),
            duration: 120,
            watched: true,
            released: true,
        },
        Video {
            id: "b".to_string(),
            title: "Ember.js CLI".to_string(),
            duration: 240,
            watched: false,
            released: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_video(title: &str) -> NewVideo {
        NewVideo {
            title: title.into(),
            duration: 90,
            released: false,
        }
    }

    #[tokio::test]
    async fn test_get_video() {
        let store = MemoryVideoStore::with_samples();

        let video = store.get_video("b").await.unwrap().unwrap();
        assert_eq!(video.title, "Ember.js CLI");
        assert!(store.get_video("zzz").await.unwrap().is_none());
    }

    // Test critique: les vidéos créées sont ajoutées en fin de liste avec un id unique
    #[tokio::test]
    async fn test_create_appends_with_unique_ids() {
        let store = MemoryVideoStore::with_videos(vec![Video {
            id: "1".into(),
            title: "Seeded".into(),
            duration: 10,
            watched: false,
            released: true,
        }]);

        let first = store.create_video(new_video("Rust Ownership")).await.unwrap();
        let second = store.create_video(new_video("Async Rust")).await.unwrap();

        assert_eq!(first.id, "2");
        assert_eq!(second.id, "3");
        assert!(!first.watched);

        let titles: Vec<String> = store
            .list_videos()
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.title)
            .collect();
        assert_eq!(titles, vec!["Seeded", "Rust Ownership", "Async Rust"]);
    }
}
