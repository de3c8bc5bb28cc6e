//! Domain models for the video catalogue.
//!
//! These models are storage-agnostic and represent the canonical
//! form of catalogue data within the domain layer.

use serde::{Deserialize, Serialize};

use crate::codec::GlobalId;

// =============================================================================
// Node Identity
// =============================================================================

/// A domain model that can be addressed through a global id.
pub trait NodeType {
    /// Type name used in global ids and type registration.
    const TYPE_NAME: &'static str;

    /// Id of this entity within its own type.
    fn local_id(&self) -> &str;

    /// Global id exposed to clients.
    fn global_id(&self) -> GlobalId {
        GlobalId::encode(Self::TYPE_NAME, self.local_id())
    }
}

// =============================================================================
// Video
// =============================================================================

/// A video in the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    /// Local id, unique among videos.
    pub id: String,
    pub title: String,
    /// Duration in seconds.
    pub duration: i32,
    /// Whether the viewer has watched this video.
    pub watched: bool,
    pub released: bool,
}

impl NodeType for Video {
    const TYPE_NAME: &'static str = "Video";

    fn local_id(&self) -> &str {
        &self.id
    }
}

/// Input for creating a video. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVideo {
    pub title: String,
    pub duration: i32,
    pub released: bool,
}

impl NewVideo {
    /// Build the stored video under the given id.
    pub fn into_video(self, id: String) -> Video {
        Video {
            id,
            title: self.title,
            duration: self.duration,
            watched: false,
            released: self.released,
        }
    }
}

// =============================================================================
// Entity
// =============================================================================

/// Any entity reachable through the node interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity {
    Video(Video),
}

impl From<Video> for Entity {
    fn from(video: Video) -> Self {
        Entity::Video(video)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test critique: l'id global d'une vidéo se décode vers son type et son id local
    #[test]
    fn test_video_global_id_points_back_to_video() {
        let video = NewVideo {
            title: "Create a GraphQL Schema".into(),
            duration: 120,
            released: true,
        }
        .into_video("a".into());

        let decoded = video.global_id().decode().unwrap();
        assert_eq!(decoded.type_name, "Video");
        assert_eq!(decoded.local_id, "a");
        assert!(!video.watched);
    }
}
