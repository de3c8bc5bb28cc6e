//! GraphQL schema definition.
//!
//! This module provides the GraphQL schema for the video catalogue:
//! the Relay `node`/`nodes` fields, the `videos` connection and the
//! `createVideo` mutation.

use std::sync::Arc;

use async_graphql::{
    Context, EmptySubscription, ErrorExtensions, InputObject, Interface, Object, Result, Schema,
    SimpleObject, ID,
};
use tracing::warn;

use reel_core::codec::GlobalId;
use reel_core::error::{RegistryResult, RelayError};
use reel_core::models::{Entity, NewVideo, NodeType, Video as VideoModel};
use reel_core::ports::{Connection, Cursor, Pagination, VideoRepository};
use reel_core::registry::TypeRegistry;
use reel_core::services::{ConnectionBuilder, NodeResolver};
use reel_store::{VideoCollection, VideoFetcher};

use crate::types::ReelSchema;

// -----------------------------------------------------------------------------
// Schema Configuration
// -----------------------------------------------------------------------------

/// Maximum query depth to prevent deeply nested queries (DoS protection).
/// Note: GraphQL introspection requires depth ~13, so we use 15 to allow it.
pub const MAX_QUERY_DEPTH: usize = 15;

/// Maximum query complexity score (DoS protection).
/// Each field has a default complexity of 1, nested objects multiply.
pub const MAX_QUERY_COMPLEXITY: usize = 500;

// -----------------------------------------------------------------------------
// Schema Builder
// -----------------------------------------------------------------------------

/// Register every node type exposed through the `Node` interface.
///
/// Fails if a type name is registered twice; callers treat that as fatal.
pub fn node_registry(videos: Arc<dyn VideoRepository>) -> RegistryResult<TypeRegistry<Entity>> {
    let mut registry: TypeRegistry<Entity> = TypeRegistry::new();
    registry.register(
        VideoModel::TYPE_NAME,
        Arc::new(VideoFetcher::new(videos)),
        |entity: &Entity| matches!(entity, Entity::Video(_)),
    )?;
    Ok(registry)
}

/// Build the GraphQL schema over a video repository.
///
/// Includes query depth and complexity limits for DoS protection.
pub fn build_schema(videos: Arc<dyn VideoRepository>) -> RegistryResult<ReelSchema> {
    let registry = node_registry(videos.clone())?;
    let resolver = NodeResolver::new(Arc::new(registry));

    Ok(Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(resolver)
        .data(videos)
        .limit_depth(MAX_QUERY_DEPTH)
        .limit_complexity(MAX_QUERY_COMPLEXITY)
        .finish())
}

// -----------------------------------------------------------------------------
// Query
// -----------------------------------------------------------------------------

/// The root query type.
#[derive(Default)]
pub struct QueryRoot;

#[Object(name = "QueryType")]
impl QueryRoot {
    /// Fetch any object by its global id.
    async fn node<'ctx>(&self, ctx: &Context<'ctx>, id: ID) -> Result<Option<Node>> {
        let resolver = ctx.data::<NodeResolver<Entity>>()?;

        let entity = resolver
            .resolve(&GlobalId::new(id.0))
            .await
            .map_err(to_graphql_error)?;

        Ok(entity.and_then(|e| into_node(resolver.registry(), e)))
    }

    /// Fetch several objects by global id. Each id fails independently.
    async fn nodes<'ctx>(&self, ctx: &Context<'ctx>, ids: Vec<ID>) -> Result<Vec<Result<Option<Node>>>> {
        validate_batch_size(ids.len())?;
        let resolver = ctx.data::<NodeResolver<Entity>>()?;

        let ids: Vec<GlobalId> = ids.into_iter().map(|id| GlobalId::new(id.0)).collect();
        let nodes = resolver
            .resolve_many(&ids)
            .await
            .into_iter()
            .map(|result| {
                result
                    .map(|entity| entity.and_then(|e| into_node(resolver.registry(), e)))
                    .map_err(to_graphql_error)
            })
            .collect();

        Ok(nodes)
    }

    /// List videos with cursor pagination.
    async fn videos<'ctx>(
        &self,
        ctx: &Context<'ctx>,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
    ) -> Result<VideoConnection> {
        let videos = ctx.data::<Arc<dyn VideoRepository>>()?;

        let pagination = Pagination {
            first: first.map(i64::from),
            after: after.map(Cursor::from),
            last: last.map(i64::from),
            before: before.map(Cursor::from),
        };

        let connection = ConnectionBuilder::new(&pagination)
            .map_err(to_graphql_error)?
            .build_from_source(&VideoCollection::new(videos.clone()))
            .await
            .map_err(to_graphql_error)?;

        Ok(VideoConnection::from(connection))
    }

    /// Get a video by global id or by its local id.
    async fn video<'ctx>(&self, ctx: &Context<'ctx>, id: ID) -> Result<Option<Video>> {
        let videos = ctx.data::<Arc<dyn VideoRepository>>()?;

        let local_id = video_local_id(&id);
        let video = videos.get_video(&local_id).await.map_err(|e| to_graphql_error(e.into()))?;
        Ok(video.map(Video::from))
    }
}

// -----------------------------------------------------------------------------
// Mutation
// -----------------------------------------------------------------------------

/// The root mutation type.
#[derive(Default)]
pub struct MutationRoot;

#[Object(name = "MutationType")]
impl MutationRoot {
    /// Add a video to the catalogue.
    async fn create_video<'ctx>(&self, ctx: &Context<'ctx>, video: VideoInput) -> Result<Video> {
        validate_title(&video.title)?;
        validate_duration(video.duration)?;

        let videos = ctx.data::<Arc<dyn VideoRepository>>()?;
        let created = videos
            .create_video(NewVideo::from(video))
            .await
            .map_err(|e| to_graphql_error(e.into()))?;

        Ok(Video::from(created))
    }
}

// -----------------------------------------------------------------------------
// GraphQL Types
// -----------------------------------------------------------------------------

/// An object with a global id.
#[derive(Interface)]
#[graphql(field(name = "id", ty = "ID", desc = "The global id of the object"))]
pub enum Node {
    Video(Video),
}

/// A Video on the catalogue.
pub struct Video(VideoModel);

impl From<VideoModel> for Video {
    fn from(video: VideoModel) -> Self {
        Self(video)
    }
}

#[Object]
impl Video {
    /// The global id of the video.
    async fn id(&self) -> ID {
        ID(self.0.global_id().into_inner())
    }

    /// The title of the video.
    async fn title(&self) -> &str {
        &self.0.title
    }

    /// The duration of the video (in seconds).
    async fn duration(&self) -> i32 {
        self.0.duration
    }

    /// Whether or not the viewer has watched this video.
    async fn watched(&self) -> bool {
        self.0.watched
    }

    /// Whether or not the video is released.
    async fn released(&self) -> bool {
        self.0.released
    }
}

/// The input type of video.
#[derive(InputObject)]
#[graphql(name = "VideoInputType")]
pub struct VideoInput {
    /// The title of the video.
    pub title: String,
    /// The duration of the video (in seconds).
    pub duration: i32,
    /// Whether or not the video is released.
    pub released: bool,
}

impl From<VideoInput> for NewVideo {
    fn from(input: VideoInput) -> Self {
        Self {
            title: input.title,
            duration: input.duration,
            released: input.released,
        }
    }
}

// -----------------------------------------------------------------------------
// Connection Types (Relay-style pagination)
// -----------------------------------------------------------------------------

#[derive(SimpleObject)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

#[derive(SimpleObject)]
pub struct VideoEdge {
    pub node: Video,
    pub cursor: String,
}

#[derive(SimpleObject)]
pub struct VideoConnection {
    pub edges: Vec<VideoEdge>,
    pub page_info: PageInfo,
    /// A count of total number of objects in this connection.
    pub total_count: i32,
}

impl From<Connection<VideoModel>> for VideoConnection {
    fn from(conn: Connection<VideoModel>) -> Self {
        let conn = conn.map(Video::from);
        Self {
            edges: conn
                .edges
                .into_iter()
                .map(|e| VideoEdge {
                    node: e.node,
                    cursor: e.cursor.value,
                })
                .collect(),
            page_info: PageInfo {
                has_next_page: conn.page_info.has_next_page,
                has_previous_page: conn.page_info.has_previous_page,
                start_cursor: conn.page_info.start_cursor.map(|c| c.value),
                end_cursor: conn.page_info.end_cursor.map(|c| c.value),
            },
            total_count: i32::try_from(conn.total_count).unwrap_or(i32::MAX),
        }
    }
}

// -----------------------------------------------------------------------------
// Helpers & Validation
// -----------------------------------------------------------------------------

/// Maximum number of ids accepted by `nodes`.
const MAX_BATCH_SIZE: usize = 100;
/// Maximum length for video titles.
const MAX_TITLE_LENGTH: usize = 256;

/// Convert a resolution error into a GraphQL error carrying its code.
fn to_graphql_error(err: RelayError) -> async_graphql::Error {
    let code = err.code();
    async_graphql::Error::new(err.to_string()).extend_with(|_, ext| ext.set("code", code))
}

/// Shape a resolved entity into the `Node` interface.
///
/// Returns `None` when the registry cannot classify the entity, so the
/// field is nulled instead of failing the whole query.
fn into_node(registry: &TypeRegistry<Entity>, entity: Entity) -> Option<Node> {
    let Some(type_name) = registry.classify(&entity) else {
        warn!(?entity, "Resolved entity matches no registered node type");
        return None;
    };

    match entity {
        Entity::Video(video) if type_name == VideoModel::TYPE_NAME => {
            Some(Node::Video(Video::from(video)))
        }
        entity => {
            warn!(node_type = type_name, ?entity, "Node type has no GraphQL object");
            None
        }
    }
}

/// Accept either a video global id or a raw local id.
fn video_local_id(id: &ID) -> String {
    match GlobalId::new(id.as_str()).decode() {
        Ok(decoded) if decoded.type_name == VideoModel::TYPE_NAME => decoded.local_id,
        _ => id.to_string(),
    }
}

/// Validate the number of ids in a `nodes` request.
fn validate_batch_size(len: usize) -> Result<()> {
    if len > MAX_BATCH_SIZE {
        return Err(to_graphql_error(RelayError::InvalidArgument(format!(
            "too many ids: maximum {} allowed, got {}",
            MAX_BATCH_SIZE, len
        ))));
    }
    Ok(())
}

/// Validate a video title.
fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(async_graphql::Error::new("title cannot be empty"));
    }
    if title.len() > MAX_TITLE_LENGTH {
        return Err(async_graphql::Error::new(format!(
            "title too long: maximum {} characters allowed",
            MAX_TITLE_LENGTH
        )));
    }
    Ok(())
}

/// Validate a video duration.
fn validate_duration(duration: i32) -> Result<()> {
    if duration < 0 {
        return Err(async_graphql::Error::new("duration cannot be negative"));
    }
    Ok(())
}
