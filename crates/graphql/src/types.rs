//! GraphQL type definitions.

use async_graphql::{EmptySubscription, Schema};

use crate::schema::{MutationRoot, QueryRoot};

/// The Reel GraphQL schema type.
pub type ReelSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;
