//! Core resolution layer for Reel.
//!
//! This crate contains the global-identity and cursor-connection machinery
//! that the GraphQL layer calls into, plus the domain models and port
//! traits the storage layer implements. It follows hexagonal architecture
//! principles - this is the innermost layer with no dependencies on
//! infrastructure.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       reel (binary)                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │        reel-graphql           │          reel-store         │
//! │   (schema + HTTP server)      │        (in-memory)          │
//! ├───────────────────────────────┴─────────────────────────────┤
//! │                       reel-core  ← YOU ARE HERE             │
//! │      (codecs, registry, resolver, connections, ports)       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`codec`] - Global id and cursor encodings
//! - [`registry`] - Node type registry (fetch by id, classify)
//! - [`services`] - Node resolver and connection builder
//! - [`models`] - Domain models (Video)
//! - [`ports`] - Interface traits for adapters to implement
//! - [`error`] - Error types
//! - [`metrics`] - Prometheus metrics definitions
//!
//! # Key Concepts
//!
//! ## Global Ids
//!
//! Every node is addressed by a [`codec::GlobalId`] that packs its type
//! name with its local id. [`services::NodeResolver`] decodes the id and
//! dispatches to the fetcher registered for that type in a
//! [`registry::TypeRegistry`].
//!
//! ## Connections
//!
//! [`services::ConnectionBuilder`] turns a complete ordered collection and
//! `first`/`after`/`last`/`before` arguments into a
//! [`ports::Connection`]. Cursors are opaque offsets into the collection.

pub mod codec;
pub mod error;
pub mod metrics;
pub mod models;
pub mod ports;
pub mod registry;
pub mod services;
