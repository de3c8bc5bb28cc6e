//! Opaque identifier codecs.
//!
//! - [`global_id`] - Type-qualified node ids
//! - [`cursor`] - Offset cursors for connections

pub mod cursor;
pub mod global_id;

pub use global_id::{DecodedId, GlobalId};
