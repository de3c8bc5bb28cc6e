//! Cursor connections over ordered collections.
//!
//! The builder slices a complete ordered collection according to Relay
//! pagination arguments. Cursors encode zero-based offsets into that
//! collection, so they stay valid as long as the collection order does.
//!
//! # Slicing
//!
//! The window starts as `[0, len)` and is narrowed in a fixed order:
//!
//! 1. `after` keeps offsets strictly greater than the cursor's offset
//! 2. `before` keeps offsets strictly smaller than the cursor's offset
//! 3. `first` keeps the first `first` offsets of the window
//! 4. `last` keeps the last `last` offsets of what `first` left
//!
//! `hasPreviousPage` is true when the final window starts after offset 0
//! and `hasNextPage` when it ends before `len`. The window keeps its
//! position when it becomes empty, so both flags stay meaningful for
//! `first: 0`, `last: 0` or crossed cursors.

use std::future::Future;

use tracing::{debug, trace};

use crate::error::{RelayError, RelayResult, StoreResult};
use crate::metrics::{record_connection_built, record_connection_error};
use crate::ports::{CollectionSource, Connection, Cursor, Edge, PageInfo, Pagination};

/// Half-open range of offsets `[start, end)` kept by a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: usize,
    pub end: usize,
}

impl Window {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Validated pagination arguments, ready to slice collections.
///
/// Arguments are checked when the builder is created, before any
/// collection is produced, so a bad request never reaches the store.
#[derive(Debug, Clone, Default)]
pub struct ConnectionBuilder {
    after: Option<usize>,
    before: Option<usize>,
    first: Option<usize>,
    last: Option<usize>,
}

impl ConnectionBuilder {
    /// Validate pagination arguments.
    ///
    /// Fails with `InvalidCursor` for an undecodable `after`/`before` and
    /// with `InvalidArgument` for a negative `first`/`last`.
    pub fn new(args: &Pagination) -> RelayResult<Self> {
        Self::validate(args).map_err(|e| {
            debug!(error = %e, "Rejected pagination arguments");
            record_connection_error(e.code());
            e
        })
    }

    fn validate(args: &Pagination) -> RelayResult<Self> {
        Ok(Self {
            after: args.after.as_ref().map(Cursor::offset).transpose()?,
            before: args.before.as_ref().map(Cursor::offset).transpose()?,
            first: args.first.map(|n| validate_count("first", n)).transpose()?,
            last: args.last.map(|n| validate_count("last", n)).transpose()?,
        })
    }

    /// Compute the window kept from a collection of `len` items.
    pub fn window(&self, len: usize) -> Window {
        let mut start = 0;
        let mut end = len;

        if let Some(after) = self.after {
            start = after.saturating_add(1).min(len);
        }
        if let Some(before) = self.before {
            end = before.min(len);
        }
        // Crossed cursors: empty window right after `after`.
        end = end.max(start);

        if let Some(first) = self.first {
            end = end.min(start.saturating_add(first));
        }
        if let Some(last) = self.last {
            start = start.max(end.saturating_sub(last));
        }

        Window { start, end }
    }

    /// Slice a materialized collection into a connection.
    pub fn build<T>(&self, items: Vec<T>) -> Connection<T> {
        let len = items.len();
        let window = self.window(len);
        trace!(len, start = window.start, end = window.end, "Slicing collection");

        let edges: Vec<Edge<T>> = items
            .into_iter()
            .enumerate()
            .skip(window.start)
            .take(window.len())
            .map(|(offset, node)| Edge {
                node,
                cursor: Cursor::from_offset(offset),
            })
            .collect();

        let page_info = PageInfo {
            has_next_page: window.end < len,
            has_previous_page: window.start > 0,
            start_cursor: edges.first().map(|e| e.cursor.clone()),
            end_cursor: edges.last().map(|e| e.cursor.clone()),
        };

        record_connection_built(edges.len());

        Connection {
            total_count: edges.len(),
            edges,
            page_info,
        }
    }

    /// Load a collection from a source, then slice it.
    ///
    /// Source failures are returned unchanged as `Store` errors.
    pub async fn build_from_source<T, S>(&self, source: &S) -> RelayResult<Connection<T>>
    where
        S: CollectionSource<T> + ?Sized,
    {
        self.build_from_future(source.load()).await
    }

    /// Await a collection producer, then slice its result.
    pub async fn build_from_future<T, F>(&self, producer: F) -> RelayResult<Connection<T>>
    where
        F: Future<Output = StoreResult<Vec<T>>>,
    {
        match producer.await {
            Ok(items) => Ok(self.build(items)),
            Err(e) => {
                let e = RelayError::from(e);
                debug!(error = %e, "Collection producer failed");
                record_connection_error(e.code());
                Err(e)
            }
        }
    }
}

/// Validate and convert a `first`/`last` count.
fn validate_count(name: &str, value: i64) -> RelayResult<usize> {
    if value < 0 {
        return Err(RelayError::InvalidArgument(format!(
            "{} must be non-negative, got {}",
            name, value
        )));
    }
    Ok(usize::try_from(value).unwrap_or(usize::MAX))
}

/// Validate arguments and slice a materialized collection in one step.
pub fn connection_from_vec<T>(items: Vec<T>, args: &Pagination) -> RelayResult<Connection<T>> {
    Ok(ConnectionBuilder::new(args)?.build(items))
}
