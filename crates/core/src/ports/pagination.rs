//! Pagination types for list queries.
//!
//! These types implement Relay-style cursor pagination. They are produced
//! by [`crate::services::ConnectionBuilder`] and are storage-agnostic.

/// Opaque cursor for pagination.
///
/// The cursor value encodes a zero-based offset (see
/// [`Cursor::from_offset`]) and should be treated as an opaque token by
/// clients. Cursors are only meaningful for the collection that produced
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cursor {
    pub value: String,
}

impl From<String> for Cursor {
    fn from(value: String) -> Self {
        Self { value }
    }
}

/// Pagination arguments for connection queries.
///
/// Supports forward pagination (`first`/`after`) and backward
/// pagination (`last`/`before`). Counts are signed so that negative
/// client input can be rejected instead of silently wrapping.
#[derive(Debug, Clone, Default)]
pub struct Pagination {
    /// Number of items to keep from the front of the window.
    pub first: Option<i64>,
    /// Only items strictly after this cursor.
    pub after: Option<Cursor>,
    /// Number of items to keep from the back of the window.
    pub last: Option<i64>,
    /// Only items strictly before this cursor.
    pub before: Option<Cursor>,
}

impl Pagination {
    /// Forward page: `first` items after an optional cursor.
    pub fn forward(first: i64, after: Option<Cursor>) -> Self {
        Self {
            first: Some(first),
            after,
            ..Default::default()
        }
    }

    /// Backward page: `last` items before an optional cursor.
    pub fn backward(last: i64, before: Option<Cursor>) -> Self {
        Self {
            last: Some(last),
            before,
            ..Default::default()
        }
    }
}

/// Paginated result set with edges and page info.
///
/// This is the Relay connection pattern for cursor-based pagination.
#[derive(Debug, Clone)]
pub struct Connection<T> {
    /// List of edges (node + cursor pairs).
    pub edges: Vec<Edge<T>>,
    /// Information about the current page.
    pub page_info: PageInfo,
    /// Number of edges in this page.
    pub total_count: usize,
}

impl<T> Connection<T> {
    /// Convert every node, keeping cursors and page info.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Connection<U> {
        Connection {
            edges: self
                .edges
                .into_iter()
                .map(|e| Edge {
                    node: f(e.node),
                    cursor: e.cursor,
                })
                .collect(),
            page_info: self.page_info,
            total_count: self.total_count,
        }
    }

    /// Borrow the nodes in edge order.
    pub fn nodes(&self) -> impl Iterator<Item = &T> {
        self.edges.iter().map(|e| &e.node)
    }
}

/// A single item in a paginated result.
#[derive(Debug, Clone)]
pub struct Edge<T> {
    /// The actual item.
    pub node: T,
    /// Cursor for this item (used for pagination).
    pub cursor: Cursor,
}

/// Information about the current page in a paginated result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInfo {
    /// Whether there are more items after this page.
    pub has_next_page: bool,
    /// Whether there are items before this page.
    pub has_previous_page: bool,
    /// Cursor of the first item in this page.
    pub start_cursor: Option<Cursor>,
    /// Cursor of the last item in this page.
    pub end_cursor: Option<Cursor>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_keeps_cursors_and_page_info() {
        let conn = Connection {
            edges: vec![
                Edge { node: 1, cursor: Cursor::from("c1".to_string()) },
                Edge { node: 2, cursor: Cursor::from("c2".to_string()) },
            ],
            page_info: PageInfo {
                has_next_page: true,
                ..PageInfo::default()
            },
            total_count: 2,
        };

        let mapped = conn.map(|n| n * 10);

        assert_eq!(mapped.nodes().copied().collect::<Vec<_>>(), vec![10, 20]);
        assert_eq!(mapped.edges[1].cursor.value, "c2");
        assert!(mapped.page_info.has_next_page);
        assert_eq!(mapped.total_count, 2);
    }
}
