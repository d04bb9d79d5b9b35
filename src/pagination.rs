//! Relay-style cursor connections
//!
//! [`ConnectionBuilder`] cuts an ordered candidate list down to one page:
//! cursors first narrow the window, then `first`/`last` slice it. Page flags
//! are relative to the cursor window, `totalCount` to the whole candidate list.

use std::cmp::Ordering;

use async_graphql::{Object, SimpleObject};
use thiserror::Error;

use crate::arguments::{Slice, ValidatedArgs};
use crate::cursor::CursorCodec;
use crate::store::Node;

/// Page information
///
/// Cursors are empty strings when the page has no edges.
#[derive(SimpleObject, Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub start_cursor: String,
    pub end_cursor: String,
}

/// Edge in a connection
#[derive(Debug, Clone, PartialEq)]
pub struct Edge<T> {
    pub cursor: String,
    pub node: T,
}

#[Object]
impl<T: async_graphql::OutputType> Edge<T> {
    async fn cursor(&self) -> &str {
        &self.cursor
    }

    async fn node(&self) -> &T {
        &self.node
    }
}

/// Connection (paginated result)
#[derive(Debug, Clone, PartialEq)]
pub struct Connection<T> {
    pub edges: Vec<Edge<T>>,
    pub page_info: PageInfo,
    /// Only set by connections that report a total
    pub total_count: Option<usize>,
}

#[Object]
impl<T: async_graphql::OutputType> Connection<T> {
    async fn edges(&self) -> &[Edge<T>] {
        &self.edges
    }

    async fn page_info(&self) -> &PageInfo {
        &self.page_info
    }

    async fn total_count(&self) -> Option<i32> {
        self.total_count
            .map(|count| i32::try_from(count).unwrap_or(i32::MAX))
    }
}

impl<T> Connection<T> {
    /// Create connection from already-cursored edges
    pub fn new(edges: Vec<Edge<T>>, has_next: bool, has_previous: bool) -> Self {
        let start_cursor = edges.first().map(|e| e.cursor.clone()).unwrap_or_default();
        let end_cursor = edges.last().map(|e| e.cursor.clone()).unwrap_or_default();

        Self {
            edges,
            page_info: PageInfo {
                has_next_page: has_next,
                has_previous_page: has_previous,
                start_cursor,
                end_cursor,
            },
            total_count: None,
        }
    }

    /// Create empty connection, for resolvers that short-circuit before a load
    pub fn empty() -> Self {
        Self {
            edges: Vec::new(),
            page_info: PageInfo::default(),
            total_count: None,
        }
    }

    pub fn with_total_count(mut self, total_count: usize) -> Self {
        self.total_count = Some(total_count);
        self
    }

    /// Convert nodes while keeping cursors and page info, e.g. from a stored
    /// record to the GraphQL object a resolver returns
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Connection<U> {
        Connection {
            edges: self
                .edges
                .into_iter()
                .map(|edge| Edge {
                    cursor: edge.cursor,
                    node: f(edge.node),
                })
                .collect(),
            page_info: self.page_info,
            total_count: self.total_count,
        }
    }

    pub fn nodes(&self) -> impl Iterator<Item = &T> {
        self.edges.iter().map(|e| &e.node)
    }
}

/// Cursor key that is neither among the candidates nor placeable by
/// [`Node::compare_key`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("`{argument}` cursor key `{key}` cannot be placed among the candidates")]
pub struct UnknownCursor {
    pub argument: &'static str,
    pub key: String,
}

/// Builds one page out of an ordered candidate list
#[derive(Debug, Clone, Copy)]
pub struct ConnectionBuilder<'a> {
    tag: &'a str,
    total_count: bool,
}

impl<'a> ConnectionBuilder<'a> {
    pub fn new(tag: &'a str) -> Self {
        Self {
            tag,
            total_count: false,
        }
    }

    pub fn with_total_count(mut self, enabled: bool) -> Self {
        self.total_count = enabled;
        self
    }

    /// Select the page described by `args`
    ///
    /// A cursor whose record is gone is placed by key order, so paging
    /// resumes with the next surviving record.
    pub fn build<N: Node>(
        &self,
        candidates: Vec<N>,
        args: &ValidatedArgs,
    ) -> Result<Connection<N>, UnknownCursor> {
        let total = candidates.len();

        let start = match args.after_key.as_deref() {
            Some(key) => boundary(&candidates, "after", key)?,
            None => 0,
        };
        let end = match args.before_key.as_deref() {
            Some(key) => boundary(&candidates, "before", key)?,
            None => total,
        }
        .max(start);
        let window = end - start;

        let (skip, take, has_previous, has_next) = match args.slice {
            Slice::First(n) => {
                let take = n.min(window);
                (start, take, false, window > take)
            }
            Slice::Last(n) => {
                let take = n.min(window);
                (end - take, take, window > take, false)
            }
            Slice::All => (start, window, false, false),
        };

        let edges = candidates
            .into_iter()
            .skip(skip)
            .take(take)
            .map(|node| Edge {
                cursor: CursorCodec::encode(self.tag, node.key()),
                node,
            })
            .collect();

        let connection = Connection::new(edges, has_next, has_previous);
        Ok(if self.total_count {
            connection.with_total_count(total)
        } else {
            connection
        })
    }
}

/// Index of the first candidate on the far side of an `after`/`before` key
fn boundary<N: Node>(
    candidates: &[N],
    argument: &'static str,
    key: &str,
) -> Result<usize, UnknownCursor> {
    let after = argument == "after";
    if let Some(index) = candidates.iter().position(|n| n.key() == key) {
        return Ok(if after { index + 1 } else { index });
    }

    for (index, node) in candidates.iter().enumerate() {
        let ordering = node.compare_key(key).ok_or_else(|| UnknownCursor {
            argument,
            key: key.to_string(),
        })?;
        let beyond = match ordering {
            Ordering::Greater => true,
            Ordering::Equal => !after,
            Ordering::Less => false,
        };
        if beyond {
            return Ok(index);
        }
    }
    Ok(candidates.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Record;

    const TAG: &str = "domains";

    fn records(keys: &[&str]) -> Vec<Record> {
        keys.iter().map(|k| Record::new(*k)).collect()
    }

    fn keys(conn: &Connection<Record>) -> Vec<&str> {
        conn.nodes().map(|n| n.key()).collect()
    }

    fn page(builder: ConnectionBuilder, keys: &[&str], args: &ValidatedArgs) -> Connection<Record> {
        builder.build(records(keys), args).unwrap()
    }

    fn cursor(key: &str) -> String {
        CursorCodec::encode(TAG, key)
    }

    /// Node with no key order of its own
    struct Opaque(&'static str);

    impl Node for Opaque {
        fn key(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn test_empty_candidates() {
        let builder = ConnectionBuilder::new(TAG).with_total_count(true);
        for slice in [Slice::First(10), Slice::Last(10), Slice::All] {
            let conn = builder
                .build(Vec::<Record>::new(), &ValidatedArgs::new(slice))
                .unwrap();
            assert!(conn.edges.is_empty());
            assert_eq!(conn.page_info, PageInfo::default());
            assert_eq!(conn.page_info.start_cursor, "");
            assert_eq!(conn.total_count, Some(0));
        }
    }

    #[test]
    fn test_total_count_is_optional() {
        let conn = ConnectionBuilder::new(TAG)
            .build(records(&["a"]), &ValidatedArgs::new(Slice::All))
            .unwrap();
        assert_eq!(conn.total_count, None);
    }

    #[test]
    fn test_two_records_scenario() {
        let builder = ConnectionBuilder::new(TAG);
        let build = |args: ValidatedArgs| page(builder, &["a", "b"], &args);

        let conn = build(ValidatedArgs::new(Slice::First(1)));
        assert_eq!(keys(&conn), vec!["a"]);
        assert!(conn.page_info.has_next_page);
        assert!(!conn.page_info.has_previous_page);
        assert_eq!(conn.page_info.start_cursor, cursor("a"));
        assert_eq!(conn.page_info.end_cursor, cursor("a"));

        let conn = build(ValidatedArgs::new(Slice::Last(1)));
        assert_eq!(keys(&conn), vec!["b"]);
        assert!(!conn.page_info.has_next_page);
        assert!(conn.page_info.has_previous_page);

        let conn = build(ValidatedArgs::new(Slice::First(5)).after("a"));
        assert_eq!(keys(&conn), vec!["b"]);
        assert!(!conn.page_info.has_next_page);

        let conn = build(ValidatedArgs::new(Slice::Last(5)).before("b"));
        assert_eq!(keys(&conn), vec!["a"]);
        assert!(!conn.page_info.has_previous_page);
    }

    #[test]
    fn test_first_property() {
        let builder = ConnectionBuilder::new(TAG).with_total_count(true);
        for total in 0..8usize {
            let names: Vec<String> = (0..total).map(|i| i.to_string()).collect();
            for n in 0..=total + 2 {
                let candidates: Vec<Record> = names.iter().map(Record::new).collect();
                let conn = builder
                    .build(candidates, &ValidatedArgs::new(Slice::First(n)))
                    .unwrap();
                assert_eq!(conn.edges.len(), n.min(total));
                assert_eq!(conn.page_info.has_next_page, total > n);
                assert!(!conn.page_info.has_previous_page);
                assert_eq!(conn.total_count, Some(total));
                let expected: Vec<&str> = names.iter().take(n).map(String::as_str).collect();
                assert_eq!(keys(&conn), expected);
            }
        }
    }

    #[test]
    fn test_last_property() {
        let builder = ConnectionBuilder::new(TAG);
        for total in 0..8usize {
            let names: Vec<String> = (0..total).map(|i| i.to_string()).collect();
            for n in 0..=total + 2 {
                let candidates: Vec<Record> = names.iter().map(Record::new).collect();
                let conn = builder
                    .build(candidates, &ValidatedArgs::new(Slice::Last(n)))
                    .unwrap();
                assert_eq!(conn.edges.len(), n.min(total));
                assert_eq!(conn.page_info.has_previous_page, total > n);
                assert!(!conn.page_info.has_next_page);
                let expected: Vec<&str> = names[total - n.min(total)..]
                    .iter()
                    .map(String::as_str)
                    .collect();
                assert_eq!(keys(&conn), expected);
            }
        }
    }

    #[test]
    fn test_flags_follow_cursor_window() {
        let builder = ConnectionBuilder::new(TAG).with_total_count(true);
        let args = ValidatedArgs::new(Slice::First(2)).after("b");
        let conn = page(builder, &["a", "b", "c", "d", "e"], &args);
        assert_eq!(keys(&conn), vec!["c", "d"]);
        assert!(conn.page_info.has_next_page);
        assert!(!conn.page_info.has_previous_page);
        assert_eq!(conn.total_count, Some(5));

        let args = ValidatedArgs::new(Slice::First(3)).after("b");
        let conn = page(builder, &["a", "b", "c", "d", "e"], &args);
        assert_eq!(keys(&conn), vec!["c", "d", "e"]);
        assert!(!conn.page_info.has_next_page);
    }

    #[test]
    fn test_after_and_before_intersect() {
        let builder = ConnectionBuilder::new(TAG);
        let args = ValidatedArgs::new(Slice::All).after("a").before("e");
        let conn = page(builder, &["a", "b", "c", "d", "e"], &args);
        assert_eq!(keys(&conn), vec!["b", "c", "d"]);

        let args = ValidatedArgs::new(Slice::Last(2)).after("a").before("e");
        let conn = page(builder, &["a", "b", "c", "d", "e"], &args);
        assert_eq!(keys(&conn), vec!["c", "d"]);
        assert!(conn.page_info.has_previous_page);
        assert!(!conn.page_info.has_next_page);
    }

    #[test]
    fn test_single_record_window() {
        let builder = ConnectionBuilder::new(TAG);
        let args = ValidatedArgs::new(Slice::First(1)).after("b");
        let conn = page(builder, &["a", "b", "c"], &args);
        assert_eq!(keys(&conn), vec!["c"]);
        assert!(!conn.page_info.has_next_page);
        assert!(!conn.page_info.has_previous_page);
        assert_eq!(conn.page_info.start_cursor, conn.page_info.end_cursor);
    }

    #[test]
    fn test_crossed_cursors_are_empty() {
        let builder = ConnectionBuilder::new(TAG).with_total_count(true);
        let args = ValidatedArgs::new(Slice::All).after("d").before("b");
        let conn = page(builder, &["a", "b", "c", "d"], &args);
        assert!(conn.edges.is_empty());
        assert_eq!(conn.total_count, Some(4));
    }

    #[test]
    fn test_deleted_after_record_resumes_with_next() {
        let builder = ConnectionBuilder::new(TAG);
        let args = ValidatedArgs::new(Slice::First(2)).after("b");
        let conn = page(builder, &["a", "c", "d"], &args);
        assert_eq!(keys(&conn), vec!["c", "d"]);
        assert!(!conn.page_info.has_next_page);

        // numeric keys order as numbers, not strings
        let args = ValidatedArgs::new(Slice::First(1)).after("9");
        let conn = page(builder, &["8", "10", "11"], &args);
        assert_eq!(keys(&conn), vec!["10"]);
        assert!(conn.page_info.has_next_page);

        let args = ValidatedArgs::new(Slice::First(10)).after("zz");
        let conn = page(builder, &["a", "b"], &args);
        assert!(conn.edges.is_empty());
    }

    #[test]
    fn test_deleted_before_record_stops_at_previous() {
        let builder = ConnectionBuilder::new(TAG);
        let args = ValidatedArgs::new(Slice::Last(5)).before("c");
        let conn = page(builder, &["a", "b", "d"], &args);
        assert_eq!(keys(&conn), vec!["a", "b"]);
        assert!(!conn.page_info.has_previous_page);

        let args = ValidatedArgs::new(Slice::Last(5)).before("zz");
        let conn = page(builder, &["a", "b"], &args);
        assert_eq!(keys(&conn), vec!["a", "b"]);
    }

    #[test]
    fn test_unplaceable_cursor_is_rejected() {
        let builder = ConnectionBuilder::new(TAG);
        let args = ValidatedArgs::new(Slice::First(2)).after("b");
        let err = builder
            .build(vec![Opaque("a"), Opaque("c")], &args)
            .err()
            .unwrap();
        assert_eq!(
            err,
            UnknownCursor {
                argument: "after",
                key: "b".to_string(),
            }
        );

        // present keys never need an order
        let candidates = vec![Opaque("b"), Opaque("c")];
        let conn = builder.build(candidates, &args).unwrap();
        assert_eq!(conn.edges.len(), 1);
        assert_eq!(conn.edges[0].node.key(), "c");
    }

    #[test]
    fn test_after_last_record_is_empty() {
        let args = ValidatedArgs::new(Slice::First(1)).after("b");
        let conn = ConnectionBuilder::new(TAG)
            .build(records(&["a", "b"]), &args)
            .unwrap();
        assert!(conn.edges.is_empty());
        assert_eq!(conn.page_info, PageInfo::default());
    }

    #[test]
    fn test_first_zero_reports_more() {
        let conn = ConnectionBuilder::new(TAG)
            .build(records(&["a"]), &ValidatedArgs::new(Slice::First(0)))
            .unwrap();
        assert!(conn.edges.is_empty());
        assert!(conn.page_info.has_next_page);
        assert_eq!(conn.page_info.end_cursor, "");
    }

    #[test]
    fn test_map_keeps_page_info() {
        let conn = ConnectionBuilder::new(TAG)
            .with_total_count(true)
            .build(records(&["a", "b"]), &ValidatedArgs::new(Slice::First(1)))
            .unwrap();
        let page_info = conn.page_info.clone();
        let mapped = conn.map(|r| r.key.to_uppercase());
        assert_eq!(mapped.edges[0].node, "A");
        assert_eq!(mapped.edges[0].cursor, cursor("a"));
        assert_eq!(mapped.page_info, page_info);
        assert_eq!(mapped.total_count, Some(2));
    }

    #[test]
    fn test_empty_connection() {
        let conn: Connection<String> = Connection::empty();
        assert!(conn.edges.is_empty());
        assert!(!conn.page_info.has_next_page);
        assert_eq!(conn.total_count, None);
    }
}
