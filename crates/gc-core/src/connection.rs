//! Cursor-based pagination over in-memory collections.
//!
//! Follows the Relay connection conventions: cursors encode the offset into
//! the full collection as `base64("arrayconnection:<offset>")`, `first`/`after`
//! page forward and `last`/`before` page backward.
//!
//! Backing collections are small and loaded in full before slicing. Larger
//! datasets would need `first` and the cursor pushed down into the store query.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::{GcError, GcResult};

const CURSOR_PREFIX: &str = "arrayconnection:";

/// Pagination arguments of a connection field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionArgs {
    pub first: Option<i64>,
    pub after: Option<String>,
    pub last: Option<i64>,
    pub before: Option<String>,
}

impl ConnectionArgs {
    pub fn first(n: i64) -> Self {
        Self {
            first: Some(n),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge<T> {
    pub cursor: String,
    pub node: T,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInfo {
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Connection<T> {
    pub edges: Vec<Edge<T>>,
    pub page_info: PageInfo,
}

impl<T> Connection<T> {
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
        }
    }
}

pub fn offset_to_cursor(offset: i64) -> String {
    STANDARD.encode(format!("{}{}", CURSOR_PREFIX, offset))
}

/// Decode a cursor. Anything not produced by [`offset_to_cursor`] is `None`.
pub fn cursor_to_offset(cursor: &str) -> Option<i64> {
    let bytes = STANDARD.decode(cursor).ok()?;
    let decoded = String::from_utf8(bytes).ok()?;
    decoded.strip_prefix(CURSOR_PREFIX)?.parse().ok()
}

fn offset_with_default(cursor: Option<&str>, default: i64) -> i64 {
    cursor.and_then(cursor_to_offset).unwrap_or(default)
}

/// Slice a full collection according to the connection arguments.
///
/// Cursor offsets come from clients and may hold any `i64`, so offset
/// arithmetic saturates.
pub fn connection_from_vec<T>(items: Vec<T>, args: &ConnectionArgs) -> GcResult<Connection<T>> {
    let length = items.len() as i64;
    let before_offset = offset_with_default(args.before.as_deref(), length);
    let after_offset = offset_with_default(args.after.as_deref(), -1);

    let mut start_offset = after_offset.max(-1).saturating_add(1);
    let mut end_offset = before_offset.min(length);

    if let Some(first) = args.first {
        if first < 0 {
            return Err(GcError::validation(
                "Argument \"first\" must be a non-negative integer",
            ));
        }
        end_offset = end_offset.min(start_offset.saturating_add(first));
    }
    if let Some(last) = args.last {
        if last < 0 {
            return Err(GcError::validation(
                "Argument \"last\" must be a non-negative integer",
            ));
        }
        start_offset = start_offset.max(end_offset.saturating_sub(last));
    }

    let start = start_offset.clamp(0, length) as usize;
    let end = (end_offset.clamp(0, length) as usize).max(start);

    let edges: Vec<Edge<T>> = items
        .into_iter()
        .enumerate()
        .skip(start)
        .take(end - start)
        .map(|(offset, node)| Edge {
            cursor: offset_to_cursor(offset as i64),
            node,
        })
        .collect();

    let lower_bound = if args.after.is_some() {
        after_offset.saturating_add(1)
    } else {
        0
    };
    let upper_bound = if args.before.is_some() { before_offset } else { length };

    let page_info = PageInfo {
        start_cursor: edges.first().map(|e| e.cursor.clone()),
        end_cursor: edges.last().map(|e| e.cursor.clone()),
        has_previous_page: args.last.is_some() && start_offset > lower_bound,
        has_next_page: args.first.is_some() && end_offset < upper_bound,
    };

    Ok(Connection { edges, page_info })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters() -> Vec<&'static str> {
        vec!["A", "B", "C", "D", "E"]
    }

    fn nodes<T: Clone>(connection: &Connection<T>) -> Vec<T> {
        connection.edges.iter().map(|e| e.node.clone()).collect()
    }

    #[test]
    fn test_first_k_for_every_k() {
        let n = letters().len() as i64;
        for k in 0..=n + 2 {
            let connection = connection_from_vec(letters(), &ConnectionArgs::first(k)).unwrap();
            assert_eq!(connection.edges.len() as i64, k.min(n));
            assert_eq!(nodes(&connection), letters()[..k.min(n) as usize].to_vec());
            assert_eq!(connection.page_info.has_next_page, k < n);
            assert!(!connection.page_info.has_previous_page);
        }
    }

    #[test]
    fn test_no_arguments_returns_everything() {
        let connection = connection_from_vec(letters(), &ConnectionArgs::default()).unwrap();
        assert_eq!(nodes(&connection), letters());
        assert!(!connection.page_info.has_next_page);
        assert_eq!(connection.page_info.start_cursor, Some(offset_to_cursor(0)));
        assert_eq!(connection.page_info.end_cursor, Some(offset_to_cursor(4)));
    }

    #[test]
    fn test_first_after() {
        let args = ConnectionArgs {
            first: Some(2),
            after: Some(offset_to_cursor(1)),
            ..Default::default()
        };
        let connection = connection_from_vec(letters(), &args).unwrap();
        assert_eq!(nodes(&connection), vec!["C", "D"]);
        assert!(connection.page_info.has_next_page);
    }

    #[test]
    fn test_last_before() {
        let args = ConnectionArgs {
            last: Some(2),
            before: Some(offset_to_cursor(3)),
            ..Default::default()
        };
        let connection = connection_from_vec(letters(), &args).unwrap();
        assert_eq!(nodes(&connection), vec!["B", "C"]);
        assert!(connection.page_info.has_previous_page);
        assert!(!connection.page_info.has_next_page);
    }

    #[test]
    fn test_after_past_the_end_is_empty() {
        let args = ConnectionArgs {
            first: Some(2),
            after: Some(offset_to_cursor(10)),
            ..Default::default()
        };
        let connection = connection_from_vec(letters(), &args).unwrap();
        assert!(connection.edges.is_empty());
        assert_eq!(connection.page_info.start_cursor, None);
    }

    #[test]
    fn test_invalid_cursor_is_ignored() {
        let args = ConnectionArgs {
            first: Some(1),
            after: Some("garbage".to_string()),
            ..Default::default()
        };
        let connection = connection_from_vec(letters(), &args).unwrap();
        assert_eq!(nodes(&connection), vec!["A"]);
    }

    #[test]
    fn test_negative_first_is_rejected() {
        let err = connection_from_vec(letters(), &ConnectionArgs::first(-1)).unwrap_err();
        assert!(matches!(err, GcError::ValidationError(_)));
    }

    fn raw_cursor(offset: &str) -> String {
        STANDARD.encode(format!("{}{}", CURSOR_PREFIX, offset))
    }

    #[test]
    fn test_after_at_max_offset_is_empty() {
        let args = ConnectionArgs {
            first: Some(1),
            after: Some(raw_cursor(&i64::MAX.to_string())),
            ..Default::default()
        };
        let connection = connection_from_vec(vec![1, 2, 3], &args).unwrap();
        assert!(connection.edges.is_empty());
        assert!(!connection.page_info.has_next_page);
    }

    #[test]
    fn test_before_at_min_offset_is_empty() {
        let args = ConnectionArgs {
            last: Some(1),
            before: Some(raw_cursor(&i64::MIN.to_string())),
            ..Default::default()
        };
        let connection = connection_from_vec(vec![1, 2, 3], &args).unwrap();
        assert!(connection.edges.is_empty());
        assert!(!connection.page_info.has_previous_page);
    }

    #[test]
    fn test_huge_first_and_last() {
        let args = ConnectionArgs {
            first: Some(i64::MAX),
            after: Some(offset_to_cursor(0)),
            ..Default::default()
        };
        let connection = connection_from_vec(letters(), &args).unwrap();
        assert_eq!(nodes(&connection), vec!["B", "C", "D", "E"]);

        let args = ConnectionArgs {
            last: Some(i64::MAX),
            before: Some(raw_cursor(&i64::MIN.to_string())),
            ..Default::default()
        };
        assert!(connection_from_vec(letters(), &args).unwrap().edges.is_empty());
    }

    #[test]
    fn test_cursor_round_trip() {
        assert_eq!(offset_to_cursor(0), "YXJyYXljb25uZWN0aW9uOjA=");
        assert_eq!(cursor_to_offset(&offset_to_cursor(17)), Some(17));
    }
}
