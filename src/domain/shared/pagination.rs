//! Cursor pagination
//!
//! A cursor is the opaque id of the last item of the previous page. Whether
//! another page exists is guessed from the page length: a full page means
//! more may follow. An exactly-full last page therefore costs one extra,
//! empty fetch.

use serde::{Deserialize, Serialize};

/// Default number of items per page
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Opaque "last seen" marker
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    pub fn new(marker: impl Into<String>) -> Self {
        Self(marker.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub cursor: Option<Cursor>,
    pub page_size: usize,
}

impl PageRequest {
    /// Request for the first page
    pub fn first(page_size: usize) -> Self {
        Self {
            cursor: None,
            page_size,
        }
    }

    /// Request for the page following `cursor`
    pub fn after(cursor: Cursor, page_size: usize) -> Self {
        Self {
            cursor: Some(cursor),
            page_size,
        }
    }

    pub fn is_first(&self) -> bool {
        self.cursor.is_none()
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

/// One page of results
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<Cursor>,
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Build a page, deriving the cursor from the last item
    pub fn from_items(items: Vec<T>, page_size: usize, cursor_of: impl Fn(&T) -> String) -> Self {
        let next_cursor = items.last().map(|item| Cursor::new(cursor_of(item)));
        let has_more = has_more(items.len(), page_size);
        Self {
            items,
            next_cursor,
            has_more,
        }
    }

    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            next_cursor: None,
            has_more: false,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next_cursor: self.next_cursor,
            has_more: self.has_more,
        }
    }
}

/// `true` when the returned page was full
pub fn has_more(returned_count: usize, page_size: usize) -> bool {
    returned_count >= page_size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_more_heuristic() {
        assert!(has_more(20, 20));
        assert!(!has_more(19, 20));
        assert!(!has_more(0, 20));
    }

    #[test]
    fn test_page_from_items() {
        let items: Vec<String> = (0..20).map(|i| format!("post-{i}")).collect();
        let page = Page::from_items(items, 20, |s| s.clone());
        assert!(page.has_more);
        assert_eq!(page.next_cursor, Some(Cursor::new("post-19")));

        let short = Page::from_items(vec!["a".to_string()], 20, |s| s.clone());
        assert!(!short.has_more);

        let none: Page<String> = Page::from_items(Vec::new(), 20, |s| s.clone());
        assert!(none.next_cursor.is_none());
        assert!(!none.has_more);
    }
}
