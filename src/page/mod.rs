//! Cursor pagination helpers.
//!
//! The most common step function is a cursor-paginated listing: each
//! response carries a batch of items and, while more remain, an opaque
//! cursor for the next request. [`Page::into_step`] turns such a response
//! into exactly the `(partial, next token)` pair the driver expects.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod error;

pub use error::PageError;

/// Opaque, non-empty continuation cursor.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cursor(String);

impl Cursor {
    /// Create a cursor, rejecting empty strings.
    pub fn new(value: impl Into<String>) -> Result<Self, PageError> {
        let value = value.into();
        if value.is_empty() {
            return Err(PageError::EmptyCursor);
        }
        Ok(Self(value))
    }

    /// Borrow the cursor text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Cursor {
    type Error = PageError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Cursor> for String {
    fn from(cursor: Cursor) -> Self {
        cursor.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The continuation token for a cursor-paginated listing.
///
/// The first request has no cursor; each following request carries the
/// cursor returned by its predecessor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Zero-based position of this request in the run
    pub index: usize,

    /// Cursor returned by the previous page, if any
    pub cursor: Option<Cursor>,
}

impl PageRequest {
    /// The request for the first page.
    pub fn first() -> Self {
        Self {
            index: 0,
            cursor: None,
        }
    }

    /// The request following this one, using `cursor`.
    pub fn after(&self, cursor: Cursor) -> Self {
        Self {
            index: self.index + 1,
            cursor: Some(cursor),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// One page of a listing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page, in listing order
    #[serde(alias = "results")]
    pub items: Vec<T>,

    /// Cursor for the next page; absent on the last page
    #[serde(default, alias = "next_cursor")]
    pub next: Option<Cursor>,
}

/// Wire shape accepted by [`Page::from_json`].
#[derive(Deserialize)]
struct Envelope<T> {
    #[serde(alias = "results")]
    items: Vec<T>,
    #[serde(default, alias = "next_cursor")]
    next: Option<Cursor>,
    #[serde(default)]
    has_more: Option<bool>,
}

impl<T> Page<T> {
    /// A page with more to follow.
    pub fn with_next(items: Vec<T>, next: Cursor) -> Self {
        Self {
            items,
            next: Some(next),
        }
    }

    /// The final page.
    pub fn last(items: Vec<T>) -> Self {
        Self { items, next: None }
    }

    /// Whether this is the final page, i.e. it carries no cursor.
    pub fn is_last(&self) -> bool {
        self.next.is_none()
    }

    /// Split into the items and the request for the next page, if any.
    pub fn into_step(self, request: &PageRequest) -> (Vec<T>, Option<PageRequest>) {
        let next = self.next.map(|cursor| request.after(cursor));
        (self.items, next)
    }
}

impl<T: DeserializeOwned> Page<T> {
    /// Decode a JSON page body.
    ///
    /// Accepts `items` or `results` for the batch and `next` or
    /// `next_cursor` for the cursor. When the body says `"has_more": false`
    /// any cursor it carries is ignored.
    pub fn from_json(body: &str) -> Result<Self, PageError> {
        let envelope: Envelope<T> = serde_json::from_str(body)?;
        let next = match envelope.has_more {
            Some(false) => None,
            _ => envelope.next,
        };
        Ok(Self {
            items: envelope.items,
            next,
        })
    }
}
