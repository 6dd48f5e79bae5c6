//! Pagination of list endpoints.
//!
//! Paginated endpoints are exposed as a lazy [`PageStream`] that fetches one
//! page per poll. [`materialize`] turns that stream into what the caller
//! asked for via [`PaginationType`]: the first page only, every item in one
//! list, or the stream itself.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::str::FromStr;

use futures_util::stream::{self, Stream, StreamExt};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default number of items requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// A lazily fetched sequence of pages.
pub type PageStream<T> = Pin<Box<dyn Stream<Item = Result<Vec<T>>> + Send>>;

/// How a paginated call should return its results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaginationType {
    /// Only the first page; later pages are never requested
    None,
    /// Every page, flattened into one list
    #[default]
    Full,
    /// The page stream itself, consumed by the caller
    Iterator,
}

impl fmt::Display for PaginationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaginationType::None => write!(f, "none"),
            PaginationType::Full => write!(f, "full"),
            PaginationType::Iterator => write!(f, "iterator"),
        }
    }
}

impl FromStr for PaginationType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" => Ok(PaginationType::None),
            "full" => Ok(PaginationType::Full),
            "iterator" => Ok(PaginationType::Iterator),
            other => Err(Error::Config(format!("Invalid pagination type: {other}"))),
        }
    }
}

/// One page from a cursor-paginated endpoint.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// The items in this page.
    pub items: Vec<T>,
    /// Cursor for the next page, `None` on the last page.
    pub next_page_token: Option<String>,
}

/// The result of a paginated call.
pub enum Paginated<T> {
    /// The first page only ([`PaginationType::None`])
    Page(Vec<T>),
    /// All items across all pages ([`PaginationType::Full`])
    Full(Vec<T>),
    /// The unconsumed page stream ([`PaginationType::Iterator`])
    Iterator(PageStream<T>),
}

impl<T> Paginated<T> {
    /// Collect the items, draining the stream if this is
    /// [`Paginated::Iterator`].
    pub async fn into_items(self) -> Result<Vec<T>> {
        match self {
            Paginated::Page(items) | Paginated::Full(items) => Ok(items),
            Paginated::Iterator(mut pages) => {
                let mut items = Vec::new();
                while let Some(page) = pages.next().await {
                    items.extend(page?);
                }
                Ok(items)
            }
        }
    }

    /// The mode this result was produced under.
    pub fn mode(&self) -> PaginationType {
        match self {
            Paginated::Page(_) => PaginationType::None,
            Paginated::Full(_) => PaginationType::Full,
            Paginated::Iterator(_) => PaginationType::Iterator,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Paginated<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Paginated::Page(items) => f.debug_tuple("Page").field(items).finish(),
            Paginated::Full(items) => f.debug_tuple("Full").field(items).finish(),
            Paginated::Iterator(_) => f.write_str("Iterator(..)"),
        }
    }
}

/// Check a pagination request before anything is fetched.
///
/// A missing mode means [`PaginationType::Full`]. `max_items_limit` is only
/// accepted together with `Full`.
pub fn validate_pagination(
    max_items_limit: Option<usize>,
    mode: Option<PaginationType>,
) -> Result<PaginationType> {
    let mode = mode.unwrap_or_default();
    if mode != PaginationType::Full && max_items_limit.is_some() {
        return Err(Error::Config(
            "max_items_limit can only be specified for PaginationType::Full".into(),
        ));
    }
    Ok(mode)
}

/// Turn a page stream into the result shape requested by `mode`.
///
/// Under `Full`, pulling stops once `max_items_limit` items are collected
/// and the list is cut to that length. Page order and item order within
/// each page are preserved.
pub async fn materialize<T, S>(
    pages: S,
    mode: PaginationType,
    max_items_limit: Option<usize>,
) -> Result<Paginated<T>>
where
    S: Stream<Item = Result<Vec<T>>> + Send + 'static,
    T: Send + 'static,
{
    let mode = validate_pagination(max_items_limit, Some(mode))?;
    let mut pages: PageStream<T> = Box::pin(pages);

    match mode {
        PaginationType::None => {
            let first = pages.next().await.transpose()?.unwrap_or_default();
            Ok(Paginated::Page(first))
        }
        PaginationType::Full => {
            let mut items = Vec::new();
            while let Some(page) = pages.next().await {
                items.extend(page?);
                if let Some(limit) = max_items_limit {
                    if items.len() >= limit {
                        items.truncate(limit);
                        break;
                    }
                }
            }
            Ok(Paginated::Full(items))
        }
        PaginationType::Iterator => Ok(Paginated::Iterator(pages)),
    }
}

/// Build a lazy page stream from a cursor-based fetch function.
///
/// `fetch` receives `None` for the first page and the previous page's
/// `next_page_token` afterwards. The stream ends after a page without a
/// token, or right after yielding an error.
pub fn paginate<T, F, Fut>(fetch: F) -> PageStream<T>
where
    T: Send + 'static,
    F: FnMut(Option<String>) -> Fut + Send + 'static,
    Fut: Future<Output = Result<Page<T>>> + Send + 'static,
{
    enum Cursor {
        Start,
        Next(String),
        Done,
    }

    Box::pin(stream::unfold(
        (fetch, Cursor::Start),
        |(mut fetch, cursor)| async move {
            let token = match cursor {
                Cursor::Start => None,
                Cursor::Next(token) => Some(token),
                Cursor::Done => return None,
            };

            match fetch(token).await {
                Ok(page) => {
                    let cursor = page.next_page_token.map_or(Cursor::Done, Cursor::Next);
                    Some((Ok(page.items), (fetch, cursor)))
                }
                Err(e) => Some((Err(e), (fetch, Cursor::Done))),
            }
        },
    ))
}
