//! Cursor-based pagination.
//!
//! List endpoints accept `limit` and `cursor` query parameters and answer
//! with an array under a resource-specific key plus a top-level `cursor`.
//! An absent or empty cursor means there are no further pages.
//!
//! A [`Paginator`] can fetch a single page ([`Paginator::page`]), every page
//! ([`Paginator::all`]), either one selected by [`Paginate`]
//! ([`Paginator::fetch`]), or lazily yield items as a [`PaginatedStream`].

use std::collections::VecDeque;
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_util::Stream;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::request::{compact_query, QueryPairs, Request};
use super::ClientInner;
use crate::{Error, Result};

/// Default number of items per page.
pub const DEFAULT_PAGE_SIZE: u32 = 250;

/// Response field carrying the next-page cursor.
const CURSOR_FIELD: &str = "cursor";

/// How many pages a list call should fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Paginate {
    /// Follow cursors until the last page and return every item
    #[default]
    All,
    /// Fetch exactly one page and return it with its cursor
    SinglePage,
}

/// Paging options for list calls.
///
/// # Example
///
/// ```
/// use loyverse_rs::client::{ListOptions, Paginate};
///
/// let options = ListOptions::single_page()
///     .with_limit(50)
///     .with_cursor("abc");
///
/// assert_eq!(options.mode, Some(Paginate::SinglePage));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOptions {
    /// Items per page
    pub limit: u32,
    /// Cursor to start from
    pub cursor: Option<String>,
    /// Fetch mode; `None` behaves as [`Paginate::All`]
    pub mode: Option<Paginate>,
    /// Upper bound on pages fetched by an exhaustive fetch
    pub max_pages: Option<usize>,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_SIZE,
            cursor: None,
            mode: None,
            max_pages: None,
        }
    }
}

impl ListOptions {
    /// Options for fetching every page.
    pub fn all() -> Self {
        Self {
            mode: Some(Paginate::All),
            ..Default::default()
        }
    }

    /// Options for fetching one page.
    pub fn single_page() -> Self {
        Self {
            mode: Some(Paginate::SinglePage),
            ..Default::default()
        }
    }

    /// Set the page size.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Start from the given cursor.
    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    /// Set the fetch mode.
    pub fn with_mode(mut self, mode: Paginate) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Bound the number of pages an exhaustive fetch may request.
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = Some(max_pages);
        self
    }
}

/// One batch of list results and the cursor for the next batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T = Value> {
    /// Items in response order
    pub items: Vec<T>,
    /// Cursor for the next page; `Some("")` means the same as `None`
    pub cursor: Option<String>,
}

impl<T> Page<T> {
    /// Returns `true` if the server reported another page.
    pub fn has_more(&self) -> bool {
        self.cursor.as_deref().is_some_and(|c| !c.is_empty())
    }
}

/// A single fetched page exposed as a read-only collection.
///
/// This does not fetch further pages by itself; pass [`cursor`](Self::cursor)
/// back in [`ListOptions::with_cursor`] to continue.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedCollection<T = Value> {
    page: Page<T>,
}

impl<T> PaginatedCollection<T> {
    /// Wrap a page.
    pub fn new(items: Vec<T>, cursor: Option<String>) -> Self {
        Self {
            page: Page {
                items,
                cursor: normalize_cursor(cursor),
            },
        }
    }

    /// Items on this page.
    pub fn items(&self) -> &[T] {
        &self.page.items
    }

    /// Cursor for the next page.
    pub fn cursor(&self) -> Option<&str> {
        self.page.cursor.as_deref()
    }

    /// Returns `true` if another page exists.
    pub fn has_more(&self) -> bool {
        self.page.has_more()
    }

    /// Alias for [`has_more`](Self::has_more).
    pub fn next_page(&self) -> bool {
        self.has_more()
    }

    /// Number of items on this page.
    pub fn len(&self) -> usize {
        self.page.items.len()
    }

    /// Returns `true` if the page holds no items.
    pub fn is_empty(&self) -> bool {
        self.page.items.is_empty()
    }

    /// First item on the page.
    pub fn first(&self) -> Option<&T> {
        self.page.items.first()
    }

    /// Last item on the page.
    pub fn last(&self) -> Option<&T> {
        self.page.items.last()
    }

    /// Item at `index`.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.page.items.get(index)
    }

    /// Iterate over the items.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.page.items.iter()
    }

    /// Consume the collection, returning its items.
    pub fn into_vec(self) -> Vec<T> {
        self.page.items
    }

    /// Consume the collection, returning the underlying page.
    pub fn into_page(self) -> Page<T> {
        self.page
    }
}

impl<T> From<Page<T>> for PaginatedCollection<T> {
    fn from(page: Page<T>) -> Self {
        Self::new(page.items, page.cursor)
    }
}

impl<T> IntoIterator for PaginatedCollection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.page.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a PaginatedCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.page.items.iter()
    }
}

/// Result of a list call whose mode was chosen at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Listing<T = Value> {
    /// Every item across all pages
    All(Vec<T>),
    /// One page with its cursor
    Page(PaginatedCollection<T>),
}

impl<T> Listing<T> {
    /// Items held by this listing.
    pub fn items(&self) -> &[T] {
        match self {
            Listing::All(items) => items,
            Listing::Page(page) => page.items(),
        }
    }

    /// Consume the listing, returning its items.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Listing::All(items) => items,
            Listing::Page(page) => page.into_vec(),
        }
    }

    /// Returns the page if this is a single-page listing.
    pub fn into_page(self) -> Option<PaginatedCollection<T>> {
        match self {
            Listing::Page(page) => Some(page),
            Listing::All(_) => None,
        }
    }
}

/// Builder and driver for paged requests against one list endpoint.
///
/// Holds no state between calls other than its parameters; each fetch is a
/// fresh sequence of GET requests driven by the returned cursors.
pub struct Paginator<T = Value> {
    inner: Arc<ClientInner>,
    path: String,
    data_key: String,
    filters: QueryPairs,
    options: ListOptions,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Paginator<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            path: self.path.clone(),
            data_key: self.data_key.clone(),
            filters: self.filters.clone(),
            options: self.options.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> Paginator<T> {
    pub(crate) fn new(
        inner: Arc<ClientInner>,
        path: impl Into<String>,
        data_key: impl Into<String>,
    ) -> Self {
        Self {
            inner,
            path: path.into(),
            data_key: data_key.into(),
            filters: Vec::new(),
            options: ListOptions::default(),
            _marker: PhantomData,
        }
    }

    /// Add filter parameters. `None` fields are omitted from the query.
    pub fn filters<Q: Serialize + ?Sized>(mut self, filters: &Q) -> Result<Self> {
        self.filters.extend(
            compact_query(filters)?
                .into_iter()
                .filter(|(k, _)| k != "limit" && k != CURSOR_FIELD),
        );
        Ok(self)
    }

    /// Replace the paging options.
    pub fn options(mut self, options: ListOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the page size.
    pub fn limit(mut self, limit: u32) -> Self {
        self.options.limit = limit;
        self
    }

    /// Start from the given cursor.
    pub fn cursor(mut self, cursor: impl Into<String>) -> Self {
        self.options.cursor = Some(cursor.into());
        self
    }

    /// Bound the number of pages [`all`](Self::all) may request.
    pub fn max_pages(mut self, max_pages: usize) -> Self {
        self.options.max_pages = Some(max_pages);
        self
    }

    fn page_request(&self, cursor: Option<&str>) -> Request {
        let mut request = Request::new(reqwest::Method::GET, self.path.clone());
        request
            .query
            .push(("limit".to_string(), self.options.limit.to_string()));
        if let Some(cursor) = cursor.filter(|c| !c.is_empty()) {
            request
                .query
                .push((CURSOR_FIELD.to_string(), cursor.to_string()));
        }
        request.query.extend(self.filters.iter().cloned());
        request
    }
}

impl<T: DeserializeOwned> Paginator<T> {
    /// Fetch one page starting at `cursor`.
    pub async fn fetch_page(&self, cursor: Option<&str>) -> Result<Page<T>> {
        let request = self.page_request(cursor);
        let body = self.inner.send(&request).await?;
        let page = decode_page(body, &self.data_key)?;

        debug!(
            path = %self.path,
            items = page.items.len(),
            has_more = page.has_more(),
            "Fetched page"
        );
        Ok(page)
    }

    /// Fetch exactly one page and wrap it in a collection.
    pub async fn page(&self) -> Result<PaginatedCollection<T>> {
        let page = self.fetch_page(self.options.cursor.as_deref()).await?;
        Ok(page.into())
    }

    /// Fetch every page, concatenating items in response order.
    ///
    /// Stops as soon as a response carries no cursor (or an empty one). A
    /// failure on any page aborts the whole fetch. Without
    /// [`max_pages`](Self::max_pages) there is no iteration bound, so an
    /// endpoint that never stops returning cursors loops forever.
    pub async fn all(&self) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut cursor = normalize_cursor(self.options.cursor.clone());
        let mut pages = 0usize;

        loop {
            let page = self.fetch_page(cursor.as_deref()).await?;
            pages += 1;
            items.extend(page.items);

            cursor = page.cursor;
            if cursor.is_none() {
                break;
            }
            if let Some(max_pages) = self.options.max_pages {
                if pages >= max_pages {
                    return Err(Error::PageLimitExceeded { max_pages });
                }
            }
        }

        Ok(items)
    }

    /// Fetch according to the configured mode; `None` means every page.
    pub async fn fetch(&self) -> Result<Listing<T>> {
        match self.options.mode.unwrap_or_default() {
            Paginate::All => self.all().await.map(Listing::All),
            Paginate::SinglePage => self.page().await.map(Listing::Page),
        }
    }
}

impl<T: DeserializeOwned + Send + 'static> Paginator<T> {
    /// Lazily yield items, fetching the next page when the current one is
    /// drained.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use futures_util::StreamExt;
    ///
    /// # async fn example(client: loyverse_rs::LoyverseClient) -> loyverse_rs::Result<()> {
    /// let mut stream = client.receipts().stream(&Default::default())?;
    ///
    /// while let Some(receipt) = stream.next().await {
    ///     println!("{}", receipt?["receipt_number"]);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn into_stream(self) -> PaginatedStream<T> {
        let start = normalize_cursor(self.options.cursor.clone());
        let paginator = Arc::new(self);

        PaginatedStream::new(start, move |cursor: Option<String>| {
            let paginator = paginator.clone();
            Box::pin(async move { paginator.fetch_page(cursor.as_deref()).await })
        })
    }
}

/// Split a list response into items and cursor.
///
/// A missing or `null` data field is an empty page. A data field of any
/// other non-array type is reported with its raw value.
pub(crate) fn decode_page<T: DeserializeOwned>(
    body: Option<Value>,
    data_key: &str,
) -> Result<Page<T>> {
    let Some(mut body) = body else {
        return Ok(Page {
            items: Vec::new(),
            cursor: None,
        });
    };

    let cursor = normalize_cursor(
        body.get(CURSOR_FIELD)
            .and_then(Value::as_str)
            .map(String::from),
    );

    let items = match body.get_mut(data_key).map(Value::take) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(values)) => values
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<T>, _>>()?,
        Some(other) => {
            return Err(Error::MalformedPage {
                field: data_key.to_string(),
                value: other,
            })
        }
    };

    Ok(Page { items, cursor })
}

fn normalize_cursor(cursor: Option<String>) -> Option<String> {
    cursor.filter(|c| !c.is_empty())
}

/// Type alias for a boxed future used internally.
type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

type FetchFn<T> = Box<dyn Fn(Option<String>) -> BoxFuture<'static, Result<Page<T>>> + Send + Sync>;

/// A stream that lazily fetches pages from a cursor-paginated endpoint.
///
/// Yields individual items. After an error the stream ends.
pub struct PaginatedStream<T> {
    fetch_page: FetchFn<T>,
    current_items: VecDeque<T>,
    next_cursor: Option<String>,
    exhausted: bool,
    pending_fetch: Option<BoxFuture<'static, Result<Page<T>>>>,
}

impl<T> PaginatedStream<T>
where
    T: Send + 'static,
{
    /// Create a stream starting at `cursor` (or the first page for `None`).
    pub fn new<F>(cursor: Option<String>, fetch_page: F) -> Self
    where
        F: Fn(Option<String>) -> BoxFuture<'static, Result<Page<T>>> + Send + Sync + 'static,
    {
        Self {
            fetch_page: Box::new(fetch_page),
            current_items: VecDeque::new(),
            next_cursor: normalize_cursor(cursor),
            exhausted: false,
            pending_fetch: None,
        }
    }
}

impl<T> Stream for PaginatedStream<T> {
    type Item = Result<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;

        loop {
            if let Some(item) = this.current_items.pop_front() {
                return Poll::Ready(Some(Ok(item)));
            }

            if let Some(ref mut fut) = this.pending_fetch {
                match fut.as_mut().poll(cx) {
                    Poll::Ready(Ok(page)) => {
                        this.pending_fetch = None;
                        this.current_items = page.items.into();
                        match normalize_cursor(page.cursor) {
                            Some(cursor) => this.next_cursor = Some(cursor),
                            None => this.exhausted = true,
                        }
                        continue;
                    }
                    Poll::Ready(Err(e)) => {
                        this.pending_fetch = None;
                        this.exhausted = true;
                        return Poll::Ready(Some(Err(e)));
                    }
                    Poll::Pending => return Poll::Pending,
                }
            }

            if !this.exhausted {
                let fut = (this.fetch_page)(this.next_cursor.take());
                this.pending_fetch = Some(fut);
                continue;
            }

            return Poll::Ready(None);
        }
    }
}

impl<T> Unpin for PaginatedStream<T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;
    use serde_json::json;

    #[test]
    fn test_decode_page() {
        let body = json!({"categories": [{"id": "1"}, {"id": "2"}], "cursor": "next"});
        let page: Page = decode_page(Some(body), "categories").unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.cursor.as_deref(), Some("next"));
        assert!(page.has_more());
    }

    #[test]
    fn test_decode_page_missing_field_is_empty() {
        let page: Page = decode_page(Some(json!({"cursor": ""})), "items").unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.cursor, None);

        let page: Page = decode_page(None, "items").unwrap();
        assert!(page.items.is_empty());
        assert!(!page.has_more());
    }

    #[test]
    fn test_decode_page_rejects_non_array() {
        let err = decode_page::<Value>(Some(json!({"items": {"id": 1}})), "items").unwrap_err();
        match err {
            Error::MalformedPage { field, value } => {
                assert_eq!(field, "items");
                assert_eq!(value, json!({"id": 1}));
            }
            other => panic!("Expected MalformedPage, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_typed_items() {
        #[derive(Debug, serde::Deserialize, PartialEq)]
        struct Category {
            id: String,
        }

        let page: Page<Category> =
            decode_page(Some(json!({"categories": [{"id": "a"}]})), "categories").unwrap();
        assert_eq!(page.items, vec![Category { id: "a".into() }]);
    }

    fn page(items: Vec<i32>, cursor: Option<&str>) -> Page<i32> {
        Page {
            items,
            cursor: cursor.map(str::to_string),
        }
    }

    #[test]
    fn test_page_empty_cursor_has_no_more() {
        assert!(!page(vec![1], Some("")).has_more());
        assert!(!page(vec![1], None).has_more());
        assert!(page(vec![1], Some("next")).has_more());
    }

    #[tokio::test]
    async fn test_stream_stops_on_empty_cursor() {
        let stream = PaginatedStream::new(Some(String::new()), |cursor: Option<String>| {
            Box::pin(async move {
                Ok(match cursor {
                    None => page(vec![1], Some("")),
                    Some(_) => page(vec![99], None),
                })
            })
        });

        let items: Vec<i32> = stream.map(|r| r.unwrap()).collect().await;
        assert_eq!(items, vec![1]);
    }

    #[test]
    fn test_collection_cursor_equivalence() {
        let empty = PaginatedCollection::new(vec![1, 2], Some(String::new()));
        let none = PaginatedCollection::new(vec![1, 2], None);
        assert_eq!(empty, none);
        assert!(!empty.has_more());
        assert_eq!(empty.cursor(), None);

        let more = PaginatedCollection::new(vec![1, 2, 3], Some("abc".into()));
        assert!(more.has_more());
        assert!(more.next_page());
        assert_eq!(more.len(), 3);
        assert_eq!(more.first(), Some(&1));
        assert_eq!(more.last(), Some(&3));
        assert_eq!(more.get(1), Some(&2));
        assert_eq!(more.iter().sum::<i32>(), 6);
        assert_eq!(more.into_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_listing_accessors() {
        let all: Listing<i32> = Listing::All(vec![1, 2]);
        assert_eq!(all.items(), &[1, 2]);
        assert!(all.into_page().is_none());

        let page = Listing::Page(PaginatedCollection::new(vec![3], Some("c".into())));
        assert_eq!(page.clone().into_vec(), vec![3]);
        assert_eq!(page.into_page().unwrap().cursor(), Some("c"));
    }

    #[test]
    fn test_list_options() {
        let options = ListOptions::default();
        assert_eq!(options.limit, DEFAULT_PAGE_SIZE);
        assert_eq!(options.mode.unwrap_or_default(), Paginate::All);

        let options = ListOptions::all().with_max_pages(5).with_limit(10);
        assert_eq!(options.max_pages, Some(5));
        assert_eq!(options.limit, 10);
    }

    #[tokio::test]
    async fn test_stream_follows_cursors() {
        let stream = PaginatedStream::new(None, |cursor: Option<String>| {
            Box::pin(async move {
                Ok(match cursor.as_deref() {
                    None => page(vec![1, 2], Some("a")),
                    Some("a") => page(vec![], Some("b")),
                    Some("b") => page(vec![3], None),
                    Some(other) => panic!("unexpected cursor {}", other),
                })
            })
        });

        let items: Vec<i32> = stream.map(|r| r.unwrap()).collect().await;
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_stream_stops_after_error() {
        let mut stream = PaginatedStream::new(None, |cursor: Option<String>| {
            Box::pin(async move {
                match cursor {
                    None => Ok(page(vec![1], Some("a"))),
                    Some(_) => Err(Error::InvalidInput("boom".into())),
                }
            })
        });

        assert_eq!(stream.next().await.unwrap().unwrap(), 1);
        assert!(stream.next().await.unwrap().is_err());
        assert!(stream.next().await.is_none());
    }
}
