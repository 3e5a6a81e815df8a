//! Lazy, pull-based search results
//!
//! The stream fetches nothing until the first pull and buffers at most one
//! page of items at a time. The consumer controls pacing; abandoning the
//! stream abandons the remaining result set without fetching it.

use crate::catalog::client::{CatalogClient, PageRequest};
use crate::catalog::item::StacItem;
use crate::Result;
use std::collections::VecDeque;

/// A pull-based producer of search results
///
/// Created by [`CatalogClient::search_stream`]. Each stream is an
/// independent pass over the matching result set, starting from the
/// beginning; a partially consumed stream cannot be resumed, only replaced
/// by a fresh one.
pub struct ItemStream<'a> {
    client: &'a CatalogClient,

    /// Request for the next page; `None` once the result set is exhausted
    pending: Option<PageRequest>,

    /// Items fetched but not yet pulled (at most one page)
    buffer: VecDeque<StacItem>,

    /// Number of items handed to the consumer so far
    yielded: usize,

    /// Item cap across all pages
    limit: Option<usize>,
}

impl<'a> ItemStream<'a> {
    pub(crate) fn new(
        client: &'a CatalogClient,
        first: PageRequest,
        limit: Option<usize>,
    ) -> Self {
        Self {
            client,
            pending: Some(first),
            buffer: VecDeque::new(),
            yielded: 0,
            limit,
        }
    }

    /// Pulls the next item, fetching a new page only when the buffer is dry
    ///
    /// # Returns
    ///
    /// * `Ok(Some(item))` - The next item in result-set order
    /// * `Ok(None)` - The result set is exhausted or the item cap is reached
    /// * `Err(SweepError)` - A page fetch failed
    pub async fn next(&mut self) -> Result<Option<StacItem>> {
        loop {
            if let Some(cap) = self.limit {
                if self.yielded >= cap {
                    self.pending = None;
                    self.buffer.clear();
                    return Ok(None);
                }
            }

            if let Some(item) = self.buffer.pop_front() {
                self.yielded += 1;
                tracing::trace!("Yielding item {}: {}", self.yielded, item.id);
                return Ok(Some(item));
            }

            let Some(request) = self.pending.take() else {
                tracing::debug!("Lazy search complete: yielded {} items", self.yielded);
                return Ok(None);
            };

            let page = self.client.fetch_page(&request).await?;

            // An empty page ends the stream even if the server advertises
            // another link; following it could loop forever.
            if page.features.is_empty() {
                return Ok(None);
            }

            self.pending = CatalogClient::next_request(&page);
            self.buffer.extend(page.features);
        }
    }

    /// Number of items pulled from this stream so far
    pub fn yielded(&self) -> usize {
        self.yielded
    }

    /// Drains the stream into a realized vector
    pub async fn collect(mut self) -> Result<Vec<StacItem>> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await? {
            items.push(item);
        }
        Ok(items)
    }
}

// Page-fetch behavior is covered by the wiremock integration tests, which
// assert that partially consumed streams never request later pages.
