//! Paginated, filterable directory queries.

use crate::client::AdminApiClient;
use crate::error::DirectoryError;
use crate::record::DirectoryRecord;
use crate::search::{UserFilter, filter_records};
use crate::summary::{UserSummary, to_summary};
use chrono::Utc;
use rootcause::prelude::Report;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Hard ceiling on upstream page fetches when filtering in memory.
/// Reaching it yields a partial result instead of an unbounded loop.
const MAX_FILTER_PAGES: u32 = 50;

/// Upstream per-page cap for bounded full fetches.
const FETCH_ALL_MAX_PER_PAGE: u32 = 100;

/// Batch size for unfiltered counting.
const COUNT_PAGE_SIZE: u32 = 200;

/// Safety cap on unfiltered counts; the provider has no direct count.
const COUNT_SAFETY_CAP: u64 = 50_000;

/// Largest per-page size accepted from callers.
pub const MAX_PER_PAGE: u32 = 200;

/// One page of directory results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryPage {
    /// The users on this page.
    pub users: Vec<UserSummary>,
    /// The page that was served (1-based).
    pub page: u32,
    /// The page size that was served.
    pub per_page: u32,
    /// The next page, when more results are (or may be) available.
    pub next_page: Option<u32>,
    /// Total matching records. Exact for filtered queries; for
    /// unfiltered queries only present when the provider reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

/// Paginated, filterable view over the provider's user listing.
///
/// The provider supports pagination but no search or status filter, so
/// filtered queries fetch every page (bounded) and filter in memory;
/// unfiltered queries trust the provider's pagination.
#[derive(Debug, Clone)]
pub struct DirectoryQuery {
    client: AdminApiClient,
}

impl DirectoryQuery {
    /// Creates a query layer over the admin API client.
    #[must_use]
    pub fn new(client: AdminApiClient) -> Self {
        Self { client }
    }

    /// Lists one page of users matching the filter.
    ///
    /// # Errors
    ///
    /// Propagates admin-API failures; a failure is never folded into an
    /// empty page.
    pub async fn list(
        &self,
        page: u32,
        per_page: u32,
        filter: &UserFilter,
    ) -> Result<DirectoryPage, Report<DirectoryError>> {
        let page = page.max(1);
        let per_page = per_page.clamp(1, MAX_PER_PAGE);

        if filter.is_empty() {
            return self.list_passthrough(page, per_page).await;
        }

        self.list_filtered(page, per_page, filter).await
    }

    /// Counts users matching the filter.
    ///
    /// Filtered counts are exact over the bounded full fetch.
    /// Unfiltered counts page through the provider in large batches and
    /// stop at a safety cap, so a very large directory reports a floor
    /// rather than an exact total.
    ///
    /// # Errors
    ///
    /// Propagates admin-API failures.
    pub async fn count(&self, filter: &UserFilter) -> Result<u64, Report<DirectoryError>> {
        if !filter.is_empty() {
            let records = self.fetch_all(FETCH_ALL_MAX_PER_PAGE).await?;
            return Ok(filter_records(records, filter, Utc::now()).len() as u64);
        }

        let mut total: u64 = 0;
        let mut page: u32 = 1;

        loop {
            let batch = self.client.list_page(page, COUNT_PAGE_SIZE).await?;
            let fetched = batch.users.len() as u64;
            total += fetched;

            if fetched < u64::from(COUNT_PAGE_SIZE) {
                break;
            }

            page += 1;
            if u64::from(page) * u64::from(COUNT_PAGE_SIZE) > COUNT_SAFETY_CAP {
                warn!(total, "user count reached the safety cap; reporting a floor");
                break;
            }
        }

        Ok(total)
    }

    async fn list_passthrough(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<DirectoryPage, Report<DirectoryError>> {
        let now = Utc::now();
        let upstream = self.client.list_page(page, per_page).await?;

        let next_page = (upstream.users.len() as u32 == per_page).then(|| page + 1);
        let users = upstream
            .users
            .iter()
            .map(|record| to_summary(record, now))
            .collect();

        Ok(DirectoryPage {
            users,
            page,
            per_page,
            next_page,
            total: upstream.total,
        })
    }

    async fn list_filtered(
        &self,
        page: u32,
        per_page: u32,
        filter: &UserFilter,
    ) -> Result<DirectoryPage, Report<DirectoryError>> {
        let now = Utc::now();
        let records = self.fetch_all(per_page).await?;
        let matching = filter_records(records, filter, now);

        let total = matching.len() as u64;
        let start = (page as usize - 1).saturating_mul(per_page as usize);
        let users: Vec<UserSummary> = matching
            .iter()
            .skip(start)
            .take(per_page as usize)
            .map(|record| to_summary(record, now))
            .collect();

        let next_page = (start + (per_page as usize) < matching.len()).then(|| page + 1);

        Ok(DirectoryPage {
            users,
            page,
            per_page,
            next_page,
            total: Some(total),
        })
    }

    /// Fetches every page of the bulk listing, bounded by
    /// [`MAX_FILTER_PAGES`].
    async fn fetch_all(
        &self,
        per_page: u32,
    ) -> Result<Vec<DirectoryRecord>, Report<DirectoryError>> {
        let per_page = per_page.clamp(1, FETCH_ALL_MAX_PER_PAGE);
        let mut all = Vec::new();
        let mut page: u32 = 1;

        for _ in 0..MAX_FILTER_PAGES {
            let batch = self.client.list_page(page, per_page).await?;
            let fetched = batch.users.len() as u32;
            all.extend(batch.users);

            if fetched < per_page {
                return Ok(all);
            }
            page += 1;
        }

        warn!(
            pages = MAX_FILTER_PAGES,
            records = all.len(),
            "bulk fetch hit the page ceiling; filtered results may be partial"
        );
        Ok(all)
    }
}
