//! List trait for fetching paginated collections of resources.

use async_trait::async_trait;

use crate::client::AscClient;
use crate::error::Result;
use crate::pagination::{Envelope, MAX_PAGES};
use crate::query::ListQuery;

/// List resources with cursor-following pagination support.
///
/// `list_page` fetches one page; the provided `list_all` follows the
/// server-issued `links.next` cursors until exhausted. Every cursor passes
/// the next-URL guard before it is dispatched with credentials attached.
///
/// # Example
///
/// ```ignore
/// use ascapi::{AscClient, GameCenterAchievement, List, ListQuery};
///
/// let client = AscClient::from_env()?;
///
/// // Fetch a single page
/// let page = GameCenterAchievement::list_page(&client, "gc-detail-1", &ListQuery::new()).await?;
///
/// // Fetch all pages
/// let all = GameCenterAchievement::list_all(&client, "gc-detail-1", ListQuery::new()).await?;
/// ```
#[async_trait]
pub trait List: Sized + Send {
    /// List resources in the collection scoped by `parent` (single page).
    ///
    /// A `next_url` on the query replaces path and query construction.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or a supplied next-page URL
    /// is rejected by the guard.
    async fn list_page(
        client: &AscClient,
        parent: &str,
        query: &ListQuery,
    ) -> Result<Envelope<Self>>;

    /// List all resources matching the query, following cursors.
    ///
    /// Fetches page after page until `links.next` is absent. No page is
    /// fetched twice and items are not deduplicated; the server owns
    /// uniqueness and ordering.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails or a cursor is rejected.
    async fn list_all(client: &AscClient, parent: &str, query: ListQuery) -> Result<Vec<Self>> {
        let mut page = Self::list_page(client, parent, &query).await?;
        let mut items = std::mem::take(&mut page.data);
        let mut pages = 1u32;

        while let Some(next) = page.next_link().map(str::to_string) {
            // Safety limit to prevent a looping server from pinning us
            if pages >= MAX_PAGES {
                tracing::warn!("reached pagination limit of {} pages, stopping", MAX_PAGES);
                break;
            }

            // The cursor is validated inside get_list before dispatch
            page = Self::list_page(client, parent, &ListQuery::new().next_url(&next)).await?;
            items.extend(std::mem::take(&mut page.data));
            pages += 1;
        }

        Ok(items)
    }
}
