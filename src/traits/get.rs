//! Get trait for fetching single resources.

use async_trait::async_trait;

use crate::client::AscClient;
use crate::error::Result;

/// Fetch a single resource by ID.
///
/// # Example
///
/// ```ignore
/// use ascapi::{AscClient, GameCenterAchievement, Get};
///
/// let client = AscClient::from_env()?;
/// let achievement = GameCenterAchievement::get(&client, "ach-1").await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    /// Fetch the resource by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource is not found or the request fails.
    async fn get(client: &AscClient, id: &str) -> Result<Self>;
}
