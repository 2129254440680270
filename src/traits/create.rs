//! Create trait for adding new resources.

use async_trait::async_trait;

use crate::client::AscClient;
use crate::error::Result;

/// Create a new resource under an owning parent.
///
/// # Example
///
/// ```ignore
/// use ascapi::{AscClient, Create, GameCenterAchievement, GameCenterAchievementCreateParams};
///
/// let client = AscClient::from_env()?;
/// let achievement = GameCenterAchievement::create(
///     &client,
///     "gc-detail-1",
///     GameCenterAchievementCreateParams {
///         reference_name: "First Win".to_string(),
///         vendor_identifier: "grp.first-win".to_string(),
///         ..Default::default()
///     },
/// ).await?;
/// ```
#[async_trait]
pub trait Create: Sized {
    /// Attributes for the new resource.
    type Params: Send + Sync;

    /// Create the resource and return the server's view of it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn create(client: &AscClient, parent: &str, params: Self::Params) -> Result<Self>;
}
