//! Update trait for modifying resources.

use async_trait::async_trait;

use crate::client::AscClient;
use crate::error::Result;

/// Update an existing resource.
///
/// # Example
///
/// ```ignore
/// use ascapi::{AscClient, GameCenterAchievement, GameCenterAchievementUpdateParams, Update};
///
/// let client = AscClient::from_env()?;
/// let updated = GameCenterAchievement::update(
///     &client,
///     "ach-1",
///     GameCenterAchievementUpdateParams {
///         archived: Some(true),
///         ..Default::default()
///     },
/// ).await?;
/// ```
#[async_trait]
pub trait Update: Sized {
    /// Parameters for the update; unset fields are left unchanged.
    type Params: Send + Sync;

    /// Update the resource and return the updated version.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource is not found or the request fails.
    async fn update(client: &AscClient, id: &str, params: Self::Params) -> Result<Self>;
}
