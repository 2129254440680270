//! Game Center detail model: the per-app root of the Game Center domain.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::AscClient;
use crate::error::Result;
use crate::resource::Resource;
use crate::traits::Get;

/// Attributes of a Game Center detail resource.
///
/// Flags describing which Game Center features are enabled for the app.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameCenterDetailAttributes {
    #[serde(default)]
    pub arcade_enabled: bool,
    #[serde(default)]
    pub challenge_enabled: bool,
    #[serde(default)]
    pub achievement_enabled: bool,
    #[serde(default)]
    pub leaderboard_enabled: bool,
    #[serde(default)]
    pub leaderboard_set_enabled: bool,
    #[serde(default)]
    pub multiplayer_session_enabled: bool,
    #[serde(default)]
    pub multiplayer_turn_based_session_enabled: bool,
}

/// A Game Center detail resource.
///
/// Achievements, leaderboards, and leaderboard sets all hang off this
/// resource, so most workflows start by resolving it for an app.
pub type GameCenterDetail = Resource<GameCenterDetailAttributes>;

impl GameCenterDetail {
    /// Fetch the Game Center detail for an app.
    ///
    /// # Errors
    ///
    /// Returns an error if the app has no Game Center detail or the
    /// request fails.
    pub async fn for_app(client: &AscClient, app_id: &str) -> Result<Self> {
        let path = format!("/v1/apps/{}/gameCenterDetail", app_id.trim());
        Ok(client.get_single(&path).await?.data)
    }
}

#[async_trait]
impl Get for GameCenterDetail {
    async fn get(client: &AscClient, id: &str) -> Result<Self> {
        let path = format!("/v1/gameCenterDetails/{}", id.trim());
        Ok(client.get_single(&path).await?.data)
    }
}
