//! Game Center leaderboard set model and membership operations.

use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::AscClient;
use crate::error::Result;
use crate::pagination::Envelope;
use crate::query::ListQuery;
use crate::resource::{RelationshipBatch, Resource, ResourceKind};
use crate::traits::{Get, List};

/// Attributes of a Game Center leaderboard set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameCenterLeaderboardSetAttributes {
    #[serde(default)]
    pub reference_name: String,
    #[serde(default)]
    pub vendor_identifier: String,
}

/// A Game Center leaderboard set resource.
pub type GameCenterLeaderboardSet = Resource<GameCenterLeaderboardSetAttributes>;

impl GameCenterLeaderboardSet {
    /// Add leaderboards to a set.
    ///
    /// Blank or whitespace-only ids are dropped before transmission; the
    /// order of the rest is preserved.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn add_leaderboards<I, S>(client: &AscClient, set_id: &str, ids: I) -> Result<()>
    where
        I: IntoIterator<Item = S> + Send,
        S: AsRef<str>,
    {
        let batch = RelationshipBatch::new(ResourceKind::GameCenterLeaderboards, ids);
        let path = Self::membership_path(set_id);
        client.modify_relationships(Method::POST, &path, &batch).await
    }

    /// Remove leaderboards from a set.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn remove_leaderboards<I, S>(client: &AscClient, set_id: &str, ids: I) -> Result<()>
    where
        I: IntoIterator<Item = S> + Send,
        S: AsRef<str>,
    {
        let batch = RelationshipBatch::new(ResourceKind::GameCenterLeaderboards, ids);
        let path = Self::membership_path(set_id);
        client
            .modify_relationships(Method::DELETE, &path, &batch)
            .await
    }

    fn membership_path(set_id: &str) -> String {
        format!(
            "/v1/gameCenterLeaderboardSets/{}/relationships/gameCenterLeaderboards",
            set_id.trim()
        )
    }
}

#[async_trait]
impl List for GameCenterLeaderboardSet {
    async fn list_page(
        client: &AscClient,
        parent: &str,
        query: &ListQuery,
    ) -> Result<Envelope<Self>> {
        let path = format!(
            "/v1/gameCenterDetails/{}/gameCenterLeaderboardSets",
            parent.trim()
        );
        client.get_list(&path, query).await
    }
}

#[async_trait]
impl Get for GameCenterLeaderboardSet {
    async fn get(client: &AscClient, id: &str) -> Result<Self> {
        let path = format!("/v1/gameCenterLeaderboardSets/{}", id.trim());
        Ok(client.get_single(&path).await?.data)
    }
}
