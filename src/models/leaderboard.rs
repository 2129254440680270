//! Game Center leaderboard model and trait implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::AscClient;
use crate::error::Result;
use crate::pagination::Envelope;
use crate::query::ListQuery;
use crate::resource::{
    CreateRequest, Relationship, Resource, ResourceKind, UpdateRequest,
};
use crate::traits::{Create, Delete, Get, List, Update};

/// Valid leaderboard score formatters.
pub const VALID_LEADERBOARD_FORMATTERS: &[&str] = &[
    "INTEGER",
    "DECIMAL_POINT_1_PLACE",
    "DECIMAL_POINT_2_PLACE",
    "DECIMAL_POINT_3_PLACE",
    "ELAPSED_TIME_MILLISECOND",
    "ELAPSED_TIME_SECOND",
    "ELAPSED_TIME_MINUTE",
    "MONEY_WHOLE",
    "MONEY_POINT_2_PLACE",
];

/// Valid leaderboard score sort types.
pub const VALID_SCORE_SORT_TYPES: &[&str] = &["ASC", "DESC"];

/// Valid leaderboard submission types.
pub const VALID_SUBMISSION_TYPES: &[&str] = &["BEST_SCORE", "MOST_RECENT_SCORE"];

/// Attributes of a Game Center leaderboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameCenterLeaderboardAttributes {
    #[serde(default)]
    pub reference_name: String,
    #[serde(default)]
    pub vendor_identifier: String,
    /// Score display format, one of [`VALID_LEADERBOARD_FORMATTERS`].
    #[serde(default)]
    pub default_formatter: Option<String>,
    #[serde(default)]
    pub score_sort_type: Option<String>,
    #[serde(default)]
    pub submission_type: Option<String>,
    #[serde(default)]
    pub score_range_start: Option<String>,
    #[serde(default)]
    pub score_range_end: Option<String>,
    /// First occurrence of a recurring leaderboard.
    #[serde(default)]
    pub recurrence_start_date: Option<DateTime<Utc>>,
    /// ISO 8601 duration of each occurrence, e.g. `PT72H`.
    #[serde(default)]
    pub recurrence_duration: Option<String>,
    /// RFC 5545 recurrence rule, e.g. `FREQ=WEEKLY;INTERVAL=1`.
    #[serde(default)]
    pub recurrence_rule: Option<String>,
    #[serde(default)]
    pub archived: bool,
}

/// A Game Center leaderboard resource.
pub type GameCenterLeaderboard = Resource<GameCenterLeaderboardAttributes>;

/// Attributes for creating a leaderboard.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameCenterLeaderboardCreateParams {
    pub reference_name: String,
    pub vendor_identifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_formatter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_sort_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_range_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_range_end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence_start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence_duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence_rule: Option<String>,
}

/// Attributes for updating a leaderboard; unset fields are unchanged.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameCenterLeaderboardUpdateParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_formatter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_sort_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_range_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_range_end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence_start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence_duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence_rule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LeaderboardRelationships {
    game_center_detail: Relationship,
}

#[async_trait]
impl List for GameCenterLeaderboard {
    async fn list_page(
        client: &AscClient,
        parent: &str,
        query: &ListQuery,
    ) -> Result<Envelope<Self>> {
        let path = format!(
            "/v1/gameCenterDetails/{}/gameCenterLeaderboards",
            parent.trim()
        );
        client.get_list(&path, query).await
    }
}

#[async_trait]
impl Get for GameCenterLeaderboard {
    async fn get(client: &AscClient, id: &str) -> Result<Self> {
        let path = format!("/v2/gameCenterLeaderboards/{}", id.trim());
        Ok(client.get_single(&path).await?.data)
    }
}

#[async_trait]
impl Create for GameCenterLeaderboard {
    type Params = GameCenterLeaderboardCreateParams;

    async fn create(client: &AscClient, parent: &str, params: Self::Params) -> Result<Self> {
        let body = CreateRequest::new(
            ResourceKind::GameCenterLeaderboards,
            Some(params),
            Some(LeaderboardRelationships {
                game_center_detail: Relationship::to(ResourceKind::GameCenterDetails, parent),
            }),
        );
        Ok(client
            .post_single("/v2/gameCenterLeaderboards", &body)
            .await?
            .data)
    }
}

#[async_trait]
impl Update for GameCenterLeaderboard {
    type Params = GameCenterLeaderboardUpdateParams;

    async fn update(client: &AscClient, id: &str, params: Self::Params) -> Result<Self> {
        let body = UpdateRequest::new(ResourceKind::GameCenterLeaderboards, id, Some(params));
        let path = format!("/v2/gameCenterLeaderboards/{}", id.trim());
        Ok(client.patch_single(&path, &body).await?.data)
    }
}

#[async_trait]
impl Delete for GameCenterLeaderboard {
    async fn delete(client: &AscClient, id: &str) -> Result<()> {
        let path = format!("/v2/gameCenterLeaderboards/{}", id.trim());
        client.delete(&path).await
    }
}
