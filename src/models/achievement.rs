//! Game Center achievement model and trait implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::AscClient;
use crate::error::Result;
use crate::pagination::Envelope;
use crate::query::ListQuery;
use crate::resource::{
    CreateRequest, Relationship, Resource, ResourceKind, UpdateRequest,
};
use crate::traits::{Create, Delete, Get, List, Update};

/// Attributes of a Game Center achievement.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameCenterAchievementAttributes {
    /// Internal name shown in App Store Connect.
    #[serde(default)]
    pub reference_name: String,
    /// Developer-chosen identifier, unique within the app.
    #[serde(default)]
    pub vendor_identifier: String,
    /// Points the achievement is worth (0–100).
    #[serde(default)]
    pub points: Option<i64>,
    #[serde(default)]
    pub show_before_earned: bool,
    #[serde(default)]
    pub repeatable: bool,
    #[serde(default)]
    pub archived: bool,
}

/// A Game Center achievement resource.
pub type GameCenterAchievement = Resource<GameCenterAchievementAttributes>;

/// Attributes for creating an achievement.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameCenterAchievementCreateParams {
    pub reference_name: String,
    pub vendor_identifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_before_earned: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeatable: Option<bool>,
}

/// Attributes for updating an achievement; unset fields are unchanged.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameCenterAchievementUpdateParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_before_earned: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeatable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AchievementRelationships {
    game_center_detail: Relationship,
}

#[async_trait]
impl List for GameCenterAchievement {
    async fn list_page(
        client: &AscClient,
        parent: &str,
        query: &ListQuery,
    ) -> Result<Envelope<Self>> {
        let path = format!(
            "/v1/gameCenterDetails/{}/gameCenterAchievements",
            parent.trim()
        );
        client.get_list(&path, query).await
    }
}

#[async_trait]
impl Get for GameCenterAchievement {
    async fn get(client: &AscClient, id: &str) -> Result<Self> {
        let path = format!("/v2/gameCenterAchievements/{}", id.trim());
        Ok(client.get_single(&path).await?.data)
    }
}

#[async_trait]
impl Create for GameCenterAchievement {
    type Params = GameCenterAchievementCreateParams;

    async fn create(client: &AscClient, parent: &str, params: Self::Params) -> Result<Self> {
        let body = CreateRequest::new(
            ResourceKind::GameCenterAchievements,
            Some(params),
            Some(AchievementRelationships {
                game_center_detail: Relationship::to(ResourceKind::GameCenterDetails, parent),
            }),
        );
        Ok(client
            .post_single("/v2/gameCenterAchievements", &body)
            .await?
            .data)
    }
}

#[async_trait]
impl Update for GameCenterAchievement {
    type Params = GameCenterAchievementUpdateParams;

    async fn update(client: &AscClient, id: &str, params: Self::Params) -> Result<Self> {
        let body = UpdateRequest::new(ResourceKind::GameCenterAchievements, id, Some(params));
        let path = format!("/v2/gameCenterAchievements/{}", id.trim());
        Ok(client.patch_single(&path, &body).await?.data)
    }
}

#[async_trait]
impl Delete for GameCenterAchievement {
    async fn delete(client: &AscClient, id: &str) -> Result<()> {
        let path = format!("/v2/gameCenterAchievements/{}", id.trim());
        client.delete(&path).await
    }
}

/// Attributes of an achievement localization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameCenterAchievementLocalizationAttributes {
    #[serde(default)]
    pub locale: String,
    #[serde(default)]
    pub name: String,
    /// Hint text shown before the achievement is earned.
    #[serde(default)]
    pub before_earned_description: String,
    /// Text shown after the achievement is earned.
    #[serde(default)]
    pub after_earned_description: String,
}

/// An achievement localization resource.
pub type GameCenterAchievementLocalization = Resource<GameCenterAchievementLocalizationAttributes>;

/// Attributes for creating an achievement localization.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameCenterAchievementLocalizationCreateParams {
    pub locale: String,
    pub name: String,
    pub before_earned_description: String,
    pub after_earned_description: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AchievementLocalizationRelationships {
    game_center_achievement: Relationship,
}

#[async_trait]
impl List for GameCenterAchievementLocalization {
    async fn list_page(
        client: &AscClient,
        parent: &str,
        query: &ListQuery,
    ) -> Result<Envelope<Self>> {
        let path = format!("/v2/gameCenterAchievements/{}/localizations", parent.trim());
        client.get_list(&path, query).await
    }
}

#[async_trait]
impl Create for GameCenterAchievementLocalization {
    type Params = GameCenterAchievementLocalizationCreateParams;

    async fn create(client: &AscClient, parent: &str, params: Self::Params) -> Result<Self> {
        let body = CreateRequest::new(
            ResourceKind::GameCenterAchievementLocalizations,
            Some(params),
            Some(AchievementLocalizationRelationships {
                game_center_achievement: Relationship::to(
                    ResourceKind::GameCenterAchievements,
                    parent,
                ),
            }),
        );
        Ok(client
            .post_single("/v1/gameCenterAchievementLocalizations", &body)
            .await?
            .data)
    }
}

#[async_trait]
impl Delete for GameCenterAchievementLocalization {
    async fn delete(client: &AscClient, id: &str) -> Result<()> {
        let path = format!("/v1/gameCenterAchievementLocalizations/{}", id.trim());
        client.delete(&path).await
    }
}
