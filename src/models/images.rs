//! Image asset models: the binary assets attached to achievement and
//! leaderboard localizations, uploaded through the shared pipeline.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::AscClient;
use crate::error::Result;
use crate::resource::{Resource, ResourceKind};
use crate::traits::{Delete, Get};
use crate::upload::{
    upload_asset, AssetDeliveryState, AssetUploadResult, ImagePolicy, UploadAsset,
    UploadOperation, UploadPolicy,
};

/// A processed image rendition the server makes available.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAsset {
    #[serde(default)]
    pub template_url: String,
    #[serde(default)]
    pub width: i32,
    #[serde(default)]
    pub height: i32,
}

/// Attributes shared by Game Center image assets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameCenterImageAttributes {
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub file_size: Option<i64>,
    #[serde(default)]
    pub image_asset: Option<ImageAsset>,
    /// Byte-range transfer instructions; present only on a fresh
    /// reservation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub upload_operations: Vec<UploadOperation>,
    #[serde(default)]
    pub asset_delivery_state: Option<AssetDeliveryState>,
}

/// An achievement image resource, owned by an achievement localization.
pub type GameCenterAchievementImage = Resource<GameCenterImageAttributes>;

impl UploadAsset for GameCenterAchievementImage {
    fn kind() -> ResourceKind {
        ResourceKind::GameCenterAchievementImages
    }

    fn owner_kind() -> ResourceKind {
        ResourceKind::GameCenterAchievementLocalizations
    }

    fn owner_relationship() -> &'static str {
        "gameCenterAchievementLocalization"
    }

    fn collection_path() -> &'static str {
        "/v1/gameCenterAchievementImages"
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn file_name(&self) -> Option<&str> {
        self.attributes.file_name.as_deref()
    }

    fn file_size(&self) -> Option<i64> {
        self.attributes.file_size
    }

    fn upload_operations(&self) -> &[UploadOperation] {
        &self.attributes.upload_operations
    }

    fn delivery_state(&self) -> Option<&AssetDeliveryState> {
        self.attributes.asset_delivery_state.as_ref()
    }
}

impl GameCenterAchievementImage {
    /// Run the full upload pipeline for an achievement image: validate,
    /// reserve under `localization_id`, transfer, commit, and report the
    /// delivery state.
    ///
    /// # Errors
    ///
    /// See [`upload_asset`] for the per-phase failure semantics.
    pub async fn upload(
        client: &AscClient,
        localization_id: &str,
        file_path: &std::path::Path,
    ) -> Result<AssetUploadResult> {
        upload_asset::<Self>(client, localization_id, file_path, &ImagePolicy::default()).await
    }

    /// Same as [`Self::upload`] with a caller-supplied file policy.
    pub async fn upload_with_policy(
        client: &AscClient,
        localization_id: &str,
        file_path: &std::path::Path,
        policy: &dyn UploadPolicy,
    ) -> Result<AssetUploadResult> {
        upload_asset::<Self>(client, localization_id, file_path, policy).await
    }
}

#[async_trait]
impl Get for GameCenterAchievementImage {
    async fn get(client: &AscClient, id: &str) -> Result<Self> {
        Ok(client.get_single(&Self::resource_path(id)).await?.data)
    }
}

#[async_trait]
impl Delete for GameCenterAchievementImage {
    async fn delete(client: &AscClient, id: &str) -> Result<()> {
        client.delete(&Self::resource_path(id)).await
    }
}

/// A leaderboard image resource, owned by a leaderboard localization.
///
/// Same attribute shape and pipeline as achievement images; only the
/// endpoints and owning relationship differ.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameCenterLeaderboardImage(pub Resource<GameCenterImageAttributes>);

impl UploadAsset for GameCenterLeaderboardImage {
    fn kind() -> ResourceKind {
        ResourceKind::GameCenterLeaderboardImages
    }

    fn owner_kind() -> ResourceKind {
        ResourceKind::GameCenterLeaderboardLocalizations
    }

    fn owner_relationship() -> &'static str {
        "gameCenterLeaderboardLocalization"
    }

    fn collection_path() -> &'static str {
        "/v1/gameCenterLeaderboardImages"
    }

    fn id(&self) -> &str {
        &self.0.id
    }

    fn file_name(&self) -> Option<&str> {
        self.0.attributes.file_name.as_deref()
    }

    fn file_size(&self) -> Option<i64> {
        self.0.attributes.file_size
    }

    fn upload_operations(&self) -> &[UploadOperation] {
        &self.0.attributes.upload_operations
    }

    fn delivery_state(&self) -> Option<&AssetDeliveryState> {
        self.0.attributes.asset_delivery_state.as_ref()
    }
}

impl GameCenterLeaderboardImage {
    /// Run the full upload pipeline for a leaderboard image.
    ///
    /// # Errors
    ///
    /// See [`upload_asset`] for the per-phase failure semantics.
    pub async fn upload(
        client: &AscClient,
        localization_id: &str,
        file_path: &std::path::Path,
    ) -> Result<AssetUploadResult> {
        upload_asset::<Self>(client, localization_id, file_path, &ImagePolicy::default()).await
    }
}

#[async_trait]
impl Get for GameCenterLeaderboardImage {
    async fn get(client: &AscClient, id: &str) -> Result<Self> {
        Ok(client.get_single(&Self::resource_path(id)).await?.data)
    }
}

#[async_trait]
impl Delete for GameCenterLeaderboardImage {
    async fn delete(client: &AscClient, id: &str) -> Result<()> {
        client.delete(&Self::resource_path(id)).await
    }
}
