//! App Store Connect Game Center API client library.
//!
//! A Rust library for the App Store Connect API's Game Center domain,
//! using a trait-based architecture where each operation (Get, List,
//! Create, Update, Delete) is defined as a trait that resource types
//! implement. Two pieces of machinery are shared by every resource:
//!
//! - a generic paginated access layer ([`Envelope`], [`ListQuery`], and
//!   cursor-following `list_all`) with a safety gate on server-supplied
//!   next-page URLs, and
//! - a multi-phase asset upload pipeline ([`upload_asset`]) that
//!   reserves, transfers, and commits binary assets.
//!
//! # Quick Start
//!
//! ```no_run
//! use ascapi::{AscClient, GameCenterAchievement, GameCenterDetail, List, ListQuery};
//!
//! #[tokio::main]
//! async fn main() -> ascapi::Result<()> {
//!     // Create client from environment variables
//!     let client = AscClient::from_env()?;
//!
//!     // Resolve the Game Center detail for an app
//!     let detail = GameCenterDetail::for_app(&client, "12345").await?;
//!
//!     // List all achievements, following pagination cursors
//!     let achievements =
//!         GameCenterAchievement::list_all(&client, &detail.id, ListQuery::new()).await?;
//!     println!("Found {} achievements", achievements.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Uploading assets
//!
//! ```no_run
//! use std::path::Path;
//! use ascapi::{AscClient, GameCenterAchievementImage};
//!
//! # async fn example() -> ascapi::Result<()> {
//! let client = AscClient::from_env()?;
//! let result =
//!     GameCenterAchievementImage::upload(&client, "loc-1", Path::new("icon.png")).await?;
//! println!("uploaded {} ({:?})", result.id, result.asset_delivery_state);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `ASC_BEARER_TOKEN` (required) - bearer token for the API
//! - `ASC_API_URL` (optional) - base URL (defaults to
//!   `https://api.appstoreconnect.apple.com`)

mod client;
mod error;
mod models;
mod pagination;
mod query;
mod resource;
mod traits;
mod upload;

// Re-export core types
pub use client::AscClient;
pub use error::{AscError, Result};
pub use pagination::{validate_next_url, Envelope, Links, SingleEnvelope};
pub use query::{normalize_ids, ListQuery};
pub use resource::{
    CreateRequest, Relationship, RelationshipBatch, RelationshipRef, Resource, ResourceKind,
    UpdateRequest,
};
pub use upload::{
    execute_upload_operations, upload_asset, AssetDeliveryError, AssetDeliveryState,
    AssetUploadResult, HttpHeader, ImagePolicy, UploadAsset, UploadOperation, UploadPolicy,
};

// Re-export traits
pub use traits::{Create, Delete, Get, List, Update};

// Re-export models
pub use models::{
    GameCenterAchievement,
    GameCenterAchievementAttributes,
    GameCenterAchievementCreateParams,
    GameCenterAchievementImage,
    GameCenterAchievementLocalization,
    GameCenterAchievementLocalizationAttributes,
    GameCenterAchievementLocalizationCreateParams,
    GameCenterAchievementUpdateParams,
    GameCenterDetail,
    GameCenterDetailAttributes,
    GameCenterImageAttributes,
    GameCenterLeaderboard,
    GameCenterLeaderboardAttributes,
    GameCenterLeaderboardCreateParams,
    GameCenterLeaderboardImage,
    GameCenterLeaderboardSet,
    GameCenterLeaderboardSetAttributes,
    GameCenterLeaderboardUpdateParams,
    ImageAsset,
    VALID_LEADERBOARD_FORMATTERS,
    VALID_SCORE_SORT_TYPES,
    VALID_SUBMISSION_TYPES,
};
