//! Resource primitives shared by every endpoint: typed resource kinds,
//! the generic resource shape, relationship references, and the JSON:API
//! style request body wrappers.

use serde::{Deserialize, Serialize};

use crate::query::normalize_ids;

/// Resource type discriminators used on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceKind {
    #[serde(rename = "apps")]
    Apps,
    #[serde(rename = "gameCenterDetails")]
    GameCenterDetails,
    #[serde(rename = "gameCenterGroups")]
    GameCenterGroups,
    #[serde(rename = "gameCenterAchievements")]
    GameCenterAchievements,
    #[serde(rename = "gameCenterAchievementLocalizations")]
    GameCenterAchievementLocalizations,
    #[serde(rename = "gameCenterAchievementImages")]
    GameCenterAchievementImages,
    #[serde(rename = "gameCenterLeaderboards")]
    GameCenterLeaderboards,
    #[serde(rename = "gameCenterLeaderboardLocalizations")]
    GameCenterLeaderboardLocalizations,
    #[serde(rename = "gameCenterLeaderboardImages")]
    GameCenterLeaderboardImages,
    #[serde(rename = "gameCenterLeaderboardSets")]
    GameCenterLeaderboardSets,
}

/// A decoded resource: type discriminator, server-assigned id, and typed
/// attributes. Model modules alias this with their attribute structs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource<A> {
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub id: String,
    #[serde(default)]
    pub attributes: A,
}

/// A reference to another resource by type and id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipRef {
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub id: String,
}

/// A to-one relationship in a request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    pub data: RelationshipRef,
}

impl Relationship {
    /// Build a to-one relationship to the given resource.
    #[must_use]
    pub fn to(kind: ResourceKind, id: &str) -> Self {
        Self {
            data: RelationshipRef {
                kind,
                id: id.trim().to_string(),
            },
        }
    }
}

/// An ordered batch of relationship references (`{data: [{type,id},…]}`),
/// used by relationship add/remove endpoints.
///
/// Construction trims ids and drops blank or whitespace-only entries; the
/// order of surviving ids is preserved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationshipBatch {
    pub data: Vec<RelationshipRef>,
}

impl RelationshipBatch {
    /// Build a batch of refs of one kind from raw id strings.
    #[must_use]
    pub fn new<I, S>(kind: ResourceKind, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            data: normalize_ids(ids)
                .into_iter()
                .map(|id| RelationshipRef { kind, id })
                .collect(),
        }
    }

    /// Returns true when no usable ids survived filtering.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Create request body: `{data: {type, attributes?, relationships?}}`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateRequest<A: Serialize, R: Serialize> {
    pub data: CreateData<A, R>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateData<A: Serialize, R: Serialize> {
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<A>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationships: Option<R>,
}

impl<A: Serialize, R: Serialize> CreateRequest<A, R> {
    #[must_use]
    pub fn new(kind: ResourceKind, attributes: Option<A>, relationships: Option<R>) -> Self {
        Self {
            data: CreateData {
                kind,
                attributes,
                relationships,
            },
        }
    }
}

/// Update request body: `{data: {type, id, attributes?}}`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateRequest<A: Serialize> {
    pub data: UpdateData<A>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateData<A: Serialize> {
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<A>,
}

impl<A: Serialize> UpdateRequest<A> {
    #[must_use]
    pub fn new(kind: ResourceKind, id: &str, attributes: Option<A>) -> Self {
        Self {
            data: UpdateData {
                kind,
                id: id.trim().to_string(),
                attributes,
            },
        }
    }
}
