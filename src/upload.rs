//! Multi-phase asset upload pipeline.
//!
//! Every binary asset (achievement images, leaderboard images, and the
//! rest of the family) moves through the same states:
//!
//! `Validated → Reserved → Uploaded → Committed → {Complete | Failed}`
//!
//! The client reserves the asset (server assigns an id and a set of
//! byte-range upload operations), transfers each range to its pre-signed
//! URL, commits with `uploaded: true`, and reads the delivery state from
//! the commit response. Pre-signed URLs are self-authorizing: the bearer
//! token is never attached to transfer requests.
//!
//! No step is retried. A failure after reservation leaves a reserved or
//! uploaded-but-uncommitted asset on the server; the error identifies the
//! phase and reservation so the caller can delete it.

use std::path::Path;
use std::time::Duration;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncReadExt, AsyncSeekExt, SeekFrom};

use crate::client::AscClient;
use crate::error::{AscError, Result};
use crate::resource::{CreateRequest, Relationship, ResourceKind, UpdateRequest};

/// One byte-range transfer instruction from a reservation.
///
/// Across all operations for one asset, `[offset, offset+length)` ranges
/// are disjoint and their union spans exactly the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadOperation {
    /// HTTP verb to use, typically PUT.
    pub method: String,
    /// Pre-signed absolute URL; requires no credential.
    pub url: String,
    /// Number of bytes to send.
    pub length: u64,
    /// Byte offset into the local file.
    pub offset: u64,
    /// Headers the server requires on this transfer. These are the only
    /// headers attached besides what the HTTP client adds itself.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub request_headers: Vec<HttpHeader>,
}

/// A header name/value pair on an upload operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpHeader {
    pub name: String,
    pub value: String,
}

/// Server-reported processing status of an asset after commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetDeliveryState {
    /// State name; `COMPLETE` and `FAILED` are terminal, everything else
    /// is transient and requires a re-fetch of the resource.
    pub state: String,
    /// Populated only for failed assets.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<AssetDeliveryError>,
}

/// An error detail on a failed asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetDeliveryError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl AssetDeliveryState {
    pub const COMPLETE: &'static str = "COMPLETE";
    pub const FAILED: &'static str = "FAILED";

    /// Whether this state will never change again.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.state == Self::COMPLETE || self.state == Self::FAILED
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state == Self::COMPLETE
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.state == Self::FAILED
    }
}

/// Local file policy checked before any request is made.
pub trait UploadPolicy: Send + Sync {
    /// Validate the file about to be uploaded.
    ///
    /// # Errors
    ///
    /// Returns [`AscError::Validation`] when the file violates the policy.
    fn validate(&self, path: &Path, file_size: u64) -> Result<()>;
}

/// Policy for image assets: known extension, non-empty, bounded size.
#[derive(Debug, Clone)]
pub struct ImagePolicy {
    max_bytes: u64,
    extensions: &'static [&'static str],
}

impl Default for ImagePolicy {
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
            extensions: &["png", "jpg", "jpeg"],
        }
    }
}

impl UploadPolicy for ImagePolicy {
    fn validate(&self, path: &Path, file_size: u64) -> Result<()> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if !self.extensions.contains(&extension.as_str()) {
            return Err(AscError::Validation(format!(
                "unsupported image type '{}': expected one of {}",
                path.display(),
                self.extensions.join(", ")
            )));
        }
        if file_size == 0 {
            return Err(AscError::Validation(format!(
                "image file '{}' is empty",
                path.display()
            )));
        }
        if file_size > self.max_bytes {
            return Err(AscError::Validation(format!(
                "image file '{}' is {file_size} bytes, exceeding the {} byte limit",
                path.display(),
                self.max_bytes
            )));
        }
        Ok(())
    }
}

/// An asset resource type that supports the reserve/transfer/commit flow.
///
/// Implemented by each image/screenshot/preview resource; the pipeline in
/// [`upload_asset`] is identical for all of them.
pub trait UploadAsset: Sized + Send {
    /// Resource kind of the asset itself.
    fn kind() -> ResourceKind;
    /// Resource kind of the owning resource (typically a localization).
    fn owner_kind() -> ResourceKind;
    /// JSON name of the owning relationship in the reserve request.
    fn owner_relationship() -> &'static str;
    /// Collection path for reservations, e.g. `/v1/gameCenterAchievementImages`.
    fn collection_path() -> &'static str;
    /// Path of one asset resource.
    fn resource_path(id: &str) -> String {
        format!("{}/{}", Self::collection_path(), id.trim())
    }

    fn id(&self) -> &str;
    fn file_name(&self) -> Option<&str>;
    fn file_size(&self) -> Option<i64>;
    fn upload_operations(&self) -> &[UploadOperation];
    fn delivery_state(&self) -> Option<&AssetDeliveryState>;
}

/// Outcome of a completed upload pipeline run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetUploadResult {
    /// Server-assigned asset id.
    pub id: String,
    /// Id of the owning resource the asset was attached to.
    pub owner_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<i64>,
    pub uploaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_delivery_state: Option<AssetDeliveryState>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReserveAttributes {
    file_name: String,
    file_size: i64,
}

#[derive(Debug, Serialize)]
struct CommitAttributes {
    uploaded: bool,
}

/// Run the full upload pipeline for one asset.
///
/// Validates the local file against `policy`, reserves the asset under
/// `owner_id`, transfers every byte range, commits with `uploaded: true`,
/// and returns the committed asset's summary including its delivery state
/// when the commit response carries one. Polling a transient state to a
/// terminal one is the caller's concern.
///
/// # Errors
///
/// * [`AscError::Validation`]: the file is missing, unreadable, or
///   violates the policy; nothing was sent.
/// * [`AscError::NoUploadOperations`]: the reservation carried no
///   operations; the reserved asset is left on the server.
/// * [`AscError::UploadOperation`]: a transfer failed; remaining
///   operations were not attempted and no commit was issued.
/// * [`AscError::Commit`]: the commit PATCH failed after all transfers
///   succeeded.
pub async fn upload_asset<T>(
    client: &AscClient,
    owner_id: &str,
    file_path: &Path,
    policy: &dyn UploadPolicy,
) -> Result<AssetUploadResult>
where
    T: UploadAsset + DeserializeOwned,
{
    // Phase 1: validate. Fails before any request is dispatched.
    let metadata = tokio::fs::metadata(file_path).await.map_err(|err| {
        AscError::Validation(format!("cannot read file '{}': {err}", file_path.display()))
    })?;
    if !metadata.is_file() {
        return Err(AscError::Validation(format!(
            "'{}' is not a regular file",
            file_path.display()
        )));
    }
    policy.validate(file_path, metadata.len())?;

    let file_name = file_path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            AscError::Validation(format!(
                "file name of '{}' is not valid UTF-8",
                file_path.display()
            ))
        })?;
    let file_size = i64::try_from(metadata.len()).map_err(|_| {
        AscError::Validation(format!("file '{}' is too large", file_path.display()))
    })?;

    // Phase 2: reserve.
    let mut relationships = serde_json::Map::new();
    relationships.insert(
        T::owner_relationship().to_string(),
        serde_json::to_value(Relationship::to(T::owner_kind(), owner_id))?,
    );
    let reserve = CreateRequest::new(
        T::kind(),
        Some(ReserveAttributes {
            file_name: file_name.to_string(),
            file_size,
        }),
        Some(serde_json::Value::Object(relationships)),
    );

    let reservation = client
        .post_single::<T, _>(T::collection_path(), &reserve)
        .await?
        .data;
    let reservation_id = reservation.id().to_string();

    let operations = reservation.upload_operations();
    if operations.is_empty() {
        return Err(AscError::NoUploadOperations { reservation_id });
    }

    // Phase 3: transfer. First failure aborts; commit is never reached.
    let transfer = plain_http_client()?;
    if let Err(err) = execute_upload_operations(&transfer, file_path, operations).await {
        tracing::warn!(
            reservation = %reservation_id,
            "upload aborted after reservation; uncommitted asset left on server"
        );
        return Err(err);
    }

    // Phase 4: commit.
    let commit = UpdateRequest::new(
        T::kind(),
        &reservation_id,
        Some(CommitAttributes { uploaded: true }),
    );
    let committed = client
        .patch_single::<T, _>(&T::resource_path(&reservation_id), &commit)
        .await
        .map_err(|err| AscError::Commit {
            reservation_id: reservation_id.clone(),
            source: Box::new(err),
        })?
        .data;

    // Phase 5: resolve delivery state from the commit response if present.
    Ok(AssetUploadResult {
        id: committed.id().to_string(),
        owner_id: owner_id.trim().to_string(),
        file_name: committed.file_name().map(str::to_string),
        file_size: committed.file_size(),
        uploaded: true,
        asset_delivery_state: committed.delivery_state().cloned(),
    })
}

/// Execute every upload operation against its pre-signed URL.
///
/// Reads exactly `length` bytes at `offset` for each operation and sends
/// them with the operation's own headers only; the bearer credential never
/// touches these requests. Operations run sequentially; the first failure
/// aborts without attempting the rest, and no byte range is retried.
pub async fn execute_upload_operations(
    http: &reqwest::Client,
    file_path: &Path,
    operations: &[UploadOperation],
) -> Result<()> {
    let file_len = tokio::fs::metadata(file_path)
        .await
        .map_err(|err| {
            AscError::Validation(format!("cannot read file '{}': {err}", file_path.display()))
        })?
        .len();

    // Reject out-of-range operations before any bytes go over the wire.
    for (index, operation) in operations.iter().enumerate() {
        let end = operation.offset.checked_add(operation.length);
        if end.is_none() || end.unwrap_or(u64::MAX) > file_len {
            return Err(AscError::UploadOperation {
                index,
                source: Box::new(AscError::Validation(format!(
                    "range [{}, {}+{}) exceeds file size {file_len}",
                    operation.offset, operation.offset, operation.length
                ))),
            });
        }
    }

    let mut file = tokio::fs::File::open(file_path).await.map_err(|err| {
        AscError::Validation(format!("cannot open file '{}': {err}", file_path.display()))
    })?;

    for (index, operation) in operations.iter().enumerate() {
        send_operation(http, &mut file, operation)
            .await
            .map_err(|err| AscError::UploadOperation {
                index,
                source: Box::new(err),
            })?;
    }

    Ok(())
}

async fn send_operation(
    http: &reqwest::Client,
    file: &mut tokio::fs::File,
    operation: &UploadOperation,
) -> Result<()> {
    let method = Method::from_bytes(operation.method.as_bytes()).map_err(|_| {
        AscError::Validation(format!("invalid HTTP method '{}'", operation.method))
    })?;

    file.seek(SeekFrom::Start(operation.offset))
        .await
        .map_err(|err| AscError::Validation(format!("seek failed: {err}")))?;
    let mut chunk = vec![0u8; operation.length as usize];
    file.read_exact(&mut chunk)
        .await
        .map_err(|err| AscError::Validation(format!("read failed: {err}")))?;

    let mut request = http.request(method, &operation.url);
    for header in &operation.request_headers {
        request = request.header(&header.name, &header.value);
    }

    let response = request.body(chunk).send().await.map_err(AscError::Http)?;
    let status = response.status();
    if !status.is_success() {
        return Err(AscError::Api {
            status: status.as_u16(),
            code: String::new(),
            title: format!("upload target returned HTTP {status}"),
            detail: None,
        });
    }

    Ok(())
}

/// HTTP client for pre-signed transfers: no bearer auth, longer timeout.
fn plain_http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("ascapi/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(300))
        .build()
        .map_err(AscError::Http)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_state_terminality() {
        let complete = AssetDeliveryState {
            state: "COMPLETE".to_string(),
            errors: vec![],
        };
        assert!(complete.is_terminal());
        assert!(complete.is_complete());
        assert!(!complete.is_failed());

        let failed = AssetDeliveryState {
            state: "FAILED".to_string(),
            errors: vec![AssetDeliveryError {
                code: Some("IMAGE_TOO_SMALL".to_string()),
                message: Some("minimum 512x512".to_string()),
            }],
        };
        assert!(failed.is_terminal());
        assert!(failed.is_failed());

        let transient = AssetDeliveryState {
            state: "AWAITING_UPLOAD".to_string(),
            errors: vec![],
        };
        assert!(!transient.is_terminal());
    }

    #[test]
    fn test_image_policy_rejects_wrong_extension() {
        let policy = ImagePolicy::default();
        let err = policy.validate(Path::new("movie.mp4"), 1024);
        assert!(matches!(err, Err(AscError::Validation(_))));
    }

    #[test]
    fn test_image_policy_rejects_empty_and_oversized() {
        let policy = ImagePolicy::default();
        assert!(policy.validate(Path::new("icon.png"), 0).is_err());
        assert!(policy
            .validate(Path::new("icon.png"), 11 * 1024 * 1024)
            .is_err());
        assert!(policy.validate(Path::new("icon.PNG"), 1024).is_ok());
    }

    #[test]
    fn test_upload_operation_decodes_wire_shape() {
        let operation: UploadOperation = serde_json::from_str(
            r#"{
                "method": "PUT",
                "url": "https://upload.example/part0",
                "length": 12,
                "offset": 0,
                "requestHeaders": [{"name": "X-Part", "value": "0"}]
            }"#,
        )
        .unwrap();
        assert_eq!(operation.method, "PUT");
        assert_eq!(operation.length, 12);
        assert_eq!(operation.request_headers[0].name, "X-Part");
    }

    #[tokio::test]
    async fn test_execute_rejects_out_of_range_operation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon.png");
        tokio::fs::write(&path, b"abc").await.unwrap();

        let operations = vec![UploadOperation {
            method: "PUT".to_string(),
            url: "https://upload.example/part0".to_string(),
            length: 10,
            offset: 0,
            request_headers: vec![],
        }];

        let http = reqwest::Client::new();
        let err = execute_upload_operations(&http, &path, &operations)
            .await
            .unwrap_err();
        assert!(matches!(err, AscError::UploadOperation { index: 0, .. }));
    }
}
