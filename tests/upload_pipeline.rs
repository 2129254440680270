//! End-to-end upload pipeline tests against a mock API and mock upload
//! targets. The mock server plays both roles; pre-signed transfer URLs
//! simply point back at it under `/upload/...` paths.

use std::path::PathBuf;

use ascapi::{AscClient, AscError, GameCenterAchievementImage};
use wiremock::matchers::{any, bearer_token, body_json, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Matches when the raw request body equals the given bytes.
struct BodyEquals(Vec<u8>);

impl wiremock::Match for BodyEquals {
    fn matches(&self, request: &Request) -> bool {
        request.body == self.0
    }
}

/// Matches when the request carries no Authorization header at all.
struct NoAuthorizationHeader;

impl wiremock::Match for NoAuthorizationHeader {
    fn matches(&self, request: &Request) -> bool {
        !request.headers.contains_key("authorization")
    }
}

async fn write_temp_file(dir: &tempfile::TempDir, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    tokio::fs::write(&path, contents).await.unwrap();
    path
}

fn reservation_body(base: &str, operations: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "data": {
            "type": "gameCenterAchievementImages",
            "id": "img-1",
            "attributes": {
                "fileName": "icon.png",
                "fileSize": 12,
                "uploadOperations": operations,
            }
        },
        "links": {"self": format!("{base}/v1/gameCenterAchievementImages/img-1")}
    })
}

#[tokio::test]
async fn test_upload_pipeline_end_to_end() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();
    let dir = tempfile::tempdir().unwrap();
    let file = write_temp_file(&dir, "icon.png", b"hello, world").await;

    // Reserve: name, size, and owner relationship go up; the reservation
    // comes back with one pre-signed upload operation.
    Mock::given(method("POST"))
        .and(path("/v1/gameCenterAchievementImages"))
        .and(bearer_token("test-token"))
        .and(body_json(serde_json::json!({
            "data": {
                "type": "gameCenterAchievementImages",
                "attributes": {"fileName": "icon.png", "fileSize": 12},
                "relationships": {
                    "gameCenterAchievementLocalization": {
                        "data": {"type": "gameCenterAchievementLocalizations", "id": "loc-1"}
                    }
                }
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(reservation_body(
            &base,
            serde_json::json!([{
                "method": "PUT",
                "url": format!("{base}/upload/part0"),
                "length": 12,
                "offset": 0,
                "requestHeaders": [{"name": "X-Upload-Token", "value": "t0"}]
            }]),
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Transfer: exactly the file bytes, the operation's own header, and
    // no bearer credential.
    Mock::given(method("PUT"))
        .and(path("/upload/part0"))
        .and(header("X-Upload-Token", "t0"))
        .and(NoAuthorizationHeader)
        .and(BodyEquals(b"hello, world".to_vec()))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Commit: uploaded flag only, answered with a terminal delivery state.
    Mock::given(method("PATCH"))
        .and(path("/v1/gameCenterAchievementImages/img-1"))
        .and(bearer_token("test-token"))
        .and(body_json(serde_json::json!({
            "data": {
                "type": "gameCenterAchievementImages",
                "id": "img-1",
                "attributes": {"uploaded": true}
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {
                "type": "gameCenterAchievementImages",
                "id": "img-1",
                "attributes": {
                    "fileName": "icon.png",
                    "fileSize": 12,
                    "assetDeliveryState": {"state": "COMPLETE"}
                }
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = AscClient::new("test-token", &base).unwrap();
    let result = GameCenterAchievementImage::upload(&client, "loc-1", &file)
        .await
        .unwrap();

    assert_eq!(result.id, "img-1");
    assert_eq!(result.owner_id, "loc-1");
    assert_eq!(result.file_name.as_deref(), Some("icon.png"));
    assert_eq!(result.file_size, Some(12));
    assert!(result.uploaded);
    assert!(result.asset_delivery_state.unwrap().is_complete());
}

#[tokio::test]
async fn test_upload_splits_file_across_operations() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();
    let dir = tempfile::tempdir().unwrap();
    let file = write_temp_file(&dir, "icon.png", b"hello, world").await;

    Mock::given(method("POST"))
        .and(path("/v1/gameCenterAchievementImages"))
        .respond_with(ResponseTemplate::new(201).set_body_json(reservation_body(
            &base,
            serde_json::json!([
                {"method": "PUT", "url": format!("{base}/upload/part0"), "length": 5, "offset": 0},
                {"method": "PUT", "url": format!("{base}/upload/part1"), "length": 7, "offset": 5}
            ]),
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Each part receives exactly its byte range.
    Mock::given(method("PUT"))
        .and(path("/upload/part0"))
        .and(BodyEquals(b"hello".to_vec()))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/upload/part1"))
        .and(BodyEquals(b", world".to_vec()))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/v1/gameCenterAchievementImages/img-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {
                "type": "gameCenterAchievementImages",
                "id": "img-1",
                "attributes": {"fileName": "icon.png", "fileSize": 12}
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = AscClient::new("test-token", &base).unwrap();
    let result = GameCenterAchievementImage::upload(&client, "loc-1", &file)
        .await
        .unwrap();

    assert!(result.uploaded);
    // Commit may return no delivery state; the caller re-fetches then.
    assert!(result.asset_delivery_state.is_none());
}

#[tokio::test]
async fn test_reservation_without_operations_is_fatal() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();
    let dir = tempfile::tempdir().unwrap();
    let file = write_temp_file(&dir, "icon.png", b"hello, world").await;

    Mock::given(method("POST"))
        .and(path("/v1/gameCenterAchievementImages"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(reservation_body(&base, serde_json::json!([]))),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    // Neither a transfer nor a commit may be attempted.
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = AscClient::new("test-token", &base).unwrap();
    let err = GameCenterAchievementImage::upload(&client, "loc-1", &file)
        .await
        .unwrap_err();

    match err {
        AscError::NoUploadOperations { reservation_id } => {
            assert_eq!(reservation_id, "img-1");
        }
        other => panic!("expected NoUploadOperations, got {other:?}"),
    }
}

#[tokio::test]
async fn test_transfer_failure_aborts_before_commit() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();
    let dir = tempfile::tempdir().unwrap();
    let file = write_temp_file(&dir, "icon.png", b"hello, world").await;

    Mock::given(method("POST"))
        .and(path("/v1/gameCenterAchievementImages"))
        .respond_with(ResponseTemplate::new(201).set_body_json(reservation_body(
            &base,
            serde_json::json!([
                {"method": "PUT", "url": format!("{base}/upload/part0"), "length": 5, "offset": 0},
                {"method": "PUT", "url": format!("{base}/upload/part1"), "length": 7, "offset": 5}
            ]),
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/upload/part0"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Later operations are not attempted and no commit goes out.
    Mock::given(method("PUT"))
        .and(path("/upload/part1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = AscClient::new("test-token", &base).unwrap();
    let err = GameCenterAchievementImage::upload(&client, "loc-1", &file)
        .await
        .unwrap_err();

    assert!(matches!(err, AscError::UploadOperation { index: 0, .. }));
}

#[tokio::test]
async fn test_policy_violation_sends_nothing() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let file = write_temp_file(&dir, "movie.mp4", b"not an image").await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = AscClient::new("test-token", &mock_server.uri()).unwrap();
    let err = GameCenterAchievementImage::upload(&client, "loc-1", &file)
        .await
        .unwrap_err();

    assert!(matches!(err, AscError::Validation(_)));
}

#[tokio::test]
async fn test_commit_failure_names_the_reservation() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();
    let dir = tempfile::tempdir().unwrap();
    let file = write_temp_file(&dir, "icon.png", b"hello, world").await;

    Mock::given(method("POST"))
        .and(path("/v1/gameCenterAchievementImages"))
        .respond_with(ResponseTemplate::new(201).set_body_json(reservation_body(
            &base,
            serde_json::json!([{
                "method": "PUT",
                "url": format!("{base}/upload/part0"),
                "length": 12,
                "offset": 0
            }]),
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/upload/part0"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/v1/gameCenterAchievementImages/img-1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "errors": [{"code": "UNEXPECTED_ERROR", "title": "server error"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = AscClient::new("test-token", &base).unwrap();
    let err = GameCenterAchievementImage::upload(&client, "loc-1", &file)
        .await
        .unwrap_err();

    match err {
        AscError::Commit {
            reservation_id,
            source,
        } => {
            assert_eq!(reservation_id, "img-1");
            assert!(matches!(*source, AscError::Api { status: 500, .. }));
        }
        other => panic!("expected Commit error, got {other:?}"),
    }
}
