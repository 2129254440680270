//! Pagination envelopes and the next-page URL guard.
//!
//! List responses arrive as `{data: [...], links: {next?}, meta?}` and
//! single responses as `{data: {...}}`. The generic wrappers here expose a
//! uniform "items + next link" capability for any item type, with no
//! per-type branching.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AscError, Result};

/// Pagination links attached to a list response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Links {
    /// The request that produced this page.
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub this: Option<String>,
    /// Absolute URL of the next page, absent on the last page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

/// A page of resources from a list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// The items on this page.
    pub data: Vec<T>,
    /// Pagination links.
    #[serde(default)]
    pub links: Links,
    /// Opaque response metadata (paging totals and the like).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl<T> Envelope<T> {
    /// The next-page cursor, if any. Always an absolute URL on the wire.
    pub fn next_link(&self) -> Option<&str> {
        self.links.next.as_deref()
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns an iterator over the items on this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }
}

impl<T> IntoIterator for Envelope<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Envelope<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

/// A single resource from a detail, create, or update endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SingleEnvelope<T> {
    /// The resource.
    pub data: T,
}

/// Maximum pages a fetch-all loop will follow (safety limit).
pub(crate) const MAX_PAGES: u32 = 1000;

/// Validate a server-supplied next-page URL before it is dispatched with
/// the bearer credential attached.
///
/// Pagination links are attacker-influenceable if any leg of the exchange
/// can rewrite them; following one blindly would hand the token to an
/// arbitrary host. Accepts only absolute URLs on an allow-listed host,
/// with scheme `https` (or `http` for loopback hosts, so local test
/// servers can serve cursors). Never downgrades or redirects; makes no
/// network call.
pub fn validate_next_url(next: &str, allowed_hosts: &[String]) -> Result<Url> {
    let url = Url::parse(next).map_err(|err| AscError::InvalidNextUrl {
        url: next.to_string(),
        reason: format!("not an absolute URL: {err}"),
    })?;

    let host = url
        .host_str()
        .ok_or_else(|| AscError::InvalidNextUrl {
            url: next.to_string(),
            reason: "missing host".to_string(),
        })?
        .to_string();

    match url.scheme() {
        "https" => {}
        "http" if is_loopback(&host) => {}
        scheme => {
            return Err(AscError::InvalidNextUrl {
                url: next.to_string(),
                reason: format!("scheme '{scheme}' not allowed"),
            })
        }
    }

    let host_port = crate::client::host_with_port(&url).unwrap_or(host);
    if !allowed_hosts.iter().any(|allowed| *allowed == host_port) {
        return Err(AscError::InvalidNextUrl {
            url: next.to_string(),
            reason: format!("host '{host_port}' not on the allow-list"),
        });
    }

    Ok(url)
}

fn is_loopback(host: &str) -> bool {
    host == "localhost" || host == "127.0.0.1" || host == "::1" || host == "[::1]"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed() -> Vec<String> {
        vec!["api.appstoreconnect.apple.com".to_string()]
    }

    #[test]
    fn test_accepts_https_allow_listed_host() {
        let url = validate_next_url(
            "https://api.appstoreconnect.apple.com/v2/gameCenterAchievements?cursor=abc",
            &allowed(),
        )
        .unwrap();
        assert_eq!(url.host_str(), Some("api.appstoreconnect.apple.com"));
    }

    #[test]
    fn test_rejects_relative_url() {
        let err = validate_next_url("/v2/gameCenterAchievements?cursor=abc", &allowed());
        assert!(matches!(err, Err(AscError::InvalidNextUrl { .. })));
    }

    #[test]
    fn test_rejects_http_scheme() {
        let err = validate_next_url(
            "http://api.appstoreconnect.apple.com/v2/gameCenterAchievements",
            &allowed(),
        );
        assert!(matches!(err, Err(AscError::InvalidNextUrl { .. })));
    }

    #[test]
    fn test_rejects_http_for_allow_listed_non_loopback_host() {
        // The allow-list widens the host rule only; a plaintext cursor to
        // anything but loopback stays rejected no matter what is listed.
        let allowed = vec!["staging.internal:8080".to_string()];
        let err = validate_next_url("http://staging.internal:8080/v1/page?cursor=x", &allowed);
        match err {
            Err(AscError::InvalidNextUrl { reason, .. }) => {
                assert!(reason.contains("scheme"), "unexpected reason: {reason}");
            }
            other => panic!("expected InvalidNextUrl, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_foreign_host() {
        let err = validate_next_url("https://evil.example.com/v1/anything", &allowed());
        assert!(matches!(err, Err(AscError::InvalidNextUrl { .. })));
    }

    #[test]
    fn test_loopback_http_allowed_when_listed() {
        let allowed = vec!["127.0.0.1:8080".to_string()];
        let url = validate_next_url("http://127.0.0.1:8080/v1/page?cursor=x", &allowed).unwrap();
        assert_eq!(url.port(), Some(8080));

        // Loopback still has to be on the allow-list.
        let err = validate_next_url("http://127.0.0.1:9999/v1/page", &allowed);
        assert!(matches!(err, Err(AscError::InvalidNextUrl { .. })));
    }

    #[test]
    fn test_envelope_accessors() {
        let envelope: Envelope<i32> = Envelope {
            data: vec![1, 2, 3],
            links: Links {
                this: None,
                next: Some("https://api.appstoreconnect.apple.com/v1/x?cursor=y".to_string()),
            },
            meta: None,
        };
        assert_eq!(envelope.len(), 3);
        assert!(!envelope.is_empty());
        assert!(envelope.next_link().is_some());
        assert_eq!(envelope.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_envelope_decodes_without_links() {
        let envelope: Envelope<i32> = serde_json::from_str(r#"{"data":[7]}"#).unwrap();
        assert_eq!(envelope.data, vec![7]);
        assert!(envelope.next_link().is_none());
    }
}
