//! Delete trait for removing resources.

use async_trait::async_trait;

use crate::client::AscClient;
use crate::error::Result;

/// Delete a resource by ID.
#[async_trait]
pub trait Delete {
    /// Delete the resource.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource is not found or the request fails.
    async fn delete(client: &AscClient, id: &str) -> Result<()>;
}
