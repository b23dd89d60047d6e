//! Image uploads for hash matching.

use modqueue_api::ApiClient;
use tracing::{error, info};

use crate::error::Result;
use crate::table::RefreshHandle;

/// Uploads images to match future signals against.
///
/// The backend hashes the image and opens a user-report case for it, so
/// a successful upload nudges the case table to refresh.
#[derive(Debug, Clone)]
pub struct UploadService {
    client: ApiClient,
    refresh: Option<RefreshHandle>,
}

impl UploadService {
    /// Creates a service over `client`.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self {
            client,
            refresh: None,
        }
    }

    /// Refreshes the case table through `handle` after each successful
    /// upload.
    #[must_use]
    pub fn with_refresh(mut self, handle: RefreshHandle) -> Self {
        self.refresh = Some(handle);
        self
    }

    /// Uploads an image, given its filename and a base64 data URL.
    ///
    /// Returns whether the upload succeeded; failures are logged rather
    /// than propagated, matching the fire-and-forget UI flow.
    pub async fn upload_image(&self, name: &str, image_data_url: &str) -> bool {
        match self.try_upload(name, image_data_url).await {
            Ok(()) => {
                if let Some(refresh) = &self.refresh {
                    refresh.refresh();
                }
                true
            }
            Err(err) => {
                error!(name, "failed to upload image: {err}");
                false
            }
        }
    }

    async fn try_upload(&self, name: &str, image_data_url: &str) -> Result<()> {
        self.client.upload_image(name, image_data_url).await?;
        info!(name, "image uploaded");
        Ok(())
    }
}
