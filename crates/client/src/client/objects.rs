//! Object storage API methods for [`RunloopClient`].

use std::path::Path;

use crate::client::RunloopClient;
use crate::endpoints::objects as ep;
use crate::error::Result;
use crate::models::{CreateObjectRequest, DownloadUrl, ListParams, Page, StorageObject};

impl RunloopClient {
    /// List objects. With `public`, lists objects shared publicly instead of
    /// the account's own.
    pub async fn list_objects(&self, params: &ListParams, public: bool) -> Result<Page<StorageObject>> {
        if public {
            ep::list_public_objects(&self.ctx(), params).await
        } else {
            ep::list_objects(&self.ctx(), params).await
        }
    }

    pub async fn get_object(&self, id: &str) -> Result<StorageObject> {
        ep::get_object(&self.ctx(), id).await
    }

    /// Create an object, upload its bytes, and mark it complete.
    pub async fn upload_object(
        &self,
        request: &CreateObjectRequest,
        bytes: Vec<u8>,
    ) -> Result<StorageObject> {
        ep::upload_object(&self.ctx(), request, bytes).await
    }

    pub async fn get_object_download_url(&self, id: &str, duration_secs: u64) -> Result<DownloadUrl> {
        ep::get_download_url(&self.ctx(), id, duration_secs).await
    }

    /// Download an object to `dest` via a pre-signed URL. Returns bytes written.
    pub async fn download_object(&self, id: &str, dest: &Path, duration_secs: u64) -> Result<u64> {
        let url = self.get_object_download_url(id, duration_secs).await?;
        ep::download_to_path(&self.ctx(), &url.download_url, dest).await
    }

    pub async fn delete_object(&self, id: &str) -> Result<()> {
        ep::delete_object(&self.ctx(), id).await
    }
}
