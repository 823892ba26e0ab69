//! Disk snapshot API methods for [`RunloopClient`].

use crate::client::RunloopClient;
use crate::endpoints::snapshots as ep;
use crate::error::Result;
use crate::models::{DiskSnapshot, ListParams, Page, SnapshotStatus};

impl RunloopClient {
    pub async fn list_snapshots(&self, params: &ListParams) -> Result<Page<DiskSnapshot>> {
        ep::list_snapshots(&self.ctx(), params).await
    }

    pub async fn get_snapshot_status(&self, id: &str) -> Result<SnapshotStatus> {
        ep::get_snapshot_status(&self.ctx(), id).await
    }

    pub async fn delete_snapshot(&self, id: &str) -> Result<()> {
        ep::delete_snapshot(&self.ctx(), id).await
    }
}
