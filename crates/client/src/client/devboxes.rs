//! Devbox API methods for [`RunloopClient`].
//!
//! # What this module handles:
//! - Listing, fetching, and creating devboxes
//! - Lifecycle transitions (suspend, resume, shutdown)
//! - Command execution and logs
//! - SSH key minting and file transfer
//!
//! # What this module does NOT handle:
//! - Waiting for a devbox to reach `running` (caller polls [`RunloopClient::get_devbox`])

use crate::client::RunloopClient;
use crate::endpoints::devboxes as ep;
use crate::error::Result;
use crate::models::{
    CreateDevboxRequest, Devbox, DevboxLogs, DiskSnapshot, Execution, ExecutionRequest,
    ListParams, Page, SshKey,
};

impl RunloopClient {
    pub async fn list_devboxes(&self, params: &ListParams) -> Result<Page<Devbox>> {
        ep::list_devboxes(&self.ctx(), params).await
    }

    pub async fn get_devbox(&self, id: &str) -> Result<Devbox> {
        ep::get_devbox(&self.ctx(), id).await
    }

    /// Create a devbox. The request is validated before it is sent.
    pub async fn create_devbox(&self, request: &CreateDevboxRequest) -> Result<Devbox> {
        ep::create_devbox(&self.ctx(), request).await
    }

    pub async fn execute_sync(&self, id: &str, request: &ExecutionRequest) -> Result<Execution> {
        ep::execute_sync(&self.ctx(), id, request).await
    }

    pub async fn execute_async(&self, id: &str, request: &ExecutionRequest) -> Result<Execution> {
        ep::execute_async(&self.ctx(), id, request).await
    }

    pub async fn get_execution(&self, id: &str, execution_id: &str) -> Result<Execution> {
        ep::get_execution(&self.ctx(), id, execution_id).await
    }

    pub async fn get_devbox_logs(&self, id: &str, execution_id: Option<&str>) -> Result<DevboxLogs> {
        ep::get_logs(&self.ctx(), id, execution_id).await
    }

    pub async fn suspend_devbox(&self, id: &str) -> Result<Devbox> {
        ep::suspend_devbox(&self.ctx(), id).await
    }

    pub async fn resume_devbox(&self, id: &str) -> Result<Devbox> {
        ep::resume_devbox(&self.ctx(), id).await
    }

    pub async fn shutdown_devbox(&self, id: &str) -> Result<Devbox> {
        ep::shutdown_devbox(&self.ctx(), id).await
    }

    pub async fn create_ssh_key(&self, id: &str) -> Result<SshKey> {
        ep::create_ssh_key(&self.ctx(), id).await
    }

    pub async fn read_file_contents(&self, id: &str, file_path: &str) -> Result<String> {
        ep::read_file_contents(&self.ctx(), id, file_path).await
    }

    pub async fn write_file_contents(&self, id: &str, file_path: &str, contents: &str) -> Result<()> {
        ep::write_file_contents(&self.ctx(), id, file_path, contents).await
    }

    pub async fn upload_file(
        &self,
        id: &str,
        remote_path: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<()> {
        ep::upload_file(&self.ctx(), id, remote_path, file_name, bytes).await
    }

    pub async fn download_file(&self, id: &str, remote_path: &str) -> Result<Vec<u8>> {
        ep::download_file(&self.ctx(), id, remote_path).await
    }

    pub async fn snapshot_disk_async(&self, id: &str, name: Option<&str>) -> Result<DiskSnapshot> {
        ep::snapshot_disk_async(&self.ctx(), id, name).await
    }
}
