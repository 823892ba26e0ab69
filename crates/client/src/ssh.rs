//! SSH access to devboxes through the Runloop TLS proxy.
//!
//! Responsibilities:
//! - Mint an SSH key for a devbox and store it under `~/.runloop/ssh_keys`.
//! - Build `ssh`, `scp`, `rsync` and tunnel command lines that route through
//!   `openssl s_client` to the platform SSH proxy.
//! - Render an `ssh_config` host block for use outside this tool.
//! - Wait for a devbox to become `running` before connecting.
//!
//! Does NOT handle:
//! - Spawning the commands or managing the terminal around them (callers do).
//!
//! Invariants:
//! - Remote paths are written with a leading `:` (`:/home/user/file`); every
//!   other path is local.
//! - Key files are created with mode `0600` on Unix.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::client::RunloopClient;
use crate::error::{ClientError, Result};
use crate::models::{Devbox, DevboxStatus};

/// Everything needed to reach one devbox over SSH.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshTarget {
    pub devbox_id: String,
    pub user: String,
    /// Devbox hostname, used as the TLS SNI through the proxy.
    pub host: String,
    pub key_path: PathBuf,
    /// Proxy endpoint as `host:port`.
    pub proxy: String,
}

impl SshTarget {
    /// `ProxyCommand` value shared by every command built here.
    pub fn proxy_command(&self) -> String {
        format!(
            "openssl s_client -quiet -verify_quiet -servername %h -connect {} 2>/dev/null",
            self.proxy
        )
    }

    fn login(&self) -> String {
        format!("{}@{}", self.user, self.host)
    }

    /// Maps `:path` to `user@host:path`; leaves local paths untouched.
    pub fn resolve_path(&self, path: &str) -> String {
        match path.strip_prefix(':') {
            Some(remote) => format!("{}:{}", self.login(), remote),
            None => path.to_string(),
        }
    }

    fn base_ssh_args(&self) -> Vec<String> {
        vec![
            "-i".to_string(),
            self.key_path.display().to_string(),
            "-o".to_string(),
            format!("ProxyCommand={}", self.proxy_command()),
            "-o".to_string(),
            "StrictHostKeyChecking=no".to_string(),
        ]
    }

    /// Interactive login shell.
    pub fn ssh_command(&self) -> Command {
        let mut cmd = Command::new("ssh");
        cmd.args(self.base_ssh_args()).arg(self.login());
        cmd
    }

    /// Local port forward with no remote command.
    pub fn tunnel_command(&self, local_port: u16, remote_port: u16) -> Command {
        let mut cmd = Command::new("ssh");
        cmd.args(self.base_ssh_args())
            .arg("-N")
            .arg("-L")
            .arg(format!("{local_port}:localhost:{remote_port}"))
            .arg(self.login());
        cmd
    }

    /// `scp` between a local path and the devbox. `extra` is split like a
    /// POSIX shell would and inserted before the paths.
    pub fn scp_command(&self, src: &str, dst: &str, extra: Option<&str>) -> Result<Command> {
        let mut cmd = Command::new("scp");
        cmd.args(self.base_ssh_args());
        cmd.args(split_options("scp_options", extra)?);
        cmd.arg(self.resolve_path(src)).arg(self.resolve_path(dst));
        Ok(cmd)
    }

    /// `rsync -vrz` over the proxied SSH transport.
    pub fn rsync_command(&self, src: &str, dst: &str, extra: Option<&str>) -> Result<Command> {
        let transport = format!(
            "ssh -i {} -o ProxyCommand='{}' -o StrictHostKeyChecking=no",
            self.key_path.display(),
            self.proxy_command()
        );
        let mut cmd = Command::new("rsync");
        cmd.arg("-vrz").arg("-e").arg(transport);
        cmd.args(split_options("rsync_options", extra)?);
        cmd.arg(self.resolve_path(src)).arg(self.resolve_path(dst));
        Ok(cmd)
    }

    /// `Host` block suitable for appending to `~/.ssh/config`.
    pub fn config_block(&self) -> String {
        format!(
            "Host {id}\n  Hostname {host}\n  User {user}\n  IdentityFile {key}\n  StrictHostKeyChecking no\n  ProxyCommand {proxy}\n",
            id = self.devbox_id,
            host = self.host,
            user = self.user,
            key = self.key_path.display(),
            proxy = self.proxy_command(),
        )
    }
}

fn split_options(field: &str, extra: Option<&str>) -> Result<Vec<String>> {
    match extra.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(Vec::new()),
        Some(raw) => shlex::split(raw)
            .ok_or_else(|| ClientError::validation(field, format!("unbalanced quotes in '{raw}'"))),
    }
}

/// Parses `local:remote` port pairs for tunnels.
pub fn parse_port_pair(spec: &str) -> Result<(u16, u16)> {
    let (local, remote) = spec
        .split_once(':')
        .ok_or_else(|| ClientError::validation("ports", "expected 'local:remote'"))?;
    let parse = |s: &str| {
        s.trim()
            .parse::<u16>()
            .map_err(|_| ClientError::validation("ports", format!("'{s}' is not a port number")))
    };
    Ok((parse(local)?, parse(remote)?))
}

/// Writes a private key to `<dir>/<devbox_id>.pem`, replacing any previous key.
pub fn write_key(dir: &Path, devbox_id: &str, private_key: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{devbox_id}.pem"));
    std::fs::write(&path, private_key)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600))?;
    }
    Ok(path)
}

/// Mints a fresh key for `devbox_id`, stores it in `key_dir`, and resolves the
/// login user from the devbox's launch parameters.
pub async fn prepare(
    client: &RunloopClient,
    devbox_id: &str,
    proxy: &str,
    key_dir: &Path,
) -> Result<SshTarget> {
    let devbox = client.get_devbox(devbox_id).await?;
    let key = client.create_ssh_key(devbox_id).await?;
    if key.ssh_private_key.is_empty() || key.url.is_empty() {
        return Err(ClientError::InvalidResponse(format!(
            "SSH key response for {devbox_id} is missing the key or host"
        )));
    }
    let key_path = write_key(key_dir, devbox_id, &key.ssh_private_key)?;
    debug!(devbox_id, path = %key_path.display(), "Stored SSH key");

    Ok(SshTarget {
        devbox_id: devbox_id.to_string(),
        user: devbox.ssh_user().to_string(),
        host: key.url,
        key_path,
        proxy: proxy.to_string(),
    })
}

/// Polls until the devbox is `running`.
///
/// Fails fast with [`ClientError::DevboxNotReady`] once the devbox is in a
/// state it will not leave on its own, or when `timeout` elapses. Transient
/// lookup errors are retried until the deadline. `on_wait` is called with the
/// current status and elapsed time before each sleep.
pub async fn wait_for_running(
    client: &RunloopClient,
    devbox_id: &str,
    timeout: Duration,
    interval: Duration,
    mut on_wait: impl FnMut(DevboxStatus, Duration),
) -> Result<Devbox> {
    let started = Instant::now();
    loop {
        let status = match client.get_devbox(devbox_id).await {
            Ok(devbox) if devbox.status == DevboxStatus::Running => {
                info!(devbox_id, "Devbox is running");
                return Ok(devbox);
            }
            Ok(devbox) if devbox.status.is_unreachable() => {
                return Err(ClientError::DevboxNotReady {
                    id: devbox_id.to_string(),
                    status: devbox.status.to_string(),
                });
            }
            Ok(devbox) => devbox.status,
            Err(e) if e.is_auth_error() || e.is_not_found() => return Err(e),
            Err(e) => {
                debug!(devbox_id, error = %e, "Devbox status check failed, retrying");
                DevboxStatus::Unknown
            }
        };

        let elapsed = started.elapsed();
        if elapsed >= timeout {
            return Err(ClientError::DevboxNotReady {
                id: devbox_id.to_string(),
                status: format!("{status} after {}s", timeout.as_secs()),
            });
        }
        on_wait(status, elapsed);
        tokio::time::sleep(interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> SshTarget {
        SshTarget {
            devbox_id: "dbx_1".into(),
            user: "dev".into(),
            host: "dbx_1.ssh.runloop.ai".into(),
            key_path: PathBuf::from("/keys/dbx_1.pem"),
            proxy: "ssh.runloop.ai:443".into(),
        }
    }

    fn args(cmd: &Command) -> Vec<String> {
        cmd.get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_ssh_command_routes_through_proxy() {
        let cmd = target().ssh_command();
        assert_eq!(cmd.get_program(), "ssh");
        let args = args(&cmd);
        assert_eq!(args[0..2], ["-i", "/keys/dbx_1.pem"]);
        assert_eq!(
            args[3],
            "ProxyCommand=openssl s_client -quiet -verify_quiet -servername %h -connect ssh.runloop.ai:443 2>/dev/null"
        );
        assert_eq!(args[5], "StrictHostKeyChecking=no");
        assert_eq!(args.last().map(String::as_str), Some("dev@dbx_1.ssh.runloop.ai"));
    }

    #[test]
    fn test_tunnel_forwards_local_port() {
        let args = args(&target().tunnel_command(8080, 3000));
        let n = args.len();
        assert_eq!(args[n - 4..], ["-N", "-L", "8080:localhost:3000", "dev@dbx_1.ssh.runloop.ai"]);
    }

    #[test]
    fn test_scp_resolves_remote_prefix_and_splits_options() {
        let cmd = target()
            .scp_command(":/home/dev/out.txt", "./out.txt", Some("-P 22 -o 'LogLevel=ERROR'"))
            .unwrap();
        let args = args(&cmd);
        let n = args.len();
        assert_eq!(
            args[n - 6..],
            ["-P", "22", "-o", "LogLevel=ERROR", "dev@dbx_1.ssh.runloop.ai:/home/dev/out.txt", "./out.txt"]
        );
    }

    #[test]
    fn test_rsync_uses_ssh_transport() {
        let cmd = target().rsync_command("./src", ":/work/src", None).unwrap();
        let args = args(&cmd);
        assert_eq!(args[0], "-vrz");
        assert_eq!(args[1], "-e");
        assert!(args[2].starts_with("ssh -i /keys/dbx_1.pem -o ProxyCommand='openssl"));
        assert_eq!(args[3], "./src");
        assert_eq!(args[4], "dev@dbx_1.ssh.runloop.ai:/work/src");
    }

    #[test]
    fn test_unbalanced_quotes_are_rejected() {
        let err = target().scp_command("a", "b", Some("-o 'oops")).unwrap_err();
        assert!(matches!(err, ClientError::Validation { ref field, .. } if field == "scp_options"));
    }

    #[test]
    fn test_config_block_lists_host_settings() {
        let block = target().config_block();
        assert!(block.starts_with("Host dbx_1\n"));
        assert!(block.contains("  Hostname dbx_1.ssh.runloop.ai\n"));
        assert!(block.contains("  User dev\n"));
        assert!(block.contains("  IdentityFile /keys/dbx_1.pem\n"));
        assert!(block.contains("  ProxyCommand openssl s_client"));
    }

    #[test]
    fn test_parse_port_pair() {
        assert_eq!(parse_port_pair("8080:80").unwrap(), (8080, 80));
        assert!(parse_port_pair("8080").is_err());
        assert!(parse_port_pair("a:80").is_err());
        assert!(parse_port_pair("8080:70000").is_err());
    }

    #[test]
    fn test_write_key_sets_owner_only_permissions() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_key(&dir.path().join("ssh_keys"), "dbx_9", "PRIVATE").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "PRIVATE");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }
}
