// crates/kudos-daemon/src/config.rs
//
// Runtime configuration for the Kudos daemon.
// Loaded from a TOML file or populated with sensible defaults.

use std::fs;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("cannot parse {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Runtime configuration for the daemon.
#[derive(Debug, Clone, Deserialize)]
pub struct DaemonConfig {
    /// Host address for the HTTP server.
    #[serde(default = "default_rpc_host")]
    pub rpc_host: String,

    /// Address this node announces to bootstrap peers. Defaults to
    /// `localhost:<port>` when unset.
    #[serde(default)]
    pub self_address: Option<String>,

    /// Peers to announce ourselves to (e.g., ["localhost:5000"]).
    #[serde(default)]
    pub bootstrap_peers: Vec<String>,

    /// Seconds between discovery rounds.
    #[serde(default = "default_discovery_interval_secs")]
    pub discovery_interval_secs: u64,

    /// Seconds between background chain reconciliations.
    #[serde(default = "default_sync_interval_secs")]
    pub sync_interval_secs: u64,

    /// Per-request timeout for outbound peer calls.
    #[serde(default = "default_peer_timeout_secs")]
    pub peer_timeout_secs: u64,

    /// Hard cap on coins in circulation.
    #[serde(default = "default_total_circulation")]
    pub total_circulation: u64,

    /// JSON array of `{"key", "likes"}` records. No posts when unset.
    #[serde(default)]
    pub posts_file: Option<String>,

    /// JSON array of `{"key", "coins"}` records consulted when reviewing a
    /// peer's block. The local chain is used when unset.
    #[serde(default)]
    pub claims_file: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_rpc_host() -> String {
    "127.0.0.1".to_string()
}

fn default_discovery_interval_secs() -> u64 {
    180
}

fn default_sync_interval_secs() -> u64 {
    60
}

fn default_peer_timeout_secs() -> u64 {
    kudos_p2p::DEFAULT_PEER_TIMEOUT_SECS
}

fn default_total_circulation() -> u64 {
    kudos_economics::TOTAL_CIRCULATION
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            rpc_host: default_rpc_host(),
            self_address: None,
            bootstrap_peers: Vec::new(),
            discovery_interval_secs: default_discovery_interval_secs(),
            sync_interval_secs: default_sync_interval_secs(),
            peer_timeout_secs: default_peer_timeout_secs(),
            total_circulation: default_total_circulation(),
            posts_file: None,
            claims_file: None,
            log_level: default_log_level(),
        }
    }
}

impl DaemonConfig {
    /// Load configuration from a TOML file at the given path.
    ///
    /// A leading `~/` is expanded to the home directory.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let path = expand_tilde(path);
        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Per-request peer timeout. Zero is clamped to one second.
    pub fn peer_timeout(&self) -> Duration {
        Duration::from_secs(self.peer_timeout_secs.max(1))
    }

    /// Interval between discovery rounds, at least one second.
    pub fn discovery_interval(&self) -> Duration {
        Duration::from_secs(self.discovery_interval_secs.max(1))
    }

    /// Interval between reconciliation rounds, at least one second.
    pub fn sync_interval(&self) -> Duration {
        Duration::from_secs(self.sync_interval_secs.max(1))
    }

    /// The address announced to peers.
    pub fn self_address_for(&self, port: u16) -> String {
        self.self_address
            .clone()
            .unwrap_or_else(|| format!("localhost:{}", port))
    }
}

/// Expand a leading `~/` to the user's home directory.
pub fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return format!("{}/{}", home.display(), rest);
        }
    }
    path.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let cfg = DaemonConfig::default();
        assert_eq!(cfg.rpc_host, "127.0.0.1");
        assert_eq!(cfg.discovery_interval_secs, 180);
        assert_eq!(cfg.sync_interval_secs, 60);
        assert_eq!(cfg.peer_timeout_secs, 5);
        assert_eq!(cfg.total_circulation, 100_000);
        assert!(cfg.bootstrap_peers.is_empty());
        assert_eq!(cfg.self_address_for(5001), "localhost:5001");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = write_config(
            r#"
            bootstrap_peers = ["localhost:5000", "http://10.0.0.2:5000"]
            self_address = "10.0.0.1:5001"
            posts_file = "posts.json"
            sync_interval_secs = 15
            "#,
        );
        let cfg = DaemonConfig::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(cfg.bootstrap_peers.len(), 2);
        assert_eq!(cfg.self_address_for(5001), "10.0.0.1:5001");
        assert_eq!(cfg.posts_file.as_deref(), Some("posts.json"));
        assert_eq!(cfg.sync_interval_secs, 15);
        assert_eq!(cfg.discovery_interval_secs, 180);
        assert!(cfg.claims_file.is_none());
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn test_zero_durations_are_clamped() {
        let file = write_config(
            r#"
            peer_timeout_secs = 0
            discovery_interval_secs = 0
            sync_interval_secs = 0
            "#,
        );
        let cfg = DaemonConfig::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(cfg.peer_timeout(), Duration::from_secs(1));
        assert_eq!(cfg.discovery_interval(), Duration::from_secs(1));
        assert_eq!(cfg.sync_interval(), Duration::from_secs(1));

        let cfg = DaemonConfig::default();
        assert_eq!(cfg.peer_timeout(), Duration::from_secs(5));
        assert_eq!(cfg.sync_interval(), Duration::from_secs(60));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = DaemonConfig::load("/nonexistent/kudos/config.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let file = write_config("sync_interval_secs = \"soon\"");
        let err = DaemonConfig::load(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_expand_tilde_leaves_plain_paths() {
        assert_eq!(expand_tilde("/etc/kudos.toml"), "/etc/kudos.toml");
        assert_eq!(expand_tilde("relative.toml"), "relative.toml");
    }
}
