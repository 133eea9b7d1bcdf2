//! Daemon configuration, resolved once from the environment

use anyhow::{Context, Result};
use swipematch_core::application::TransitionPolicy;

const DEFAULT_DB_PATH: &str = "~/.swipematch/matches.db";
const DEFAULT_RPC_HOST: &str = "127.0.0.1";
const DEFAULT_RPC_PORT: u16 = 9630;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct DaemonConfig {
    pub db_path: String,
    pub rpc_host: String,
    pub rpc_port: u16,
    pub log_format: LogFormat,
    pub transition_policy: TransitionPolicy,
}

impl DaemonConfig {
    /// Read `SWIPEMATCH_*` variables from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (unset = `None`)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let db_path = lookup("SWIPEMATCH_DB_PATH")
            .unwrap_or_else(|| DEFAULT_DB_PATH.to_string());
        let db_path = shellexpand::tilde(&db_path).into_owned();

        let rpc_host = lookup("SWIPEMATCH_RPC_HOST").unwrap_or_else(|| DEFAULT_RPC_HOST.to_string());

        let rpc_port = match lookup("SWIPEMATCH_RPC_PORT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("SWIPEMATCH_RPC_PORT is not a port number: {}", raw))?,
            None => DEFAULT_RPC_PORT,
        };

        let log_format = match lookup("SWIPEMATCH_LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        let transition_policy = match lookup("SWIPEMATCH_TRANSITION_POLICY") {
            Some(raw) => raw
                .parse()
                .context("Invalid SWIPEMATCH_TRANSITION_POLICY")?,
            None => TransitionPolicy::default(),
        };

        Ok(Self {
            db_path,
            rpc_host,
            rpc_port,
            log_format,
            transition_policy,
        })
    }
}
