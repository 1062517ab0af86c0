//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use offcloud::{ApiResult, OffcloudClient};
use serde_json::Value;

/// Command-line client for the Offcloud download service.
///
/// Each subcommand calls one API endpoint and prints the JSON reply.
#[derive(Parser, Debug)]
#[command(name = "offcloud")]
#[command(author, version, about)]
pub struct Args {
    /// Path to the TOML config file (defaults to the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// API key, overriding the one in the config file
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Increase output verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Log in with username and password
    Login { username: String, password: String },
    /// Show the account API key
    Key,
    /// Check the login state
    Check,
    /// Submit an instant download
    Instant {
        url: String,
        #[arg(long)]
        proxy_id: Option<String>,
    },
    /// Submit a cloud download
    Cloud { url: String },
    /// Submit a remote download
    Remote {
        url: String,
        #[arg(long)]
        remote_option_id: Option<String>,
        #[arg(long)]
        folder_id: Option<String>,
    },
    /// List available proxies
    Proxies,
    /// Status of a cloud download
    CloudStatus { request_id: String },
    /// Status of a remote download
    RemoteStatus { request_id: String },
    /// Look up hashes in the service cache
    Cache {
        #[arg(required = true)]
        hashes: Vec<String>,
    },
    /// Explore the files of a cloud download
    Explore { request_id: String },
    /// List the files of a cloud download
    List { request_id: String },
    /// Retry a cloud download
    RetryCloud { request_id: String },
    /// Retry a remote download
    RetryRemote { request_id: String },
}

impl Command {
    pub async fn run(&self, client: &OffcloudClient) -> ApiResult<Value> {
        match self {
            Command::Login { username, password } => client.login(username, password).await,
            Command::Key => client.get_api_key().await,
            Command::Check => client.check_login().await,
            Command::Instant { url, proxy_id } => client.instant(url, proxy_id.as_deref()).await,
            Command::Cloud { url } => client.cloud(url).await,
            Command::Remote {
                url,
                remote_option_id,
                folder_id,
            } => {
                client
                    .remote(url, remote_option_id.as_deref(), folder_id.as_deref())
                    .await
            }
            Command::Proxies => client.get_proxies().await,
            Command::CloudStatus { request_id } => client.cloud_status(request_id).await,
            Command::RemoteStatus { request_id } => client.remote_status(request_id).await,
            Command::Cache { hashes } => client.cache_info(hashes).await,
            Command::Explore { request_id } => client.explore_cloud(request_id).await,
            Command::List { request_id } => client.list_cloud(request_id).await,
            Command::RetryCloud { request_id } => client.retry_cloud(request_id).await,
            Command::RetryRemote { request_id } => client.retry_remote(request_id).await,
        }
    }
}

impl Args {
    /// Default log filter when `RUST_LOG` is unset.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
