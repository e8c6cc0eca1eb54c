//! IVR query adapter server - HTTP host for the `ivrquery` core.

mod routes;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use ivrquery::AdapterConfig;
use ivrquery::io::config::load_config;
use tracing::info;

use crate::state::AppState;

#[derive(Parser)]
#[command(name = "ivrquery-server")]
#[command(about = "HTTP server for the IVR query adapter")]
struct Args {
    /// Address to bind the server to
    #[arg(long, env = "IVRQUERY_BIND", default_value = "127.0.0.1")]
    bind: String,

    /// Port to listen on
    #[arg(long, env = "IVRQUERY_PORT", default_value = "8080")]
    port: u16,

    /// Adapter config file (TOML); defaults apply when omitted
    #[arg(long, env = "IVRQUERY_CONFIG")]
    config: Option<PathBuf>,

    /// Require this token on every request (overrides the config file)
    #[arg(long, env = "IVRQUERY_TOKEN", hide_env_values = true)]
    token: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    ivrquery::logging::init("ivrquery_server=info,ivrquery=info,tower_http=info");

    let args = Args::parse();
    let config = resolve_config(&args)?;
    info!(
        fault_code = config.fault_code,
        gated = config.expected_token().is_some(),
        "adapter configured"
    );

    let app = routes::router(AppState::new(config));

    let addr: SocketAddr = format!("{}:{}", args.bind, args.port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", args.bind, args.port))?;
    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Load the adapter config and apply command-line overrides.
fn resolve_config(args: &Args) -> Result<AdapterConfig> {
    let mut config = match &args.config {
        Some(path) => {
            if !path.exists() {
                bail!("config file not found: {}", path.display());
            }
            load_config(path)?
        }
        None => AdapterConfig::default(),
    };
    if let Some(token) = &args.token {
        config.access.token = Some(token.clone());
    }
    config.validate().context("validate adapter config")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_defaults() {
        let args = Args::parse_from(["ivrquery-server"]);
        assert_eq!(args.bind, "127.0.0.1");
        assert_eq!(args.port, 8080);
        assert!(args.config.is_none());
    }

    #[test]
    fn parse_flags() {
        let args = Args::parse_from([
            "ivrquery-server",
            "--bind",
            "0.0.0.0",
            "--port",
            "9000",
            "--token",
            "abc",
        ]);
        assert_eq!(args.bind, "0.0.0.0");
        assert_eq!(args.port, 9000);
        assert_eq!(args.token.as_deref(), Some("abc"));
    }

    #[test]
    fn token_flag_overrides_config_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("adapter.toml");
        std::fs::write(&path, "fault_code = -1\n[access]\ntoken = \"from-file\"\n")
            .expect("write");
        let args = Args::parse_from([
            "ivrquery-server",
            "--config",
            path.to_str().expect("utf8 path"),
            "--token",
            "from-flag",
        ]);
        let config = resolve_config(&args).expect("config");
        assert_eq!(config.fault_code, -1);
        assert_eq!(config.expected_token(), Some("from-flag"));
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let args = Args::parse_from([
            "ivrquery-server",
            "--config",
            temp.path().join("nope.toml").to_str().expect("utf8 path"),
        ]);
        assert!(resolve_config(&args).is_err());
    }

    #[test]
    fn empty_token_flag_is_rejected() {
        let args = Args::parse_from(["ivrquery-server", "--token", ""]);
        assert!(resolve_config(&args).is_err());
    }
}
