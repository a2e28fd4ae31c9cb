use std::net::IpAddr;

use anyhow::Result;
use clap::Parser;

use envelope_api::config::{IdStrategy, LogFormat, Settings};

#[derive(Parser)]
#[command(
    name = "envelope-api",
    author = "Kaylee Beyene",
    version,
    about = "In-memory envelope budgeting HTTP service",
    long_about = "Envelope API serves a small JSON API for creating, adjusting, \
                  deleting and transferring between budget envelopes. All state \
                  lives in memory and is discarded when the process exits."
)]
struct Cli {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = Settings::DEFAULT_PORT)]
    port: u16,

    /// Envelope id assignment: "monotonic" or "length"
    #[arg(long, env = "ENVELOPE_ID_STRATEGY", default_value = "monotonic")]
    id_strategy: IdStrategy,

    /// Number of audit entries kept in memory
    #[arg(
        long,
        env = "ENVELOPE_AUDIT_CAPACITY",
        default_value_t = Settings::DEFAULT_AUDIT_CAPACITY
    )]
    audit_capacity: usize,

    /// Disable cross-origin requests
    #[arg(long)]
    no_cors: bool,

    /// Log output: "text" or "json"
    #[arg(long, env = "ENVELOPE_LOG_FORMAT", default_value = "text")]
    log_format: LogFormat,
}

impl From<Cli> for Settings {
    fn from(cli: Cli) -> Self {
        Settings {
            host: cli.host,
            port: cli.port,
            id_strategy: cli.id_strategy,
            audit_capacity: cli.audit_capacity,
            cors_enabled: !cli.no_cors,
            log_format: cli.log_format,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::from(Cli::parse());

    envelope_api::logging::init(settings.log_format)?;
    envelope_api::server::serve(settings).await?;

    Ok(())
}
