use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "dao-gateway")]
#[command(about = "HTTP gateway that forwards DAO operations to a governance contract")]
pub struct CliArgs {
    #[arg(long, short, help = "TOML configuration file (defaults to DAO_GATEWAY_* environment variables)")]
    pub config: Option<String>,

    #[arg(long, help = "Override the listen address, e.g. 0.0.0.0:5000")]
    pub bind: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl CliArgs {
    /// `--bind` 優先於配置中的 `server.bind`
    pub fn bind_or<'a>(&'a self, configured: &'a str) -> &'a str {
        self.bind.as_deref().unwrap_or(configured)
    }
}
