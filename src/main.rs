use anyhow::Context;
use clap::Parser;
use dao_gateway::core::ConfigProvider;
use dao_gateway::utils::validation::{validate_address, validate_bind_address, Validate};
use dao_gateway::utils::{error::GatewayError, logger};
use dao_gateway::{build_router, CliArgs, EnvConfig, RequestForwarder, RpcGovernanceContract, TomlConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 開發環境可用 .env 提供 DAO_GATEWAY_* 變數
    let _ = dotenvy::dotenv();

    let args = CliArgs::parse();

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_logger(args.verbose);
    }

    tracing::info!("Starting dao-gateway");
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    match &args.config {
        Some(path) => {
            tracing::info!("📄 Loading configuration from {}", path);
            let config = TomlConfig::from_file(path).unwrap_or_else(|e| exit_with(e));
            run(config, &args).await
        }
        None => {
            tracing::info!("Loading configuration from DAO_GATEWAY_* environment variables");
            let config = EnvConfig::from_env().unwrap_or_else(|e| exit_with(e));
            run(config, &args).await
        }
    }
}

async fn run<C: ConfigProvider + Validate>(config: C, args: &CliArgs) -> anyhow::Result<()> {
    // 驗證配置
    if let Err(e) = config.validate() {
        exit_with(e);
    }

    let operator = validate_address("operator.address", config.operator_address())?;
    let contract = RpcGovernanceContract::from_config(&config).unwrap_or_else(|e| exit_with(e));
    tracing::info!(
        rpc_url = config.rpc_url(),
        contract = %contract.address(),
        operator = %operator,
        "Ledger connection configured"
    );

    let forwarder = RequestForwarder::new(Arc::new(contract), operator);
    match forwarder.network_status().await {
        Ok(status) => tracing::info!(
            chain_id = status.chain_id,
            block_number = status.block_number,
            "🔗 Ledger node reachable"
        ),
        Err(e) => tracing::warn!("Ledger node not reachable yet: {} ({})", e, e.recovery_suggestion()),
    }

    let addr = validate_bind_address("server.bind", args.bind_or(config.bind_address()))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("🚀 Listening on http://{}", addr);
    dao_gateway::app::serve(listener, build_router(forwarder))
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

fn exit_with(e: GatewayError) -> ! {
    tracing::error!("❌ Startup failed: {} (Category: {:?})", e, e.category());
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e);
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(1);
}
