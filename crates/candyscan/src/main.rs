use std::env;

use candyscan::{pipeline, AppConfig};
use candyscan_core::utils::lamports_to_sol;
use candyscan_rpc::SolanaRpcClient;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let path = env::args().nth(1).unwrap_or_else(|| "config.json".to_string());
    let config = AppConfig::from_file(&path)?;
    info!(config = %path, bots = config.address.len(), "Configuração carregada");

    let client = SolanaRpcClient::new(config.rpc_config())?;
    let report = pipeline::run(&config, &client).await?;

    report.write_csv(&config.output)?;
    println!("CSV file created: {}", config.output.display());

    info!(total_fee_sol = lamports_to_sol(report.bot_fees), "Taxas pagas pelos bots");

    for line in report.summary_lines() {
        println!("{}", line);
    }
    Ok(())
}
