//! Ponto de entrada do fluxo coleta -> classificação.

use crate::classifier::TransactionClassifier;
use crate::collector::collect_signatures;
use crate::config::AppConfig;
use crate::report::MintReport;
use candyscan_core::{error::Result, traits::NodeClient, TimeWindow};
use chrono::{DateTime, Utc};
use tracing::info;

fn render_time(ts: i64) -> String {
    DateTime::<Utc>::from_timestamp(ts, 0)
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| ts.to_string())
}

/// Coleta as assinaturas da Candy Machine na janela configurada e classifica
/// as transações resultantes. Erros da coleta interrompem a execução.
pub async fn run<C: NodeClient + ?Sized>(config: &AppConfig, client: &C) -> Result<MintReport> {
    let window: TimeWindow = config.window();
    info!(
        candy_machine = %config.candy_machine_address,
        start = %render_time(window.start_time),
        end = %render_time(window.end_time),
        "Coletando assinaturas"
    );

    let signatures = collect_signatures(client, &config.candy_machine_address, window).await?;
    info!(count = signatures.len(), "Assinaturas na janela");

    let classifier = TransactionClassifier::from_config(config);
    let report = classifier.classify_signatures(client, &signatures).await;

    info!(
        classified = report.classified(),
        skipped = report.skipped,
        irrelevant = report.irrelevant,
        "Classificação concluída"
    );
    Ok(report)
}
