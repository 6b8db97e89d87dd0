//! Resolução em lotes e classificação das transações por bot.

use crate::config::AppConfig;
use crate::filters::{FilterPipeline, SkipReason};
use crate::report::MintReport;
use candyscan_core::{
    error::Result, traits::NodeClient, utils::format_lamports, BotAddressTable, CsvRow, Error,
    SignatureRecord, TransactionRecord,
};
use tracing::{debug, info, warn};

/// Resultado da classificação de uma transação válida
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Bot(CsvRow),
    Unmarked,
}

/// Classificador de transações de uma Candy Machine
pub struct TransactionClassifier {
    bots: BotAddressTable,
    filters: FilterPipeline,
    batch_size: usize,
}

impl TransactionClassifier {
    pub fn new(bots: BotAddressTable, filters: FilterPipeline, batch_size: usize) -> Self {
        Self {
            bots,
            filters,
            batch_size: batch_size.max(1),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.address.clone(),
            FilterPipeline::from_config(config),
            config.batch_size,
        )
    }

    /// Resolve as assinaturas em lotes de tamanho fixo e classifica cada
    /// transação.
    ///
    /// As requisições de um lote são disparadas concorrentemente e o lote
    /// inteiro é aguardado antes do próximo. Falhas individuais contam como
    /// não marcadas e nunca interrompem o processamento.
    pub async fn classify_signatures<C: NodeClient + ?Sized>(
        &self,
        client: &C,
        signatures: &[SignatureRecord],
    ) -> MintReport {
        let mut report = MintReport::new(&self.bots);
        let total = signatures.len();
        let batches = total.div_ceil(self.batch_size);
        let mut processed = 0usize;

        for (index, batch) in signatures.chunks(self.batch_size).enumerate() {
            let futures = batch
                .iter()
                .map(|s| client.get_parsed_transaction(&s.signature));
            let resolved = futures::future::join_all(futures).await;

            for (sig, result) in batch.iter().zip(resolved) {
                self.record(&mut report, &sig.signature, result);
            }

            processed += batch.len();
            info!(
                batch = index + 1,
                batches,
                processed,
                total,
                "Lote processado"
            );
        }

        report
    }

    fn record(
        &self,
        report: &mut MintReport,
        requested: &str,
        resolved: Result<Option<TransactionRecord>>,
    ) {
        let tx = match resolved {
            Ok(Some(tx)) => tx,
            Ok(None) => {
                debug!(signature = requested, "Transação não encontrada");
                report.skipped += 1;
                return;
            }
            Err(e) => {
                warn!(signature = requested, error = %e, "Falha ao resolver transação");
                report.record_unmarked();
                return;
            }
        };

        match self.filters.run(&tx) {
            Ok(()) => {}
            Err(SkipReason::Invalid) => {
                report.skipped += 1;
                return;
            }
            Err(SkipReason::Irrelevant) => {
                report.irrelevant += 1;
                return;
            }
        }

        match self.classify_transaction(&tx) {
            Ok(Classification::Bot(row)) => {
                report.bot_fees += tx.meta.as_ref().map_or(0, |m| m.fee);
                report.record_bot(row);
            }
            Ok(Classification::Unmarked) => report.record_unmarked(),
            Err(e) => {
                debug!(signature = %tx.signature, error = %e, "Transação não classificada");
                report.record_unmarked();
            }
        }
    }

    /// Atribui uma transação já filtrada ao primeiro bot cujo endereço
    /// coincide com o endereço envolvido.
    pub fn classify_transaction(&self, tx: &TransactionRecord) -> Result<Classification> {
        let involved = tx
            .involved_address()
            .ok_or_else(|| Error::NotFound("addressTableLookups".to_string()))?;
        let meta = tx
            .meta
            .as_ref()
            .ok_or_else(|| Error::NotFound("meta".to_string()))?;

        Ok(match self.bots.find_by_address(involved) {
            Some(name) => Classification::Bot(CsvRow {
                signature: tx.signature.clone(),
                bot_name: name.to_string(),
                fee: format_lamports(meta.fee),
            }),
            None => Classification::Unmarked,
        })
    }
}
