//! Relatório final: linhas CSV por transação de bot e contadores.

use candyscan_core::{
    error::Result, BotAddressTable, BotTransactionCounts, CsvRow, Error,
};
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Cabeçalho do CSV de saída
pub const CSV_HEADER: [&str; 3] = ["Signature", "BotName", "Fee"];

/// Resultado acumulado da classificação
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MintReport {
    pub rows: Vec<CsvRow>,
    pub counts: BotTransactionCounts,
    /// Transações válidas sem bot identificado (inclui falhas de classificação)
    pub unmarked: u64,
    /// Transações ausentes, sem metadados ou com erro
    pub skipped: u64,
    /// Transações descartadas pelo filtro de relevância
    pub irrelevant: u64,
    /// Soma das taxas das transações de bots, em lamports
    pub bot_fees: u64,
}

impl MintReport {
    /// Relatório vazio com contadores zerados para cada bot
    pub fn new(bots: &BotAddressTable) -> Self {
        Self {
            counts: BotTransactionCounts::for_table(bots),
            ..Default::default()
        }
    }

    /// Registra uma transação atribuída a um bot
    pub fn record_bot(&mut self, row: CsvRow) {
        if self.counts.increment(&row.bot_name) {
            self.rows.push(row);
        } else {
            self.unmarked += 1;
        }
    }

    pub fn record_unmarked(&mut self) {
        self.unmarked += 1;
    }

    /// Transações que passaram pelos filtros
    pub fn classified(&self) -> u64 {
        self.counts.total() + self.unmarked
    }

    /// Escreve o CSV em qualquer destino
    pub fn write_csv_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(CSV_HEADER)
            .map_err(|e| Error::EncodeError(format!("Falha ao escrever cabeçalho: {}", e)))?;
        for row in &self.rows {
            wtr.write_record([&row.signature, &row.bot_name, &row.fee])
                .map_err(|e| Error::EncodeError(format!("Falha ao escrever linha: {}", e)))?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Escreve o CSV no caminho informado, sobrescrevendo o arquivo
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path)?;
        self.write_csv_to(file)?;
        info!(path = %path.display(), rows = self.rows.len(), "CSV escrito");
        Ok(())
    }

    /// Linhas do resumo exibido no console
    pub fn summary_lines(&self) -> Vec<String> {
        self.counts
            .iter()
            .map(|(name, count)| format!("{} Mints: {}", name, count))
            .chain(std::iter::once(format!("Unmarked Mints: {}", self.unmarked)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bots() -> BotAddressTable {
        vec![("BotA", "Addr1"), ("BotB", "Addr2")].into_iter().collect()
    }

    fn row(sig: &str, bot: &str, fee: &str) -> CsvRow {
        CsvRow {
            signature: sig.into(),
            bot_name: bot.into(),
            fee: fee.into(),
        }
    }

    #[test]
    fn empty_report_writes_header_only() {
        let report = MintReport::new(&bots());
        let mut out = Vec::new();
        report.write_csv_to(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Signature,BotName,Fee\n");
        assert_eq!(
            report.summary_lines(),
            vec!["BotA Mints: 0", "BotB Mints: 0", "Unmarked Mints: 0"]
        );
    }

    #[test]
    fn rows_follow_recording_order() {
        let mut report = MintReport::new(&bots());
        report.record_bot(row("sig2", "BotB", "0.000005000"));
        report.record_bot(row("sig1", "BotA", "0.005000000"));
        report.record_unmarked();

        let mut out = Vec::new();
        report.write_csv_to(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Signature,BotName,Fee\nsig2,BotB,0.000005000\nsig1,BotA,0.005000000\n"
        );
        assert_eq!(report.classified(), 3);
        assert_eq!(report.rows.len() as u64, report.counts.total());
    }

    #[test]
    fn unknown_bot_is_counted_as_unmarked() {
        let mut report = MintReport::new(&bots());
        report.record_bot(row("sig", "Ghost", "0.000000000"));
        assert!(report.rows.is_empty());
        assert_eq!(report.unmarked, 1);
    }
}
