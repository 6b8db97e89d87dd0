//! Filtros aplicados às transações resolvidas antes da classificação. Os
//! filtros são encadeados em um pipeline e o primeiro que rejeitar a
//! transação define o motivo do descarte.

use crate::config::{AppConfig, RelevancePolicy};
use candyscan_core::utils::has_log_marker;
use candyscan_core::TransactionRecord;

/// Motivo pelo qual uma transação foi descartada
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Ausente, sem metadados ou com erro de execução
    Invalid,
    /// Sem marcador de mint nos logs
    Irrelevant,
}

/// Trait para filtros de transações
pub trait Filter: Send + Sync {
    /// Retorna `Err` com o motivo quando a transação deve ser descartada
    fn check(&self, tx: &TransactionRecord) -> Result<(), SkipReason>;
}

/// Pipeline de filtros a serem executados sequencialmente
#[derive(Default)]
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Cria pipeline vazio
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Pipeline correspondente à política configurada
    pub fn from_config(config: &AppConfig) -> Self {
        let pipeline = Self::new().push(ValidityFilter);
        match config.relevance {
            RelevancePolicy::Any => pipeline,
            RelevancePolicy::MintLogs => {
                pipeline.push(LogMarkerFilter::new(config.relevance_markers.clone()))
            }
        }
    }

    /// Adiciona um filtro ao pipeline
    pub fn push<F: Filter + 'static>(mut self, filter: F) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Executa os filtros em sequência
    pub fn run(&self, tx: &TransactionRecord) -> Result<(), SkipReason> {
        self.filters.iter().try_for_each(|f| f.check(tx))
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

/// Aceita apenas transações com metadados e sem erro de execução
pub struct ValidityFilter;

impl Filter for ValidityFilter {
    fn check(&self, tx: &TransactionRecord) -> Result<(), SkipReason> {
        if tx.is_valid() {
            Ok(())
        } else {
            Err(SkipReason::Invalid)
        }
    }
}

/// Exige uma linha de log iniciada por um dos marcadores
pub struct LogMarkerFilter {
    markers: Vec<String>,
}

impl LogMarkerFilter {
    pub fn new(markers: Vec<String>) -> Self {
        Self { markers }
    }
}

impl Filter for LogMarkerFilter {
    fn check(&self, tx: &TransactionRecord) -> Result<(), SkipReason> {
        if has_log_marker(tx.log_messages(), self.markers.as_slice()) {
            Ok(())
        } else {
            Err(SkipReason::Irrelevant)
        }
    }
}
