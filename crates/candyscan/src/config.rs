//! Configuração da execução carregada de um arquivo JSON.

use candyscan_core::{error::Result, BotAddressTable, Error, TimeWindow};
use candyscan_rpc::RpcConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Marcador de log de criação
pub const CREATE_MARKER: &str = "Program log: Create";
/// Marcador da instrução de mint em coleção
pub const MINT_TO_COLLECTION_MARKER: &str = "Program log: Instruction: MintToCollectionV1";

/// Política de relevância aplicada após a checagem de validade
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelevancePolicy {
    /// Toda transação válida é classificada
    #[default]
    Any,
    /// Exige um marcador de mint nos logs
    MintLogs,
}

/// Configuração completa da execução
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Endpoint RPC do node Solana
    pub rpc: String,
    /// Bots conhecidos (nome -> endereço)
    pub address: BotAddressTable,
    pub candy_machine_address: String,
    pub start_time: i64,
    pub end_time: i64,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default)]
    pub relevance: RelevancePolicy,
    #[serde(default = "default_markers")]
    pub relevance_markers: Vec<String>,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default = "default_commitment")]
    pub commitment: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_batch_size() -> usize {
    300
}

fn default_markers() -> Vec<String> {
    vec![CREATE_MARKER.to_string(), MINT_TO_COLLECTION_MARKER.to_string()]
}

fn default_output() -> PathBuf {
    PathBuf::from("transactions.csv")
}

fn default_commitment() -> String {
    "confirmed".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl AppConfig {
    /// Lê e valida a configuração de um arquivo
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            Error::ValidationError(format!("Falha ao ler {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    /// Interpreta e valida a configuração a partir de JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::DecodeError(format!("Configuração inválida: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rpc.trim().is_empty() {
            return Err(Error::ValidationError("rpc não pode ser vazio".into()));
        }
        if self.candy_machine_address.trim().is_empty() {
            return Err(Error::ValidationError("candyMachineAddress não pode ser vazio".into()));
        }
        if self.start_time > self.end_time {
            return Err(Error::ValidationError(format!(
                "startTime ({}) posterior a endTime ({})",
                self.start_time, self.end_time
            )));
        }
        if self.batch_size == 0 {
            return Err(Error::ValidationError("batchSize deve ser maior que zero".into()));
        }
        if let Some(entry) = self
            .address
            .iter()
            .find(|e| e.name.trim().is_empty() || e.address.trim().is_empty())
        {
            return Err(Error::ValidationError(format!(
                "bot com nome ou endereço vazio: {:?}",
                entry.name
            )));
        }
        if self.relevance == RelevancePolicy::MintLogs && self.relevance_markers.is_empty() {
            return Err(Error::ValidationError(
                "relevance mint-logs exige ao menos um marcador".into(),
            ));
        }
        Ok(())
    }

    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start_time, self.end_time)
    }

    pub fn rpc_config(&self) -> RpcConfig {
        RpcConfig {
            endpoint: self.rpc.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            commitment: self.commitment.clone(),
        }
    }
}
