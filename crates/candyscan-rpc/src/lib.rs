/*!
 * Candyscan RPC
 *
 * Cliente JSON-RPC para interação com nodes Solana
 */

use async_trait::async_trait;
use candyscan_core::{
    error::Result, traits::NodeClient, Error, SignatureRecord, TransactionMeta, TransactionRecord,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::debug;

/// Configuração do cliente RPC
#[derive(Debug, Clone)]
pub struct RpcConfig {
    pub endpoint: String,
    pub timeout: Duration,
    pub commitment: String,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8899".to_string(),
            timeout: Duration::from_secs(30),
            commitment: "confirmed".to_string(),
        }
    }
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTransaction {
    meta: Option<RawMeta>,
    transaction: RawEnvelope,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMeta {
    fee: u64,
    err: Option<Value>,
    #[serde(default)]
    log_messages: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct RawEnvelope {
    #[serde(default)]
    signatures: Vec<String>,
    message: RawMessage,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMessage {
    #[serde(default)]
    account_keys: Vec<RawAccountKey>,
    #[serde(default)]
    address_table_lookups: Option<Vec<RawLookup>>,
}

/// Em `jsonParsed` as chaves vêm como objetos, em `json` como strings
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAccountKey {
    Parsed { pubkey: String },
    Plain(String),
}

impl RawAccountKey {
    fn into_pubkey(self) -> String {
        match self {
            RawAccountKey::Parsed { pubkey } => pubkey,
            RawAccountKey::Plain(pubkey) => pubkey,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLookup {
    account_key: String,
}

impl RawTransaction {
    fn into_record(self, requested: &str) -> TransactionRecord {
        let signature = self
            .transaction
            .signatures
            .into_iter()
            .next()
            .unwrap_or_else(|| requested.to_string());

        TransactionRecord {
            signature,
            meta: self.meta.map(|m| TransactionMeta {
                fee: m.fee,
                err: m.err,
                log_messages: m.log_messages.unwrap_or_default(),
            }),
            account_keys: self
                .transaction
                .message
                .account_keys
                .into_iter()
                .map(RawAccountKey::into_pubkey)
                .collect(),
            address_table_lookups: self
                .transaction
                .message
                .address_table_lookups
                .map(|lookups| lookups.into_iter().map(|l| l.account_key).collect()),
        }
    }
}

/// Cliente RPC HTTP para Solana
pub struct SolanaRpcClient {
    client: Client,
    config: RpcConfig,
    next_id: AtomicU64,
}

impl SolanaRpcClient {
    /// Cria um novo cliente RPC HTTP
    pub fn new(config: RpcConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::RpcError(format!("Falha ao criar cliente HTTP: {}", e)))?;

        Ok(Self {
            client,
            config,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn config(&self) -> &RpcConfig {
        &self.config
    }

    /// Executa uma chamada JSON-RPC e devolve o campo `result`
    async fn request<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<Option<T>> {
        let req = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };

        let resp = self
            .client
            .post(&self.config.endpoint)
            .json(&req)
            .send()
            .await
            .map_err(|e| transport_error(method, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::RpcError(format!("{} retornou HTTP {}", method, status)));
        }

        let body: RpcResponse<T> = resp
            .json()
            .await
            .map_err(|e| Error::DecodeError(format!("Resposta inválida de {}: {}", method, e)))?;

        if let Some(err) = body.error {
            return Err(Error::RpcError(format!(
                "{} falhou ({}): {}",
                method, err.code, err.message
            )));
        }

        Ok(body.result)
    }
}

fn transport_error(method: &str, e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::TimeoutError(format!("{} excedeu o tempo limite", method))
    } else {
        Error::RpcError(format!("Falha ao chamar {}: {}", method, e))
    }
}

#[async_trait]
impl NodeClient for SolanaRpcClient {
    async fn get_signatures_for_address(
        &self,
        address: &str,
        before: Option<&str>,
        limit: usize,
    ) -> Result<Vec<SignatureRecord>> {
        let mut options = json!({
            "limit": limit,
            "commitment": self.config.commitment,
        });
        if let Some(before) = before {
            options["before"] = Value::String(before.to_string());
        }

        let page: Vec<SignatureRecord> = self
            .request("getSignaturesForAddress", json!([address, options]))
            .await?
            .ok_or_else(|| Error::DecodeError("getSignaturesForAddress sem resultado".to_string()))?;

        debug!(address, before = ?before, count = page.len(), "Página de assinaturas recebida");
        Ok(page)
    }

    async fn get_parsed_transaction(&self, signature: &str) -> Result<Option<TransactionRecord>> {
        let params = json!([
            signature,
            {
                "encoding": "jsonParsed",
                "maxSupportedTransactionVersion": 0,
                "commitment": self.config.commitment,
            }
        ]);

        let raw: Option<RawTransaction> = self.request("getTransaction", params).await?;
        Ok(raw.map(|tx| tx.into_record(signature)))
    }
}
