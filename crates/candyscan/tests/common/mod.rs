#![allow(dead_code)]

use async_trait::async_trait;
use candyscan_core::{
    error::Result, traits::NodeClient, Error, SignatureRecord, TransactionMeta, TransactionRecord,
};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Node em memória com histórico ordenado do mais recente para o mais antigo
#[derive(Default)]
pub struct MockNode {
    pub history: Vec<SignatureRecord>,
    pub page_size: usize,
    pub transactions: HashMap<String, TransactionRecord>,
    pub failing_transactions: HashSet<String>,
    pub fail_pages: bool,
    pub cursors: Mutex<Vec<Option<String>>>,
    pub resolved: Mutex<Vec<String>>,
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl MockNode {
    pub fn with_history(history: Vec<SignatureRecord>, page_size: usize) -> Self {
        Self {
            history,
            page_size,
            ..Default::default()
        }
    }

    pub fn add_transaction(&mut self, tx: TransactionRecord) {
        self.transactions.insert(tx.signature.clone(), tx);
    }

    pub fn page_calls(&self) -> usize {
        self.cursors.lock().unwrap().len()
    }
}

#[async_trait]
impl NodeClient for MockNode {
    async fn get_signatures_for_address(
        &self,
        _address: &str,
        before: Option<&str>,
        limit: usize,
    ) -> Result<Vec<SignatureRecord>> {
        self.cursors.lock().unwrap().push(before.map(String::from));
        if self.fail_pages {
            return Err(Error::RpcError("node indisponível".into()));
        }
        let start = match before {
            Some(cursor) => self
                .history
                .iter()
                .position(|s| s.signature == cursor)
                .map(|i| i + 1)
                .unwrap_or(self.history.len()),
            None => 0,
        };
        let size = self.page_size.min(limit);
        Ok(self.history.iter().skip(start).take(size).cloned().collect())
    }

    async fn get_parsed_transaction(&self, signature: &str) -> Result<Option<TransactionRecord>> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        self.resolved.lock().unwrap().push(signature.to_string());
        if self.failing_transactions.contains(signature) {
            return Err(Error::TimeoutError(format!("getTransaction {}", signature)));
        }
        Ok(self.transactions.get(signature).cloned())
    }
}

/// Transação válida cuja primeira lookup table é `lookup`
pub fn mint_tx(signature: &str, lookup: &str, fee: u64, logs: &[&str]) -> TransactionRecord {
    TransactionRecord {
        signature: signature.to_string(),
        meta: Some(TransactionMeta {
            fee,
            err: None,
            log_messages: logs.iter().map(|l| l.to_string()).collect(),
        }),
        account_keys: vec!["Payer".to_string()],
        address_table_lookups: Some(vec![lookup.to_string()]),
    }
}

/// Histórico descendente com um block time por assinatura
pub fn history(entries: &[(&str, i64)]) -> Vec<SignatureRecord> {
    entries
        .iter()
        .map(|(sig, time)| SignatureRecord::new(*sig, *time))
        .collect()
}
