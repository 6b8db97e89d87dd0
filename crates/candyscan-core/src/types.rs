/*!
 * Candyscan Types
 *
 * Tipos comuns usados em toda a workspace Candyscan
 */

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Assinatura retornada por `getSignaturesForAddress`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureRecord {
    pub signature: String,
    #[serde(default)]
    pub block_time: Option<i64>,
    #[serde(default)]
    pub err: Option<serde_json::Value>,
}

impl SignatureRecord {
    /// Cria um registro com block time conhecido
    pub fn new(signature: impl Into<String>, block_time: i64) -> Self {
        Self {
            signature: signature.into(),
            block_time: Some(block_time),
            err: None,
        }
    }
}

/// Janela de tempo inclusiva em segundos unix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start_time: i64,
    pub end_time: i64,
}

impl TimeWindow {
    pub fn new(start_time: i64, end_time: i64) -> Self {
        Self { start_time, end_time }
    }

    /// Verifica se o timestamp está dentro da janela
    pub fn contains(&self, block_time: Option<i64>) -> bool {
        matches!(block_time, Some(t) if t >= self.start_time && t <= self.end_time)
    }

    /// Verifica se o timestamp é anterior ao início da janela
    pub fn precedes(&self, block_time: Option<i64>) -> bool {
        matches!(block_time, Some(t) if t < self.start_time)
    }
}

/// Metadados de execução de uma transação
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionMeta {
    /// Taxa em lamports
    pub fee: u64,
    pub err: Option<serde_json::Value>,
    pub log_messages: Vec<String>,
}

/// Transação resolvida via `getTransaction`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Assinatura primária da transação
    pub signature: String,
    pub meta: Option<TransactionMeta>,
    pub account_keys: Vec<String>,
    /// Contas das address lookup tables, na ordem da mensagem
    pub address_table_lookups: Option<Vec<String>>,
}

impl TransactionRecord {
    /// Transação executada sem erro e com metadados presentes
    pub fn is_valid(&self) -> bool {
        matches!(&self.meta, Some(meta) if meta.err.is_none())
    }

    /// Endereço envolvido: a primeira address lookup table da mensagem.
    ///
    /// Retorna `None` quando a mensagem não tem account keys ou quando as
    /// lookups estão ausentes ou vazias.
    pub fn involved_address(&self) -> Option<&str> {
        if self.account_keys.is_empty() {
            return None;
        }
        self.address_table_lookups
            .as_ref()?
            .first()
            .map(String::as_str)
    }

    pub fn log_messages(&self) -> &[String] {
        self.meta
            .as_ref()
            .map(|m| m.log_messages.as_slice())
            .unwrap_or_default()
    }
}

/// Bot conhecido e seu endereço on-chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BotEntry {
    pub name: String,
    pub address: String,
}

/// Tabela nome do bot -> endereço, preservando a ordem de configuração
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BotAddressTable {
    entries: Vec<BotEntry>,
}

impl BotAddressTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adiciona um bot. Nomes repetidos substituem o endereço anterior.
    pub fn insert(&mut self, name: impl Into<String>, address: impl Into<String>) {
        let name = name.into();
        let address = address.into();
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => entry.address = address,
            None => self.entries.push(BotEntry { name, address }),
        }
    }

    /// Busca linear: o primeiro bot com o endereço informado vence
    pub fn find_by_address(&self, address: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.address == address)
            .map(|e| e.name.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &BotEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<String>, A: Into<String>> FromIterator<(N, A)> for BotAddressTable {
    fn from_iter<I: IntoIterator<Item = (N, A)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (name, address) in iter {
            table.insert(name, address);
        }
        table
    }
}

struct BotAddressTableVisitor;

impl<'de> Visitor<'de> for BotAddressTableVisitor {
    type Value = BotAddressTable;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("um objeto nome do bot -> endereço")
    }

    fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Self::Value, M::Error> {
        let mut table = BotAddressTable::new();
        while let Some((name, address)) = access.next_entry::<String, String>()? {
            table.insert(name, address);
        }
        Ok(table)
    }
}

impl Serialize for BotAddressTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.name, &entry.address)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for BotAddressTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(BotAddressTableVisitor)
    }
}

/// Contadores de transações por bot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BotTransactionCounts {
    counts: Vec<(String, u64)>,
}

impl BotTransactionCounts {
    /// Inicializa um contador zerado para cada bot da tabela
    pub fn for_table(table: &BotAddressTable) -> Self {
        Self {
            counts: table.names().map(|n| (n.to_string(), 0)).collect(),
        }
    }

    /// Incrementa o contador do bot. Nomes fora da tabela são ignorados.
    pub fn increment(&mut self, name: &str) -> bool {
        match self.counts.iter_mut().find(|(n, _)| n.as_str() == name) {
            Some((_, count)) => {
                *count += 1;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<u64> {
        self.counts.iter().find(|(n, _)| n.as_str() == name).map(|(_, c)| *c)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(n, c)| (n.as_str(), *c))
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|(_, c)| c).sum()
    }
}

/// Linha do relatório CSV
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvRow {
    #[serde(rename = "Signature")]
    pub signature: String,
    #[serde(rename = "BotName")]
    pub bot_name: String,
    #[serde(rename = "Fee")]
    pub fee: String,
}
