/*!
 * Candyscan Traits
 * 
 * Traits comuns usados em toda a workspace Candyscan
 */

use async_trait::async_trait;
use crate::error::Result;
use crate::types::{SignatureRecord, TransactionRecord};

/// Trait para clientes de node Solana
#[async_trait]
pub trait NodeClient: Send + Sync {
    /// Obtém até `limit` assinaturas do endereço anteriores ao cursor `before`,
    /// da mais recente para a mais antiga
    async fn get_signatures_for_address(
        &self,
        address: &str,
        before: Option<&str>,
        limit: usize,
    ) -> Result<Vec<SignatureRecord>>;

    /// Obtém a transação parseada. `None` quando o node não a conhece.
    async fn get_parsed_transaction(&self, signature: &str) -> Result<Option<TransactionRecord>>;
}

