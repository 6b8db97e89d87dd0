//! Coleta paginada de assinaturas dentro de uma janela de tempo.

use candyscan_core::{error::Result, traits::NodeClient, SignatureRecord, TimeWindow};
use tracing::debug;

/// Tamanho máximo de página aceito por `getSignaturesForAddress`
pub const PAGE_LIMIT: usize = 1000;

/// Percorre o histórico do endereço do mais recente para o mais antigo e
/// devolve as assinaturas cujo block time está dentro da janela.
///
/// A paginação termina quando o node devolve uma página vazia ou quando a
/// assinatura mais antiga da página é anterior ao início da janela. Erros de
/// RPC são propagados sem retentativa.
pub async fn collect_signatures<C: NodeClient + ?Sized>(
    client: &C,
    address: &str,
    window: TimeWindow,
) -> Result<Vec<SignatureRecord>> {
    let mut collected = Vec::new();
    let mut before: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page = client
            .get_signatures_for_address(address, before.as_deref(), PAGE_LIMIT)
            .await?;
        pages += 1;

        let Some(oldest) = page.last() else {
            break;
        };
        let reached_start = window.precedes(oldest.block_time);
        let cursor = oldest.signature.clone();

        let page_len = page.len();
        collected.extend(page.into_iter().filter(|s| window.contains(s.block_time)));
        debug!(page = pages, page_len, total = collected.len(), "Página processada");

        if reached_start {
            break;
        }
        before = Some(cursor);
    }

    Ok(collected)
}
