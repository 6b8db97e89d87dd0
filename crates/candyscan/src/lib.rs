/*! Candyscan
 *
 * Crate para atribuir os mints de uma Candy Machine na Solana a bots
 * conhecidos. O histórico de assinaturas é paginado dentro de uma janela de
 * tempo, cada transação é resolvida em lotes e classificada pelo endereço da
 * sua primeira address lookup table.
 */

pub mod classifier;
pub mod collector;
pub mod config;
pub mod filters;
pub mod pipeline;
pub mod report;

pub use classifier::{Classification, TransactionClassifier};
pub use config::{AppConfig, RelevancePolicy};
pub use report::MintReport;
