/*!
 * Candyscan Utils
 * 
 * Utilitários comuns usados em toda a workspace Candyscan
 */

/// Lamports em 1 SOL
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Formata uma quantia em lamports como SOL com exatamente 9 casas decimais
pub fn format_lamports(lamports: u64) -> String {
    format!("{}.{:09}", lamports / LAMPORTS_PER_SOL, lamports % LAMPORTS_PER_SOL)
}

/// Converte lamports para SOL (com perda de precisão para valores grandes)
pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}

/// Verifica se alguma linha de log começa com um dos marcadores
pub fn has_log_marker<S: AsRef<str>>(logs: &[String], markers: &[S]) -> bool {
    logs.iter()
        .any(|line| markers.iter().any(|m| line.starts_with(m.as_ref())))
}
