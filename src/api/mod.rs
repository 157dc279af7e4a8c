// ============================================================================
// Module : api
// ============================================================================
// Contrat de l'API de données crypto consommée par le tableau de bord,
// et son implémentation HTTP (BackendClient).
//
// CONCEPT RUST : Trait à la frontière
// - Les contrôleurs et le worker ne connaissent que le trait CryptoApi
// - Les tests fournissent une implémentation en mémoire
// - `impl Future + Send` : les futures peuvent être spawnées sur tokio
// ============================================================================

use std::future::Future;

use crate::error::FetchError;
use crate::models::{
    CoinId, DateRange, DetailedHistory, MarketOverview, TopCryptoEntry, Year, YearlyCapEntry,
};

pub mod backend; // Client HTTP (reqwest)

pub use backend::BackendClient;

/// Les appels exposés par le backend
pub trait CryptoApi: Send + Sync {
    /// Liste de tous les identifiants de cryptos (page détail, au montage)
    fn list_coin_identifiers(&self) -> impl Future<Output = Result<Vec<CoinId>, FetchError>> + Send;

    /// Historique détaillé d'une crypto sur un intervalle de dates
    fn get_detailed_history(
        &self,
        coin: CoinId,
        range: DateRange,
    ) -> impl Future<Output = Result<DetailedHistory, FetchError>> + Send;

    /// Les 4 cryptos les plus intéressantes d'une année
    fn get_top_cryptos_for_year(
        &self,
        year: Year,
    ) -> impl Future<Output = Result<Vec<TopCryptoEntry>, FetchError>> + Send;

    /// Market caps de toutes les cryptos pour une année
    fn get_market_caps_for_year(
        &self,
        year: Year,
    ) -> impl Future<Output = Result<Vec<YearlyCapEntry>, FetchError>> + Send;

    /// Vue d'ensemble du jeu de données (nombre de cryptos, prix moyen)
    fn get_market_overview(&self) -> impl Future<Output = Result<MarketOverview, FetchError>> + Send;
}
