// ============================================================================
// Structures : TopCryptoEntry, YearlyCapEntry, MarketOverview
// ============================================================================
// Données des deux pages "par année" et de la vue d'ensemble du marché
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::models::PricePoint;

/// Une des cryptos "les plus intéressantes" d'une année
/// (les 4 plus fortes variations en valeur absolue, choisies par le backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopCryptoEntry {
    pub coin_name: String,

    /// Variation sur l'année en pourcentage
    #[serde(default)]
    pub price_change: Option<f64>,

    #[serde(default)]
    pub data: Vec<PricePoint>,
}

/// Market cap d'une crypto pour une année
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyCapEntry {
    pub coin_name: String,
    pub market_cap: f64,
}

/// Vue d'ensemble du jeu de données (endpoint /summary)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketOverview {
    pub total_cryptos: u64,
    pub average_price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_entry_without_change() {
        let entry: TopCryptoEntry = serde_json::from_str(
            r#"{"coin_name": "SOLANA", "data": [{"date": "2020-04-10", "price": 0.95}]}"#,
        )
        .unwrap();
        assert_eq!(entry.price_change, None);
        assert_eq!(entry.data.len(), 1);
    }

    #[test]
    fn test_yearly_cap_entry() {
        let entry: YearlyCapEntry =
            serde_json::from_str(r#"{"coin_name": "BITCOIN", "market_cap": 1.2e12}"#).unwrap();
        assert_eq!(entry.market_cap, 1.2e12);
    }
}
