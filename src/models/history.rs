// ============================================================================
// Structures : PricePoint, SummaryStats, DetailedHistory
// ============================================================================
// Réponse de l'historique détaillé d'une crypto sur un intervalle de dates
//
// CONCEPTS RUST :
// 1. #[serde(default)] : champ absent du JSON -> valeur par défaut
// 2. Option<f64> : un prix peut manquer, on ne l'invente pas
// 3. #[serde(deserialize_with)] : parsing de date personnalisé
// ============================================================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::date::deserialize_calendar_date;

/// Un point de la série temporelle (date, prix)
///
/// Les enregistrements du backend contiennent d'autres colonnes
/// (market_cap, total_volume, ...) : serde les ignore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    #[serde(deserialize_with = "deserialize_calendar_date")]
    pub date: NaiveDate,
    pub price: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }
}

/// Statistiques calculées par le backend (jamais recalculées ici)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryStats {
    pub coin_name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub initial_price: Option<f64>,
    pub final_price: Option<f64>,
    pub price_change_percentage: Option<f64>,
}

/// Réponse complète de l'historique détaillé
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailedHistory {
    pub summary: SummaryStats,
    /// Ordre conservé tel que renvoyé par l'API (pas de tri local)
    pub data: Vec<PricePoint>,
}

impl DetailedHistory {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
