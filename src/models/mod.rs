// ============================================================================
// Module : models
// ============================================================================
// Ce module contient toutes les structures de données du tableau de bord
//
// CONCEPT RUST : Modules et visibilité
// - "pub mod" : déclare un sous-module public (accessible depuis l'extérieur)
// - Sans "pub", le module serait privé au crate
// ============================================================================

pub mod coin;    // Identifiant de cryptomonnaie
pub mod date;    // Dates calendaires (parsing, normalisation)
pub mod history; // Historique détaillé : points de prix + résumé
pub mod market;  // Top cryptos par année, market caps, vue d'ensemble
pub mod year;    // Année sélectionnable (2015..2024)

// Re-export des structures principales pour simplifier les imports
// Au lieu de : use cryptodash::models::coin::CoinId;
// On peut faire : use cryptodash::models::CoinId;
pub use coin::CoinId;
pub use date::{normalize_date, parse_calendar_date, DateRange};
pub use history::{DetailedHistory, PricePoint, SummaryStats};
pub use market::{MarketOverview, TopCryptoEntry, YearlyCapEntry};
pub use year::Year;
