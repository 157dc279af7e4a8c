// ============================================================================
// Module : adapter
// ============================================================================
// Transformations pures : réponses brutes de l'API -> formes prêtes à
// afficher (séries de graphique, champs de résumé, thèmes de cartes).
//
// Aucune de ces fonctions n'a d'effet de bord ni d'état.
// ============================================================================

pub mod presentation; // Thèmes (dégradé + icône) par position
pub mod series;       // Séries labels + valeurs pour les graphiques
pub mod summary;      // Champs de résumé formatés (2 décimales)

pub use presentation::{assign_presentation, Theme, TOP_CRYPTOS_PALETTE, YEARLY_CAPS_PALETTE};
pub use series::{to_price_series, PriceSeries};
pub use summary::{format_market_cap, format_two_decimals, to_summary_view, SummaryView, Trend, NO_DATA};
