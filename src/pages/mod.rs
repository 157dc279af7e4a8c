// ============================================================================
// Module : pages
// ============================================================================
// État de chaque page du tableau de bord. Toutes suivent le même schéma
// (filtres -> chargement -> tri-état) en composant un FetchController.
// ============================================================================

pub mod detail;     // Page détail : crypto + dates -> résumé + graphique
pub mod year_page;  // Pages par année : top cryptos, market caps

pub use detail::{DetailPage, Focus};
pub use year_page::{TopCryptosPage, YearPage, YearlyCapsPage, YearlyDataset};
