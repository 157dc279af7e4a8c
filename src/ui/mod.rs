// ============================================================================
// Module : ui
// ============================================================================
// Gère toute l'interface utilisateur (Terminal User Interface)
// ============================================================================

pub mod chart;     // Graphique ligne + panneaux chargement/erreur
pub mod dashboard; // Onglets, routage par écran, pied de page
pub mod detail;    // Page détail : filtres, résumé, graphique
pub mod events;    // Gestion des événements clavier
pub mod grids;     // Pages par année : grilles de cartes

// Re-exports pour simplifier les imports
pub use dashboard::render;
pub use events::{Event, EventHandler};
