// ============================================================================
// CryptoDash - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests d'intégration
// ============================================================================

pub mod adapter;   // Réponses brutes -> formes affichables
pub mod api;       // Client du backend de données crypto
pub mod app;       // État de l'application
pub mod config;    // Configuration (variables d'environnement)
pub mod error;     // Erreurs typées
pub mod fetch;     // FetchController : filtres -> chargement -> tri-état
pub mod models;    // Structures de données
pub mod pages;     // État de chaque écran
pub mod ui;        // Interface utilisateur
pub mod worker;    // Thread des appels HTTP
