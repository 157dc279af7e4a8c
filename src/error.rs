// ============================================================================
// Erreurs de la bibliothèque
// ============================================================================
// CONCEPT RUST : thiserror
// - #[derive(Error)] génère l'implémentation de std::error::Error
// - #[error("...")] définit le message Display
// - anyhow reste réservé au binaire (main, terminal, logging)
//
// Côté utilisateur, deux catégories seulement :
// - LoadList : échec du chargement de la liste des cryptos
// - FetchData : échec d'un chargement de données (réseau, serveur ou
//   "aucune ligne" confondus)
// ============================================================================

use thiserror::Error;

/// Échec d'un appel à l'API de données
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Échec réseau (connexion, DNS, timeout éventuel)
    #[error("échec de la requête HTTP : {0}")]
    Transport(String),

    /// Réponse non 2xx
    #[error("le serveur a retourné HTTP {0}")]
    Status(u16),

    /// Corps de réponse illisible
    #[error("réponse JSON invalide : {0}")]
    Decode(String),

    /// Corps vide ou absent
    #[error("réponse vide")]
    Empty,
}

/// Catégorie d'erreur visible par l'utilisateur
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    LoadList,
    FetchData,
}

impl ErrorKind {
    /// Message statique affiché à la place du contenu
    pub fn user_message(&self) -> &'static str {
        match self {
            ErrorKind::LoadList => "Erreur lors du chargement des cryptomonnaies.",
            ErrorKind::FetchData => "Aucune information pour les données saisies.",
        }
    }
}

/// Saisie de filtre invalide
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("date invalide : {0:?} (formats acceptés : AAAA-MM-JJ, JJ/MM/AAAA)")]
    InvalidDate(String),
}

/// Configuration invalide (variables d'environnement)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var} doit être une URL http(s), reçu {value:?}")]
    InvalidUrl { var: &'static str, value: String },

    #[error("{var} doit être un nombre de secondes > 0, reçu {value:?}")]
    InvalidTimeout { var: &'static str, value: String },
}
