// ============================================================================
// Structure : CoinId
// ============================================================================
// Identifiant opaque d'une cryptomonnaie dans l'espace de noms du backend
// (ex: "BITCOIN", "ETHEREUM"). Seule contrainte locale : non vide.
//
// CONCEPT RUST : Newtype pattern
// - Un struct tuple qui enveloppe une String
// - Le type garantit l'invariant (non vide) une fois construit
// - Impossible de passer une date à la place d'une crypto par erreur
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifiant de cryptomonnaie (jamais vide)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoinId(String);

impl CoinId {
    /// Crée un identifiant, `None` si la chaîne est vide (après trim)
    ///
    /// CONCEPT RUST : Constructeur faillible
    /// - Retourne Option<Self> au lieu de paniquer
    /// - L'appelant décide quoi faire d'une saisie vide
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CoinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coin_id_rejects_empty() {
        assert!(CoinId::new("").is_none());
        assert!(CoinId::new("   ").is_none());
    }

    #[test]
    fn test_coin_id_trims() {
        let coin = CoinId::new("  BTC ").unwrap();
        assert_eq!(coin.as_str(), "BTC");
        assert_eq!(coin.to_string(), "BTC");
    }
}
