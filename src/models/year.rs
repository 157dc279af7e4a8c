// ============================================================================
// Structure : Year
// ============================================================================
// Année utilisée par les pages "Top cryptos" et "Market caps"
//
// CONCEPT : Cycle d'états (comme un sélecteur)
// - Le sélecteur propose 2015..=2024
// - next() / previous() bouclent dans cet intervalle
// - Une année hors intervalle reste constructible (l'API décide)
// ============================================================================

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Année sur quatre chiffres
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Year(u16);

impl Year {
    /// Années proposées par le sélecteur
    pub const SELECTABLE: RangeInclusive<u16> = 2015..=2024;

    pub const fn new(year: u16) -> Self {
        Self(year)
    }

    pub fn value(&self) -> u16 {
        self.0
    }

    /// Paramètre envoyé à l'API : chaîne de quatre chiffres
    pub fn as_param(&self) -> String {
        format!("{:04}", self.0)
    }

    /// Toutes les années du sélecteur, dans l'ordre
    pub fn all() -> Vec<Year> {
        Self::SELECTABLE.map(Year).collect()
    }

    /// Année suivante (boucle 2024 → 2015)
    pub fn next(&self) -> Year {
        let (first, last) = (*Self::SELECTABLE.start(), *Self::SELECTABLE.end());
        if self.0 < first || self.0 >= last {
            Year(first)
        } else {
            Year(self.0 + 1)
        }
    }

    /// Année précédente (boucle 2015 → 2024)
    pub fn previous(&self) -> Year {
        let (first, last) = (*Self::SELECTABLE.start(), *Self::SELECTABLE.end());
        if self.0 <= first || self.0 > last {
            Year(last)
        } else {
            Year(self.0 - 1)
        }
    }
}

impl Default for Year {
    /// Année par défaut des deux pages : 2020
    fn default() -> Self {
        Year(2020)
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}
