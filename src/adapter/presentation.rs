// ============================================================================
// Thèmes de présentation des cartes
// ============================================================================
// Chaque carte d'une grille reçoit un thème (dégradé + icône) selon sa
// position. Purement visuel, aucune signification métier.
//
// Règle : palette[index % palette.len()]
// - Avec 4 résultats et 4 thèmes, chaque carte a un thème distinct
// - Au-delà, les thèmes bouclent
// ============================================================================

use ratatui::style::Color;

/// Un thème de carte : dégradé (début -> fin) et icône
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub from: Color,
    pub to: Color,
    pub icon: &'static str,
}

const fn theme(from: (u8, u8, u8), to: (u8, u8, u8), icon: &'static str) -> Theme {
    Theme {
        from: Color::Rgb(from.0, from.1, from.2),
        to: Color::Rgb(to.0, to.1, to.2),
        icon,
    }
}

/// Page "Top cryptos" : quatre thèmes, une icône différente chacun
pub const TOP_CRYPTOS_PALETTE: &[Theme] = &[
    theme((74, 222, 128), (59, 130, 246), "₿"),  // vert -> bleu
    theme((244, 114, 182), (234, 179, 8), "Ξ"),  // rose -> jaune
    theme((79, 70, 229), (126, 34, 206), "$"),   // indigo -> violet
    theme((20, 184, 166), (6, 182, 212), "¤"),   // sarcelle -> cyan
];

/// Icône commune des cartes market cap
const COIN_ICON: &str = "◉";

/// Page "Market caps" : douze dégradés, même icône
pub const YEARLY_CAPS_PALETTE: &[Theme] = &[
    theme((244, 114, 182), (168, 85, 247), COIN_ICON),  // rose -> violet
    theme((45, 212, 191), (6, 182, 212), COIN_ICON),    // sarcelle -> cyan
    theme((96, 165, 250), (99, 102, 241), COIN_ICON),   // bleu -> indigo
    theme((250, 204, 21), (249, 115, 22), COIN_ICON),   // jaune -> orange
    theme((74, 222, 128), (20, 184, 166), COIN_ICON),   // vert -> sarcelle
    theme((129, 140, 248), (236, 72, 153), COIN_ICON),  // indigo -> rose
    theme((163, 230, 53), (236, 72, 153), COIN_ICON),   // citron vert -> rose
    theme((192, 132, 252), (79, 70, 229), COIN_ICON),   // violet -> indigo
    theme((248, 113, 113), (234, 179, 8), COIN_ICON),   // rouge -> jaune
    theme((251, 113, 133), (250, 204, 21), COIN_ICON),  // rose vif -> jaune
    theme((147, 197, 253), (45, 212, 191), COIN_ICON),  // bleu clair -> sarcelle
    theme((34, 211, 238), (13, 148, 136), COIN_ICON),   // cyan -> sarcelle foncé
];

/// Thème de la carte à la position `index` (boucle sur la palette)
///
/// Une palette vide n'existe pas dans ce crate : les deux palettes sont
/// des constantes non vides.
pub fn assign_presentation(palette: &'static [Theme], index: usize) -> &'static Theme {
    &palette[index % palette.len()]
}
