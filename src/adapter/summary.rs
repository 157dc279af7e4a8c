// ============================================================================
// Résumé de l'historique détaillé
// ============================================================================
// Formate les statistiques du backend pour l'affichage :
// - prix initial / final et variation : 2 décimales, arrondi "half-up"
// - champ absent (ou NaN / infini) : None, affiché comme "N/A"
//
// CONCEPT : Arrondi décimal vs binaire
// - 100.005 en f64 vaut en réalité 100.00499999999999545...
// - format!("{:.2}") arrondit la valeur binaire -> "100.00"
// - On repart de la représentation décimale la plus courte ("100.005")
//   et on arrondit avec rust_decimal -> "100.01"
// ============================================================================

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::SummaryStats;

/// Marqueur explicite pour une valeur absente
pub const NO_DATA: &str = "N/A";

/// Sens de la variation de prix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Flat,
    Unknown,
}

impl Trend {
    fn from_change(change: Option<f64>) -> Self {
        match change {
            Some(c) if !c.is_finite() => Trend::Unknown,
            Some(c) if c > 0.0 => Trend::Up,
            Some(c) if c < 0.0 => Trend::Down,
            Some(_) => Trend::Flat,
            None => Trend::Unknown,
        }
    }

    /// Flèche affichée à côté de la variation
    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Up => "▲",
            Trend::Down => "▼",
            Trend::Flat => "■",
            Trend::Unknown => "?",
        }
    }
}

/// Champs de résumé prêts à afficher
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryView {
    pub coin_name: Option<String>,
    /// "2021-01-01 → 2021-01-31" si les deux dates sont présentes
    pub period: Option<String>,
    pub initial_price: Option<String>,
    pub final_price: Option<String>,
    pub price_change_percentage: Option<String>,
    pub trend: Trend,
}

impl SummaryView {
    /// Valeur affichée pour un champ optionnel
    pub fn display(field: &Option<String>) -> &str {
        field.as_deref().unwrap_or(NO_DATA)
    }
}

/// Formate un nombre avec 2 décimales, arrondi "half-up" (loin de zéro)
///
/// Retourne None pour NaN et les infinis.
pub fn format_two_decimals(value: f64) -> Option<String> {
    if !value.is_finite() {
        return None;
    }

    // Display de f64 donne la plus courte représentation décimale exacte
    // au sens aller-retour, jamais de notation scientifique
    match Decimal::from_str(&value.to_string()) {
        Ok(decimal) => {
            let rounded = decimal.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            Some(format!("{rounded:.2}"))
        }
        // Hors de la plage de Decimal (~7.9e28) : arrondi binaire
        Err(_) => Some(format!("{value:.2}")),
    }
}

/// Convertit les statistiques brutes en champs affichables
pub fn to_summary_view(summary: &SummaryStats) -> SummaryView {
    let period = match (&summary.start_date, &summary.end_date) {
        (Some(start), Some(end)) => Some(format!("{start} → {end}")),
        _ => None,
    };

    SummaryView {
        coin_name: summary.coin_name.clone(),
        period,
        initial_price: summary.initial_price.and_then(format_two_decimals),
        final_price: summary.final_price.and_then(format_two_decimals),
        price_change_percentage: summary.price_change_percentage.and_then(format_two_decimals),
        trend: Trend::from_change(summary.price_change_percentage),
    }
}

/// Formate une market cap avec séparateurs de milliers (arrondie à l'unité)
///
/// Exemple : 1234567890.4 -> "1,234,567,890"
pub fn format_market_cap(value: f64) -> Option<String> {
    if !value.is_finite() {
        return None;
    }

    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_up_rounding() {
        assert_eq!(format_two_decimals(100.005).as_deref(), Some("100.01"));
        assert_eq!(format_two_decimals(2.675).as_deref(), Some("2.68"));
        assert_eq!(format_two_decimals(100.004).as_deref(), Some("100.00"));
        assert_eq!(format_two_decimals(-12.345).as_deref(), Some("-12.35"));
        assert_eq!(format_two_decimals(42.0).as_deref(), Some("42.00"));
        assert_eq!(format_two_decimals(f64::NAN), None);
        assert_eq!(format_two_decimals(f64::INFINITY), None);
    }

    #[test]
    fn test_summary_view_complete() {
        let stats = SummaryStats {
            coin_name: Some("BTC".to_string()),
            start_date: Some("2021-01-01".to_string()),
            end_date: Some("2021-01-31".to_string()),
            initial_price: Some(100.005),
            final_price: Some(112.5),
            price_change_percentage: Some(12.494),
        };

        let view = to_summary_view(&stats);
        assert_eq!(view.initial_price.as_deref(), Some("100.01"));
        assert_eq!(view.final_price.as_deref(), Some("112.50"));
        assert_eq!(view.price_change_percentage.as_deref(), Some("12.49"));
        assert_eq!(view.period.as_deref(), Some("2021-01-01 → 2021-01-31"));
        assert_eq!(view.trend, Trend::Up);
    }

    #[test]
    fn test_summary_view_missing_fields() {
        let view = to_summary_view(&SummaryStats::default());
        assert_eq!(view.initial_price, None);
        assert_eq!(SummaryView::display(&view.initial_price), NO_DATA);
        assert_eq!(view.period, None);
        assert_eq!(view.trend, Trend::Unknown);
    }

    #[test]
    fn test_trend() {
        assert_eq!(Trend::from_change(Some(-3.0)), Trend::Down);
        assert_eq!(Trend::from_change(Some(0.0)), Trend::Flat);
        assert_eq!(Trend::from_change(Some(f64::NAN)), Trend::Unknown);
    }

    #[test]
    fn test_market_cap_separators() {
        assert_eq!(format_market_cap(0.0).as_deref(), Some("0"));
        assert_eq!(format_market_cap(999.0).as_deref(), Some("999"));
        assert_eq!(format_market_cap(1000.0).as_deref(), Some("1,000"));
        assert_eq!(format_market_cap(1234567890.4).as_deref(), Some("1,234,567,890"));
        assert_eq!(format_market_cap(1.2e12).as_deref(), Some("1,200,000,000,000"));
        assert_eq!(format_market_cap(-1500.0).as_deref(), Some("-1,500"));
        assert_eq!(format_market_cap(f64::NAN), None);
    }
}
