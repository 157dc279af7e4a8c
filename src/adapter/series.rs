// ============================================================================
// Séries de prix pour les graphiques
// ============================================================================
// CONCEPT RUST : Iterator chaining
// - .iter() : itère sur les points
// - .map() : transforme chaque point
// - .collect() : collecte en Vec
//
// Deux passes parallèles qui conservent l'ordre : l'index i des labels
// correspond toujours à l'index i des valeurs.
// ============================================================================

use crate::models::PricePoint;

/// Format d'affichage des dates sur l'axe X
pub const LABEL_FORMAT: &str = "%d/%m/%Y";

/// Série prête pour un graphique ligne
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl PriceSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Points (x, y) pour le widget Chart : x = position dans la série
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, &value)| (i as f64, value))
            .collect()
    }

    /// Bornes (min, max) des valeurs, None si la série est vide
    ///
    /// CONCEPT RUST : fold
    /// - Calcule min et max en un seul passage
    pub fn bounds(&self) -> Option<(f64, f64)> {
        if self.values.is_empty() {
            return None;
        }
        Some(self.values.iter().fold(
            (f64::MAX, f64::MIN),
            |(min, max), &v| (min.min(v), max.max(v)),
        ))
    }
}

/// Convertit une série temporelle en labels + valeurs
///
/// - labels : dates au format d'affichage (pas le format de l'API)
/// - values : prix inchangés (pas d'arrondi, pas de conversion)
/// - entrée vide -> deux séquences vides (graphique vide, pas une erreur)
pub fn to_price_series(points: &[PricePoint]) -> PriceSeries {
    PriceSeries {
        labels: points
            .iter()
            .map(|p| p.date.format(LABEL_FORMAT).to_string())
            .collect(),
        values: points.iter().map(|p| p.price).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use quickcheck_macros::quickcheck;

    fn point(day: u32, price: f64) -> PricePoint {
        PricePoint::new(NaiveDate::from_ymd_opt(2021, 1, day).unwrap(), price)
    }

    #[test]
    fn test_empty_series() {
        let series = to_price_series(&[]);
        assert!(series.labels.is_empty());
        assert!(series.values.is_empty());
        assert_eq!(series.bounds(), None);
    }

    #[test]
    fn test_three_points_keep_api_order() {
        // Ordre conservé tel quel : pas de tri local
        let points = vec![point(3, 30.5), point(1, 10.25), point(2, 20.0)];
        let series = to_price_series(&points);

        assert_eq!(series.labels, vec!["03/01/2021", "01/01/2021", "02/01/2021"]);
        assert_eq!(series.values, vec![30.5, 10.25, 20.0]);
        assert_eq!(series.bounds(), Some((10.25, 30.5)));
        assert_eq!(series.points()[2], (2.0, 20.0));
    }

    #[quickcheck]
    fn prop_series_is_index_aligned(prices: Vec<f64>) -> bool {
        let points: Vec<PricePoint> = prices
            .iter()
            .enumerate()
            .map(|(i, &p)| point((i % 28) as u32 + 1, p))
            .collect();
        let series = to_price_series(&points);

        series.labels.len() == points.len()
            && series.values.len() == points.len()
            && series
                .values
                .iter()
                .zip(&points)
                .all(|(v, p)| v.to_bits() == p.price.to_bits())
    }
}
