// ============================================================================
// Dates calendaires
// ============================================================================
// Le backend parle en dates "YYYY-MM-DD" pour les paramètres, mais ses
// réponses mélangent les formats :
// - "2021-01-01" pour le top par année (strftime côté serveur)
// - "Fri, 01 Jan 2021 00:00:00 GMT" pour l'historique détaillé
//   (l'encodeur JSON du serveur sérialise les datetime en HTTP-date)
//
// On ramène tout à chrono::NaiveDate : une date sans heure ni fuseau.
// ============================================================================

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::FilterError;

/// Format canonique des dates envoyées à l'API
pub const CANONICAL_FORMAT: &str = "%Y-%m-%d";

/// Intervalle de dates (début, fin)
///
/// Aucun invariant : une fin antérieure au début n'est pas rejetée
/// localement, le backend décide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Paramètres au format canonique (start, end)
    pub fn as_params(&self) -> (String, String) {
        (
            self.start.format(CANONICAL_FORMAT).to_string(),
            self.end.format(CANONICAL_FORMAT).to_string(),
        )
    }
}

/// Parse une date renvoyée par le backend, quel que soit son format
///
/// CONCEPT RUST : Chaîne de tentatives avec early return
/// - On essaie le format le plus fréquent d'abord
/// - Chaque `if let Ok(..)` retourne dès qu'un format marche
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, CANONICAL_FORMAT) {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.date_naive());
    }
    // ISO sans fuseau : "2021-01-01T00:00:00" ou "2021-01-01 00:00:00"
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(datetime.date());
        }
    }
    if let Ok(datetime) = DateTime::parse_from_rfc2822(raw) {
        return Some(datetime.date_naive());
    }

    None
}

/// Normalise une saisie utilisateur en date calendaire
///
/// Accepte "2021-01-31", "31/01/2021", "2021/01/31" et les datetime ISO.
/// La forme canonique s'obtient ensuite avec `CANONICAL_FORMAT`.
pub fn normalize_date(input: &str) -> Result<NaiveDate, FilterError> {
    let trimmed = input.trim();

    for format in ["%d/%m/%Y", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date);
        }
    }

    parse_calendar_date(trimmed).ok_or_else(|| FilterError::InvalidDate(trimmed.to_string()))
}

/// Désérialiseur serde pour les champs date des réponses du backend
pub(crate) fn deserialize_calendar_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_calendar_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("date invalide : {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_backend_formats() {
        assert_eq!(parse_calendar_date("2021-01-01"), Some(ymd(2021, 1, 1)));
        assert_eq!(
            parse_calendar_date("Fri, 01 Jan 2021 00:00:00 GMT"),
            Some(ymd(2021, 1, 1))
        );
        assert_eq!(
            parse_calendar_date("2021-01-31T00:00:00Z"),
            Some(ymd(2021, 1, 31))
        );
        assert_eq!(
            parse_calendar_date("2021-01-31 00:00:00"),
            Some(ymd(2021, 1, 31))
        );
        assert_eq!(parse_calendar_date("demain"), None);
    }

    #[test]
    fn test_normalize_user_input() {
        assert_eq!(normalize_date("31/01/2021").unwrap(), ymd(2021, 1, 31));
        assert_eq!(normalize_date("2021/01/31").unwrap(), ymd(2021, 1, 31));
        assert_eq!(normalize_date(" 2021-01-31 ").unwrap(), ymd(2021, 1, 31));
        assert!(matches!(
            normalize_date("2021-13-01"),
            Err(FilterError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_range_params_are_canonical() {
        // Fin avant début : accepté tel quel
        let range = DateRange::new(ymd(2021, 2, 1), ymd(2021, 1, 1));
        assert_eq!(
            range.as_params(),
            ("2021-02-01".to_string(), "2021-01-01".to_string())
        );
    }
}
