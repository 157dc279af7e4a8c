// ============================================================================
// FetchController : filtres -> chargement -> état tri-état
// ============================================================================
// Le même schéma sert les trois pages :
// 1. L'utilisateur modifie un filtre (crypto, dates, année)
// 2. Un déclencheur (bouton ou changement d'année) lance UN chargement
// 3. La page affiche {loading, error, data}
//
// CONCEPT : Jeton de génération ("le dernier filtre gagne")
// - Chaque chargement lancé reçoit un numéro croissant
// - À la complétion, un résultat dont le numéro n'est pas le dernier
//   est jeté : une réponse lente ne peut plus écraser une plus récente
//
// CONCEPT RUST : Générique sur (filtre, résultat)
// - FetchController<F, T> : F décrit les filtres, T le résultat
// - Une seule implémentation, réutilisée par composition dans chaque page
// ============================================================================

use std::future::Future;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{ErrorKind, FetchError, FilterError};
use crate::models::{normalize_date, CoinId, DateRange, Year};

// ============================================================================
// Trait Filter
// ============================================================================

/// Un ensemble de filtres capable de produire une requête
pub trait Filter: Default {
    /// Ce dont l'appel à l'API a besoin
    type Request: Clone;

    /// None si un filtre requis manque (aucun chargement ne sera lancé)
    fn request(&self) -> Option<Self::Request>;
}

/// Pas de filtre : chargements au montage (liste des cryptos, vue d'ensemble)
impl Filter for () {
    type Request = ();

    fn request(&self) -> Option<()> {
        Some(())
    }
}

/// Champ modifiable de la page détail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailField {
    Coin,
    StartDate,
    EndDate,
}

/// Filtres de la page détail : crypto + intervalle de dates, tous requis
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailFilter {
    pub coin: Option<CoinId>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// Requête de la page détail
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRequest {
    pub coin: CoinId,
    pub range: DateRange,
}

impl DetailFilter {
    /// Met à jour un champ depuis une saisie texte
    ///
    /// - chaîne vide : le champ redevient absent
    /// - date : normalisée (forme canonique AAAA-MM-JJ à l'envoi)
    /// - date invalide : erreur, le champ garde sa valeur précédente
    pub fn set(&mut self, field: DetailField, value: &str) -> Result<(), FilterError> {
        match field {
            DetailField::Coin => self.coin = CoinId::new(value),
            DetailField::StartDate => self.start = parse_optional_date(value)?,
            DetailField::EndDate => self.end = parse_optional_date(value)?,
        }
        Ok(())
    }
}

fn parse_optional_date(value: &str) -> Result<Option<NaiveDate>, FilterError> {
    if value.trim().is_empty() {
        Ok(None)
    } else {
        normalize_date(value).map(Some)
    }
}

impl Filter for DetailFilter {
    type Request = HistoryRequest;

    fn request(&self) -> Option<HistoryRequest> {
        // Pas de contrôle début <= fin : le backend décide
        Some(HistoryRequest {
            coin: self.coin.clone()?,
            range: DateRange::new(self.start?, self.end?),
        })
    }
}

/// Filtre des pages "par année" : toujours présent (2020 par défaut)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct YearFilter {
    pub year: Year,
}

impl Filter for YearFilter {
    type Request = Year;

    fn request(&self) -> Option<Year> {
        Some(self.year)
    }
}

// ============================================================================
// État tri-état
// ============================================================================

/// État affiché par une page : chargement, erreur, données
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    pub loading: bool,
    pub error: Option<FetchError>,
    pub data: Option<T>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            loading: false,
            error: None,
            data: None,
        }
    }
}

/// Chargement lancé : numéro de génération + requête à exécuter
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket<R> {
    pub generation: u64,
    pub request: R,
}

// ============================================================================
// FetchController
// ============================================================================

/// Contrôleur de chargement d'une page
#[derive(Debug)]
pub struct FetchController<F: Filter, T> {
    filter: F,
    state: FetchState<T>,
    generation: u64,
    kind: ErrorKind,
}

impl<F: Filter, T> FetchController<F, T> {
    /// Crée un contrôleur avec les filtres par défaut
    ///
    /// `kind` choisit le message statique montré en cas d'échec
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            filter: F::default(),
            state: FetchState::default(),
            generation: 0,
            kind,
        }
    }

    pub fn filter(&self) -> &F {
        &self.filter
    }

    /// Accès mutable aux filtres (mise à jour pure, aucun chargement)
    pub fn filter_mut(&mut self) -> &mut F {
        &mut self.filter
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    pub fn data(&self) -> Option<&T> {
        self.state.data.as_ref()
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.state.error.as_ref()
    }

    /// Message statique à afficher si le dernier chargement a échoué
    pub fn error_message(&self) -> Option<&'static str> {
        self.state.error.as_ref().map(|_| self.kind.user_message())
    }

    /// Numéro du dernier chargement lancé
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Valide les filtres et lance un chargement
    ///
    /// - Filtres incomplets : None, état inchangé
    /// - Sinon : nouvelle génération, loading = true, error = None
    ///   (les données précédentes restent jusqu'à la complétion)
    pub fn begin(&mut self) -> Option<Ticket<F::Request>> {
        let request = self.filter.request()?;

        self.generation += 1;
        self.state.loading = true;
        self.state.error = None;

        debug!(generation = self.generation, "Fetch started");
        Some(Ticket {
            generation: self.generation,
            request,
        })
    }

    /// Applique le résultat d'un chargement
    ///
    /// Retourne false si le résultat est périmé (génération dépassée) :
    /// il est alors ignoré et l'état n'est pas touché.
    pub fn complete(&mut self, generation: u64, result: Result<T, FetchError>) -> bool {
        if generation != self.generation {
            debug!(
                generation,
                latest = self.generation,
                "Discarding stale fetch result"
            );
            return false;
        }

        match result {
            Ok(data) => {
                self.state.data = Some(data);
                self.state.error = None;
            }
            Err(error) => {
                // Pas de données partielles : l'erreur remplace le contenu
                self.state.data = None;
                self.state.error = Some(error);
            }
        }
        self.state.loading = false;
        true
    }

    /// Lance, attend et applique un chargement en une seule étape
    ///
    /// CONCEPT RUST : FnOnce + Future générique
    /// - `fetch` reçoit la requête et retourne une future
    /// - Si les filtres sont incomplets, `fetch` n'est jamais appelée
    pub async fn submit<Fetch, Fut>(&mut self, fetch: Fetch) -> bool
    where
        Fetch: FnOnce(F::Request) -> Fut,
        Fut: Future<Output = Result<T, FetchError>>,
    {
        let Some(ticket) = self.begin() else {
            debug!("Filters incomplete, fetch skipped");
            return false;
        };
        let result = fetch(ticket.request).await;
        self.complete(ticket.generation, result)
    }

    /// Remet filtres et état à zéro (la page est quittée)
    ///
    /// La génération avance : un chargement encore en vol sera ignoré.
    pub fn reset(&mut self) {
        self.filter = F::default();
        self.state = FetchState::default();
        self.generation += 1;
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn detail_controller() -> FetchController<DetailFilter, Vec<f64>> {
        FetchController::new(ErrorKind::FetchData)
    }

    fn fill(filter: &mut DetailFilter) {
        filter.set(DetailField::Coin, "BTC").unwrap();
        filter.set(DetailField::StartDate, "2021-01-01").unwrap();
        filter.set(DetailField::EndDate, "31/01/2021").unwrap();
    }

    #[test]
    fn test_missing_filter_does_not_begin() {
        let mut controller = detail_controller();
        controller.filter_mut().set(DetailField::Coin, "BTC").unwrap();
        controller.filter_mut().set(DetailField::StartDate, "2021-01-01").unwrap();

        assert!(controller.begin().is_none());
        assert!(!controller.is_loading());
        assert_eq!(controller.generation(), 0);
    }

    #[test]
    fn test_begin_and_complete_success() {
        let mut controller = detail_controller();
        fill(controller.filter_mut());

        let ticket = controller.begin().unwrap();
        assert!(controller.is_loading());
        assert_eq!(ticket.request.coin.as_str(), "BTC");
        assert_eq!(
            ticket.request.range.as_params(),
            ("2021-01-01".to_string(), "2021-01-31".to_string())
        );

        assert!(controller.complete(ticket.generation, Ok(vec![1.0, 2.0])));
        assert!(!controller.is_loading());
        assert_eq!(controller.data(), Some(&vec![1.0, 2.0]));
        assert_eq!(controller.error_message(), None);
    }

    #[test]
    fn test_error_clears_previous_data() {
        let mut controller = detail_controller();
        fill(controller.filter_mut());

        let first = controller.begin().unwrap();
        controller.complete(first.generation, Ok(vec![1.0]));

        let second = controller.begin().unwrap();
        // Données précédentes conservées pendant le chargement
        assert_eq!(controller.data(), Some(&vec![1.0]));
        assert_eq!(controller.error(), None);

        controller.complete(second.generation, Err(FetchError::Status(404)));
        assert_eq!(controller.data(), None);
        assert_eq!(controller.error(), Some(&FetchError::Status(404)));
        assert_eq!(
            controller.error_message(),
            Some(ErrorKind::FetchData.user_message())
        );
    }

    #[test]
    fn test_latest_generation_wins() {
        let mut controller: FetchController<YearFilter, &str> =
            FetchController::new(ErrorKind::FetchData);

        let first = controller.begin().unwrap();
        controller.filter_mut().year = Year::new(2021);
        let second = controller.begin().unwrap();
        assert_eq!(second.request, Year::new(2021));

        // La réponse la plus récente arrive en premier
        assert!(controller.complete(second.generation, Ok("2021")));
        // L'ancienne arrive ensuite : ignorée
        assert!(!controller.complete(first.generation, Ok("2020")));
        assert_eq!(controller.data(), Some(&"2021"));
        assert!(!controller.is_loading());
    }

    #[test]
    fn test_stale_result_keeps_loading() {
        let mut controller: FetchController<YearFilter, &str> =
            FetchController::new(ErrorKind::FetchData);

        let first = controller.begin().unwrap();
        let _second = controller.begin().unwrap();

        assert!(!controller.complete(first.generation, Ok("old")));
        assert!(controller.is_loading());
        assert_eq!(controller.data(), None);
    }

    #[test]
    fn test_reset_invalidates_in_flight() {
        let mut controller = detail_controller();
        fill(controller.filter_mut());
        let ticket = controller.begin().unwrap();

        controller.reset();
        assert_eq!(controller.filter(), &DetailFilter::default());
        assert!(!controller.complete(ticket.generation, Ok(vec![1.0])));
        assert_eq!(controller.data(), None);
    }

    #[test]
    fn test_invalid_date_keeps_previous_value() {
        let mut filter = DetailFilter::default();
        filter.set(DetailField::StartDate, "2021-01-01").unwrap();

        assert!(filter.set(DetailField::StartDate, "pas une date").is_err());
        assert_eq!(filter.start, NaiveDate::from_ymd_opt(2021, 1, 1));

        filter.set(DetailField::StartDate, "").unwrap();
        assert_eq!(filter.start, None);
    }

    #[test]
    fn test_end_before_start_is_not_rejected() {
        let mut filter = DetailFilter::default();
        filter.set(DetailField::Coin, "ETH").unwrap();
        filter.set(DetailField::StartDate, "2021-02-01").unwrap();
        filter.set(DetailField::EndDate, "2021-01-01").unwrap();
        assert!(filter.request().is_some());
    }

    #[tokio::test]
    async fn test_submit_without_coin_makes_no_call() {
        let calls = Cell::new(0);
        let mut controller = detail_controller();
        controller.filter_mut().set(DetailField::StartDate, "2021-01-01").unwrap();
        controller.filter_mut().set(DetailField::EndDate, "2021-01-31").unwrap();

        let applied = controller
            .submit(|_request| {
                calls.set(calls.get() + 1);
                async { Ok(vec![]) }
            })
            .await;

        assert!(!applied);
        assert_eq!(calls.get(), 0);
        assert_eq!(controller.state(), &FetchState::default());
    }

    #[tokio::test]
    async fn test_submit_applies_result() {
        let mut controller = detail_controller();
        fill(controller.filter_mut());

        let applied = controller
            .submit(|request| async move {
                assert_eq!(request.coin.as_str(), "BTC");
                Ok(vec![10.0, 11.0, 12.0])
            })
            .await;

        assert!(applied);
        assert_eq!(controller.data().map(Vec::len), Some(3));
    }
}
