// ============================================================================
// Page : Détail d'une crypto
// ============================================================================
// - Au montage : charge la liste des cryptos disponibles
// - L'utilisateur choisit une crypto, une date de début et une date de fin
// - Entrée : lance la recherche (seulement si les trois sont renseignés)
// - Affiche le résumé (prix initial/final, variation) et le graphique
//
// CONCEPT : Champ focalisé (comme un formulaire)
// - Tab fait tourner le focus Crypto -> Début -> Fin
// - Les dates sont saisies en texte puis normalisées en quittant le champ
// ============================================================================

use tracing::{info, warn};

use crate::adapter::{to_price_series, to_summary_view, PriceSeries, SummaryView};
use crate::error::{ErrorKind, FetchError, FilterError};
use crate::fetch::{DetailField, DetailFilter, FetchController};
use crate::models::{CoinId, DetailedHistory};
use crate::worker::Command;

/// Champ du formulaire qui reçoit la saisie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Coin,
    StartDate,
    EndDate,
}

impl Focus {
    /// Champ suivant (boucle)
    pub fn next(&self) -> Focus {
        match self {
            Focus::Coin => Focus::StartDate,
            Focus::StartDate => Focus::EndDate,
            Focus::EndDate => Focus::Coin,
        }
    }

    pub fn is_date(&self) -> bool {
        matches!(self, Focus::StartDate | Focus::EndDate)
    }
}

/// État de la page détail
#[derive(Debug)]
pub struct DetailPage {
    /// Liste des cryptos sélectionnables
    pub coins: FetchController<(), Vec<CoinId>>,

    /// Historique de la crypto sélectionnée
    pub history: FetchController<DetailFilter, DetailedHistory>,

    pub focus: Focus,

    /// Position dans la liste des cryptos (None : rien de sélectionné)
    pub coin_cursor: Option<usize>,

    /// Saisies en cours des dates (texte brut)
    pub start_input: String,
    pub end_input: String,

    /// Dernière saisie de date refusée
    pub input_error: Option<FilterError>,
}

impl DetailPage {
    pub fn new() -> Self {
        Self {
            coins: FetchController::new(ErrorKind::LoadList),
            history: FetchController::new(ErrorKind::FetchData),
            focus: Focus::default(),
            coin_cursor: None,
            start_input: String::new(),
            end_input: String::new(),
            input_error: None,
        }
    }

    /// Montage de la page : tout est remis à zéro, la liste est rechargée
    pub fn mount(&mut self) -> Option<Command> {
        self.coins.reset();
        self.history.reset();
        self.focus = Focus::default();
        self.coin_cursor = None;
        self.start_input.clear();
        self.end_input.clear();
        self.input_error = None;

        self.coins
            .begin()
            .map(|ticket| Command::LoadCoinList {
                generation: ticket.generation,
            })
    }

    /// Cryptos disponibles (vide tant que la liste n'est pas chargée)
    pub fn available_coins(&self) -> &[CoinId] {
        self.coins.data().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn selected_coin(&self) -> Option<&CoinId> {
        self.history.filter().coin.as_ref()
    }

    // ========================================================================
    // Sélection de la crypto
    // ========================================================================

    /// Crypto suivante dans la liste (la première si rien n'est sélectionné)
    pub fn select_next_coin(&mut self) {
        let count = self.available_coins().len();
        if count == 0 {
            return;
        }
        let index = match self.coin_cursor {
            Some(i) => (i + 1).min(count - 1),
            None => 0,
        };
        self.select_coin_at(index);
    }

    /// Crypto précédente dans la liste
    pub fn select_previous_coin(&mut self) {
        if self.available_coins().is_empty() {
            return;
        }
        let index = self.coin_cursor.map(|i| i.saturating_sub(1)).unwrap_or(0);
        self.select_coin_at(index);
    }

    fn select_coin_at(&mut self, index: usize) {
        let Some(coin) = self.available_coins().get(index).cloned() else {
            return;
        };
        self.coin_cursor = Some(index);
        // CoinId est non vide : set() ne peut pas échouer sur ce champ
        if self
            .history
            .filter_mut()
            .set(DetailField::Coin, coin.as_str())
            .is_ok()
        {
            info!(coin = %coin, "Coin selected");
        }
    }

    // ========================================================================
    // Saisie des dates
    // ========================================================================

    /// Passe au champ suivant en validant la date quittée
    pub fn focus_next(&mut self) {
        self.commit_focused_date();
        self.focus = self.focus.next();
    }

    /// Ajoute un caractère à la date focalisée
    pub fn push_char(&mut self, c: char) {
        if let Some(input) = self.focused_input_mut() {
            input.push(c);
        }
    }

    /// Supprime le dernier caractère de la date focalisée
    pub fn backspace(&mut self) {
        if let Some(input) = self.focused_input_mut() {
            input.pop();
        }
    }

    fn focused_input_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Focus::Coin => None,
            Focus::StartDate => Some(&mut self.start_input),
            Focus::EndDate => Some(&mut self.end_input),
        }
    }

    /// Normalise la saisie du champ focalisé dans les filtres
    ///
    /// Une date valide est réécrite sous sa forme canonique AAAA-MM-JJ.
    /// Retourne `false` si la saisie est rejetée.
    fn commit_focused_date(&mut self) -> bool {
        let (field, raw) = match self.focus {
            Focus::Coin => return true,
            Focus::StartDate => (DetailField::StartDate, self.start_input.clone()),
            Focus::EndDate => (DetailField::EndDate, self.end_input.clone()),
        };

        match self.history.filter_mut().set(field, &raw) {
            Ok(()) => {
                self.input_error = None;
                let filter = self.history.filter();
                let canonical = match field {
                    DetailField::StartDate => filter.start,
                    _ => filter.end,
                }
                .map(|d| d.format(crate::models::date::CANONICAL_FORMAT).to_string())
                .unwrap_or_default();

                if let Some(input) = self.focused_input_mut() {
                    *input = canonical;
                }
                true
            }
            Err(e) => {
                warn!(error = %e, "Rejected date input");
                self.input_error = Some(e);
                false
            }
        }
    }

    // ========================================================================
    // Recherche
    // ========================================================================

    /// Bouton "Rechercher" : valide la saisie en cours puis lance le
    /// chargement si crypto, début et fin sont présents
    pub fn submit(&mut self) -> Option<Command> {
        // La date affichée est invalide : pas de requête avec l'ancienne valeur
        if !self.commit_focused_date() {
            return None;
        }

        let ticket = self.history.begin()?;
        info!(
            coin = %ticket.request.coin,
            generation = ticket.generation,
            "Detail search submitted"
        );
        Some(Command::FetchHistory {
            generation: ticket.generation,
            coin: ticket.request.coin,
            range: ticket.request.range,
        })
    }

    pub fn on_coin_list(&mut self, generation: u64, result: Result<Vec<CoinId>, FetchError>) {
        self.coins.complete(generation, result);
    }

    pub fn on_history(&mut self, generation: u64, result: Result<DetailedHistory, FetchError>) {
        self.history.complete(generation, result);
    }

    // ========================================================================
    // Vues pour le rendu
    // ========================================================================

    pub fn summary_view(&self) -> Option<SummaryView> {
        self.history.data().map(|h| to_summary_view(&h.summary))
    }

    pub fn price_series(&self) -> Option<PriceSeries> {
        self.history.data().map(|h| to_price_series(&h.data))
    }

    /// Message d'erreur à afficher (liste ou données)
    pub fn error_message(&self) -> Option<&'static str> {
        self.history
            .error_message()
            .or_else(|| self.coins.error_message())
    }

    pub fn is_loading(&self) -> bool {
        self.coins.is_loading() || self.history.is_loading()
    }
}

impl Default for DetailPage {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
