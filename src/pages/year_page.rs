// ============================================================================
// Pages par année : Top cryptos, Market caps
// ============================================================================
// Les deux pages ont la même forme :
// - un sélecteur d'année (2020 par défaut)
// - un chargement au montage, puis à chaque changement d'année
// - une grille de cartes (thème selon la position), défilable ligne par ligne
//
// CONCEPT RUST : Générique + trait associé
// - YearPage<T> implémente la logique une seule fois
// - YearlyDataset dit, pour chaque type d'entrée, quelle commande envoyer
//   et quelle palette utiliser
// ============================================================================

use tracing::info;

use crate::adapter::{assign_presentation, Theme, TOP_CRYPTOS_PALETTE, YEARLY_CAPS_PALETTE};
use crate::error::{ErrorKind, FetchError};
use crate::fetch::{FetchController, YearFilter};
use crate::models::{TopCryptoEntry, Year, YearlyCapEntry};
use crate::worker::Command;

/// Type d'entrée affiché par une page "par année"
pub trait YearlyDataset {
    /// Palette des cartes de la grille
    const PALETTE: &'static [Theme];

    /// Commande du worker qui charge les entrées de `year`
    fn command(generation: u64, year: Year) -> Command;
}

impl YearlyDataset for TopCryptoEntry {
    const PALETTE: &'static [Theme] = TOP_CRYPTOS_PALETTE;

    fn command(generation: u64, year: Year) -> Command {
        Command::FetchTopCryptos { generation, year }
    }
}

impl YearlyDataset for YearlyCapEntry {
    const PALETTE: &'static [Theme] = YEARLY_CAPS_PALETTE;

    fn command(generation: u64, year: Year) -> Command {
        Command::FetchYearlyCaps { generation, year }
    }
}

/// État d'une page "par année"
#[derive(Debug)]
pub struct YearPage<T: YearlyDataset> {
    pub entries: FetchController<YearFilter, Vec<T>>,
    /// Première ligne de cartes affichée
    pub scroll: usize,
}

pub type TopCryptosPage = YearPage<TopCryptoEntry>;
pub type YearlyCapsPage = YearPage<YearlyCapEntry>;

impl<T: YearlyDataset> YearPage<T> {
    pub fn new() -> Self {
        Self {
            entries: FetchController::new(ErrorKind::FetchData),
            scroll: 0,
        }
    }

    pub fn year(&self) -> Year {
        self.entries.filter().year
    }

    /// Montage : année par défaut et chargement immédiat
    pub fn mount(&mut self) -> Option<Command> {
        self.entries.reset();
        self.load()
    }

    /// Choisit une année et recharge
    ///
    /// Choisir l'année déjà affichée ne relance rien.
    pub fn set_year(&mut self, year: Year) -> Option<Command> {
        if year == self.year() {
            return None;
        }
        self.entries.filter_mut().year = year;
        info!(%year, "Year changed");
        self.load()
    }

    pub fn next_year(&mut self) -> Option<Command> {
        self.set_year(self.year().next())
    }

    pub fn previous_year(&mut self) -> Option<Command> {
        self.set_year(self.year().previous())
    }

    /// Descend d'une ligne dans une grille de `columns` colonnes
    ///
    /// S'arrête sur la dernière ligne ; le rendu recale ensuite l'offset
    /// pour que la grille reste pleine.
    pub fn scroll_down(&mut self, columns: usize) {
        let rows = self.cards().len().div_ceil(columns.max(1));
        if self.scroll + 1 < rows {
            self.scroll += 1;
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    fn load(&mut self) -> Option<Command> {
        // Nouvelles données : retour en haut de la grille
        self.scroll = 0;
        self.entries
            .begin()
            .map(|ticket| T::command(ticket.generation, ticket.request))
    }

    pub fn on_result(&mut self, generation: u64, result: Result<Vec<T>, FetchError>) {
        self.entries.complete(generation, result);
    }

    /// Entrées chargées avec leur thème
    pub fn cards(&self) -> Vec<(&T, &'static Theme)> {
        self.entries
            .data()
            .map(|entries| {
                entries
                    .iter()
                    .enumerate()
                    .map(|(i, entry)| (entry, assign_presentation(T::PALETTE, i)))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl<T: YearlyDataset> Default for YearPage<T> {
    fn default() -> Self {
        Self::new()
    }
}
