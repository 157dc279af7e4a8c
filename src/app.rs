// ============================================================================
// Structure : App
// ============================================================================
// Gère l'état global du tableau de bord
//
// CONCEPTS RUST :
// 1. State Management : centraliser l'état dans une seule structure
// 2. Composition : chaque page possède ses propres contrôleurs
// 3. Les méthodes qui déclenchent un chargement RETOURNENT des Command
//    (l'App ne fait aucune I/O, l'event loop les envoie au worker)
//
// PATTERN : "Application State"
// - Tous les composants de l'UI lisent depuis App
// - Les résultats du worker passent par App::apply()
// ============================================================================

use tracing::{debug, info};

use crate::error::ErrorKind;
use crate::fetch::FetchController;
use crate::models::MarketOverview;
use crate::pages::{DetailPage, TopCryptosPage, YearlyCapsPage};
use crate::worker::{Command, Outcome};

// ============================================================================
// Enum : Screen
// ============================================================================
// CONCEPT RUST : Enums pour state machines
// - Un seul écran actif à la fois
// - Le compilateur force à gérer tous les cas (exhaustivité)
// ============================================================================

/// Écrans de l'application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Détail d'une crypto sur une période
    #[default]
    Detail,

    /// Top cryptos d'une année
    TopCryptos,

    /// Market caps d'une année
    YearlyCaps,
}

impl Screen {
    pub const ALL: [Screen; 3] = [Screen::Detail, Screen::TopCryptos, Screen::YearlyCaps];

    /// Titre affiché dans les onglets
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Detail => "Détail",
            Screen::TopCryptos => "Top cryptos",
            Screen::YearlyCaps => "Market caps",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Screen::Detail => 0,
            Screen::TopCryptos => 1,
            Screen::YearlyCaps => 2,
        }
    }

    /// Écran suivant (boucle)
    pub fn next(&self) -> Screen {
        Screen::ALL[(self.index() + 1) % Screen::ALL.len()]
    }

    /// Écran précédent (boucle)
    pub fn previous(&self) -> Screen {
        Screen::ALL[(self.index() + Screen::ALL.len() - 1) % Screen::ALL.len()]
    }
}

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Two-step quit : première pression de 'q' -> confirmation
    pub confirm_quit: bool,

    /// Écran actuellement affiché
    pub current_screen: Screen,

    pub detail: DetailPage,
    pub top_cryptos: TopCryptosPage,
    pub yearly_caps: YearlyCapsPage,

    /// Vue d'ensemble du marché (barre d'état, chargée une fois)
    pub overview: FetchController<(), MarketOverview>,
}

impl App {
    pub fn new() -> Self {
        Self {
            running: true,
            confirm_quit: false,
            current_screen: Screen::default(),
            detail: DetailPage::new(),
            top_cryptos: TopCryptosPage::new(),
            yearly_caps: YearlyCapsPage::new(),
            overview: FetchController::new(ErrorKind::FetchData),
        }
    }

    /// Chargements du démarrage : vue d'ensemble + montage du premier écran
    pub fn start(&mut self) -> Vec<Command> {
        let mut commands = Vec::new();
        if let Some(ticket) = self.overview.begin() {
            commands.push(Command::LoadOverview {
                generation: ticket.generation,
            });
        }
        commands.extend(self.mount_current());
        commands
    }

    /// Change d'écran
    ///
    /// L'écran atteint est remis à zéro et relance ses chargements de
    /// montage. Rester sur le même écran ne fait rien.
    pub fn switch_to(&mut self, screen: Screen) -> Vec<Command> {
        if screen == self.current_screen {
            return Vec::new();
        }
        info!(from = ?self.current_screen, to = ?screen, "Switching screen");
        self.current_screen = screen;
        self.mount_current().into_iter().collect()
    }

    pub fn next_screen(&mut self) -> Vec<Command> {
        self.switch_to(self.current_screen.next())
    }

    pub fn previous_screen(&mut self) -> Vec<Command> {
        self.switch_to(self.current_screen.previous())
    }

    fn mount_current(&mut self) -> Option<Command> {
        match self.current_screen {
            Screen::Detail => self.detail.mount(),
            Screen::TopCryptos => self.top_cryptos.mount(),
            Screen::YearlyCaps => self.yearly_caps.mount(),
        }
    }

    /// Applique un résultat du worker à la page concernée
    ///
    /// CONCEPT : Pas besoin de savoir quel écran est affiché
    /// - Un résultat destiné à une page quittée porte une génération
    ///   dépassée (le montage a fait reset) : il est ignoré
    pub fn apply(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::CoinList { generation, result } => {
                self.detail.on_coin_list(generation, result)
            }
            Outcome::History { generation, result } => self.detail.on_history(generation, result),
            Outcome::TopCryptos { generation, result } => {
                self.top_cryptos.on_result(generation, result)
            }
            Outcome::YearlyCaps { generation, result } => {
                self.yearly_caps.on_result(generation, result)
            }
            Outcome::Overview { generation, result } => {
                if !self.overview.complete(generation, result) {
                    debug!("Stale overview ignored");
                }
            }
        }
    }

    /// Vrai si un chargement est en cours sur l'écran affiché
    pub fn is_loading(&self) -> bool {
        match self.current_screen {
            Screen::Detail => self.detail.is_loading(),
            Screen::TopCryptos => self.top_cryptos.entries.is_loading(),
            Screen::YearlyCaps => self.yearly_caps.entries.is_loading(),
        }
    }

    /// Quitte l'application
    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Demande la confirmation de quitter (première pression de 'q')
    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    /// Annule la demande de quit (n'importe quelle autre touche)
    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::models::{CoinId, Year};

    #[test]
    fn test_app_creation() {
        let app = App::new();
        assert!(app.is_running());
        assert_eq!(app.current_screen, Screen::Detail);
        assert!(!app.is_awaiting_quit_confirmation());
    }

    #[test]
    fn test_start_loads_overview_and_coin_list() {
        let mut app = App::new();
        let commands = app.start();

        assert_eq!(commands.len(), 2);
        assert!(matches!(commands[0], Command::LoadOverview { .. }));
        assert!(matches!(commands[1], Command::LoadCoinList { .. }));
    }

    #[test]
    fn test_switch_mounts_target_screen() {
        let mut app = App::new();
        app.start();

        let commands = app.switch_to(Screen::YearlyCaps);
        assert_eq!(commands.len(), 1);
        assert!(matches!(
            commands[0],
            Command::FetchYearlyCaps { year, .. } if year == Year::default()
        ));

        // Même écran : rien
        assert!(app.switch_to(Screen::YearlyCaps).is_empty());
    }

    #[test]
    fn test_screen_cycle() {
        assert_eq!(Screen::Detail.next(), Screen::TopCryptos);
        assert_eq!(Screen::YearlyCaps.next(), Screen::Detail);
        assert_eq!(Screen::Detail.previous(), Screen::YearlyCaps);
    }

    #[test]
    fn test_leaving_page_discards_in_flight_result() {
        let mut app = App::new();
        let commands = app.start();
        let Some(Command::LoadCoinList { generation }) = commands.last().cloned() else {
            panic!("start must load the coin list");
        };

        // Aller-retour : la page détail est remontée
        app.switch_to(Screen::TopCryptos);
        app.switch_to(Screen::Detail);

        app.apply(Outcome::CoinList {
            generation,
            result: Ok(vec![CoinId::new("BTC").unwrap()]),
        });
        assert!(app.detail.available_coins().is_empty());
        assert!(app.detail.coins.is_loading());
    }

    #[test]
    fn test_overview_error_does_not_touch_pages() {
        let mut app = App::new();
        let commands = app.start();
        let Some(Command::LoadOverview { generation }) = commands.first().cloned() else {
            panic!("start must load the overview");
        };

        app.apply(Outcome::Overview {
            generation,
            result: Err(FetchError::Empty),
        });
        assert!(app.overview.error().is_some());
        assert!(app.detail.error_message().is_none());
    }

    #[test]
    fn test_two_step_quit() {
        let mut app = App::new();
        app.request_quit();
        assert!(app.is_awaiting_quit_confirmation());
        app.cancel_quit();
        assert!(!app.is_awaiting_quit_confirmation());
        app.quit();
        assert!(!app.is_running());
    }
}
