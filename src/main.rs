// ============================================================================
// CryptoDash - Tableau de bord des prix de cryptomonnaies
// ============================================================================
// Programme TUI à trois écrans :
// 1. Détail : une crypto sur une période (résumé + graphique)
// 2. Top cryptos d'une année (grille de mini-graphiques)
// 3. Market caps d'une année (grille de cartes)
//
// CONCEPTS RUST CLÉS :
// 1. Terminal raw mode : contrôle total du terminal
// 2. Event loop : boucle qui gère résultats, rendering et événements
// 3. Worker thread : les appels HTTP ne bloquent jamais l'UI
// 4. Restauration du terminal même en cas d'erreur
// ============================================================================

use std::io;
use std::path::Path;
use std::sync::{mpsc, Arc};

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info, warn};

use cryptodash::api::BackendClient;
use cryptodash::app::{App, Screen};
use cryptodash::config::Config;
use cryptodash::pages::{YearPage, YearlyDataset};
use cryptodash::ui::{events::EventHandler, grids::YEARLY_COLUMNS, render, Event};
use cryptodash::worker::{spawn_worker, Command, Outcome};

// ============================================================================
// Initialisation du logging
// ============================================================================
// CONCEPT : Logging dans une app TUI
// - Les println! ne fonctionnent pas une fois le TUI lancé
// - On log vers un fichier à la place, rotation quotidienne
// ============================================================================

/// Initialise le système de logging vers fichier
///
/// Les logs sont écrits dans `log_dir/cryptodash.log.AAAA-MM-JJ`.
///
/// # Utilisation
/// ```bash
/// tail -f ~/.local/share/cryptodash/logs/cryptodash.log.*
/// RUST_LOG=cryptodash=trace cargo run
/// ```
fn init_logging(log_dir: &Path) -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    std::fs::create_dir_all(log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "cryptodash.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false) // Pas de codes couleur dans le fichier
                .with_target(true)
                .with_thread_ids(true) // UI et worker sont sur des threads différents
                .with_line_number(true),
        )
        .with(
            // Par défaut : debug pour cryptodash, info pour les dépendances
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cryptodash=debug,info".into()),
        )
        .init();

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

fn main() -> Result<()> {
    let config = Config::from_env().context("Configuration invalide")?;

    // Si le logging échoue, on continue sans
    init_logging(&config.log_dir).unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {}", e);
        eprintln!("   Continuing without logging...");
    });

    info!(api_url = %config.api_url, timeout = ?config.request_timeout, "CryptoDash starting up");

    let api = Arc::new(BackendClient::new(&config).context("Création du client HTTP impossible")?);

    // CONCEPT RUST : mpsc channels
    // - command_tx/rx : UI -> worker
    // - outcome_tx/rx : worker -> UI
    let (command_tx, command_rx) = mpsc::channel::<Command>();
    let (outcome_tx, outcome_rx) = mpsc::channel::<Outcome>();

    info!("Spawning background worker thread");
    let worker = spawn_worker(api, command_rx, outcome_tx).context("Lancement du worker impossible")?;

    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    let mut app = App::new();
    let events = EventHandler::default();

    send_all(&command_tx, app.start());

    info!("Starting event loop");
    let result = run(&mut terminal, &mut app, &events, &command_tx, &outcome_rx);

    // Restaure le terminal (même en cas d'erreur)
    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    // Fermer le channel arrête la boucle du worker
    drop(command_tx);
    if worker.join().is_err() {
        error!("Worker thread panicked");
    }

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

// ============================================================================
// Event loop
// ============================================================================
// 1. RÉSULTATS : applique tout ce que le worker a renvoyé
// 2. RENDER : dessine l'écran courant
// 3. INPUT : traite une touche, envoie les commandes produites
// ============================================================================

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
    command_tx: &mpsc::Sender<Command>,
    outcome_rx: &mpsc::Receiver<Outcome>,
) -> Result<()> {
    while app.is_running() {
        // CONCEPT : Non-blocking receive avec try_recv
        // - on vide la file avant chaque rendu
        loop {
            match outcome_rx.try_recv() {
                Ok(outcome) => app.apply(outcome),
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    warn!("Worker thread disconnected");
                    break;
                }
            }
        }

        terminal.draw(|frame| render(frame, app))?;

        let event = events.next()?;
        let commands = handle_event(app, &event);
        send_all(command_tx, commands);
    }

    Ok(())
}

fn send_all(command_tx: &mpsc::Sender<Command>, commands: Vec<Command>) {
    for command in commands {
        if command_tx.send(command).is_err() {
            error!("Worker channel closed, command dropped");
        }
    }
}

// ============================================================================
// Gestion des événements
// ============================================================================

/// Traite un événement et retourne les chargements à lancer
///
/// CONCEPT RUST : Pattern matching avec guards
/// - Les raccourcis globaux d'abord (quit, écrans)
/// - Puis ceux de l'écran courant
fn handle_event(app: &mut App, event: &Event) -> Vec<Command> {
    use cryptodash::ui::events::{
        date_char_from_event, is_backspace_event, is_down_event, is_enter_event,
        is_next_screen_event, is_previous_screen_event, is_quit_event, is_tab_event, is_up_event,
        screen_from_event,
    };

    if matches!(event, Event::Tick) {
        return Vec::new();
    }

    // Two-step quit : toute autre touche annule la demande
    if is_quit_event(event) {
        if app.is_awaiting_quit_confirmation() {
            info!("Quit confirmed");
            app.quit();
        } else {
            app.request_quit();
        }
        return Vec::new();
    }
    if app.is_awaiting_quit_confirmation() {
        app.cancel_quit();
        return Vec::new();
    }

    if is_next_screen_event(event) {
        return app.next_screen();
    }
    if is_previous_screen_event(event) {
        return app.previous_screen();
    }

    // Les chiffres servent à saisir les dates sur la page détail
    let editing_date = app.current_screen == Screen::Detail && app.detail.focus.is_date();
    if !editing_date {
        if let Some(screen) = screen_from_event(event) {
            return app.switch_to(screen);
        }
    }

    match app.current_screen {
        Screen::Detail => {
            let page = &mut app.detail;
            if is_tab_event(event) {
                page.focus_next();
            } else if is_enter_event(event) {
                return page.submit().into_iter().collect();
            } else if page.focus.is_date() {
                if is_backspace_event(event) {
                    page.backspace();
                } else if let Some(c) = date_char_from_event(event) {
                    page.push_char(c);
                }
            } else if is_down_event(event) {
                page.select_next_coin();
            } else if is_up_event(event) {
                page.select_previous_coin();
            }
            Vec::new()
        }
        Screen::TopCryptos => handle_year_event(&mut app.top_cryptos, event),
        Screen::YearlyCaps => {
            // ↑↓ / j k : défilement de la grille des market caps
            let page = &mut app.yearly_caps;
            if is_down_event(event) {
                page.scroll_down(YEARLY_COLUMNS);
                Vec::new()
            } else if is_up_event(event) {
                page.scroll_up();
                Vec::new()
            } else {
                handle_year_event(page, event)
            }
        }
    }
}

/// Flèches gauche/droite : année précédente/suivante
fn handle_year_event<T: YearlyDataset>(page: &mut YearPage<T>, event: &Event) -> Vec<Command> {
    use cryptodash::ui::events::{is_left_event, is_right_event};

    let command = if is_right_event(event) {
        page.next_year()
    } else if is_left_event(event) {
        page.previous_year()
    } else {
        None
    };
    command.into_iter().collect()
}

// ============================================================================
// Terminal
// ============================================================================

/// Configure le terminal en mode TUI
///
/// CONCEPT : Raw mode + alternate screen
/// - Les caractères ne sont pas affichés automatiquement
/// - Quand on quitte, l'écran précédent est restauré
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| e.into())
}

/// Restaure le terminal à son état normal
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
