// ============================================================================
// Dashboard - Rendu de l'interface principale
// ============================================================================
// +--------------------------------------------------------------+
// | Onglets : Détail | Top cryptos | Market caps                  |
// +--------------------------------------------------------------+
// | Écran courant                                                |
// +--------------------------------------------------------------+
// | Vue d'ensemble du marché | raccourcis / confirmation de quit |
// +--------------------------------------------------------------+
//
// CONCEPTS RATATUI :
// 1. Frame : surface de dessin
// 2. Layout : découpage de l'espace en zones
// 3. Tabs : onglets avec sélection
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::adapter::{format_two_decimals, NO_DATA};
use crate::app::{App, Screen};
use crate::ui::detail::render_detail;
use crate::ui::grids::{render_top_cryptos, render_yearly_caps};

/// Dessine l'interface complète
///
/// CONCEPT RUST : Routing avec match sur enum
/// - Le compilateur garantit l'exhaustivité (tous les écrans gérés)
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Onglets
            Constraint::Min(0),    // Écran courant
            Constraint::Length(4), // Vue d'ensemble + raccourcis
        ])
        .split(frame.size());

    render_tabs(frame, app, chunks[0]);

    match app.current_screen {
        Screen::Detail => render_detail(frame, &app.detail, chunks[1]),
        Screen::TopCryptos => render_top_cryptos(frame, &app.top_cryptos, chunks[1]),
        Screen::YearlyCaps => render_yearly_caps(frame, &app.yearly_caps, chunks[1]),
    }

    render_footer(frame, app, chunks[2]);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Screen::ALL
        .iter()
        .enumerate()
        .map(|(i, screen)| Line::from(format!("{} {}", i + 1, screen.title())))
        .collect();

    // Indicateur de chargement de l'écran courant dans le cadre des onglets
    let title = if app.is_loading() {
        Line::from(vec![
            Span::raw(" CryptoDash "),
            Span::styled("⏳ chargement ", Style::default().fg(Color::Yellow)),
        ])
    } else {
        Line::from(" CryptoDash ")
    };

    let tabs = Tabs::new(titles)
        .select(app.current_screen.index())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(title),
        )
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

/// Ligne "vue d'ensemble" du marché
fn overview_line(app: &App) -> Line<'static> {
    if app.overview.is_loading() {
        return Line::from(Span::styled("Vue d'ensemble : chargement...", Style::default().fg(Color::Gray)));
    }

    match app.overview.data() {
        Some(overview) => {
            let average = format_two_decimals(overview.average_price)
                .unwrap_or_else(|| NO_DATA.to_string());
            Line::from(vec![
                Span::raw("Cryptos suivies : "),
                Span::styled(
                    overview.total_cryptos.to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("   Prix moyen : $ "),
                Span::styled(average, Style::default().add_modifier(Modifier::BOLD)),
            ])
        }
        None => Line::from(Span::styled(
            format!("Vue d'ensemble : {NO_DATA}"),
            Style::default().fg(Color::DarkGray),
        )),
    }
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let key = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);

    let shortcuts = if app.is_awaiting_quit_confirmation() {
        Line::from(vec![
            Span::styled(
                "⚠  Appuyez sur ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "[q]",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled(
                " à nouveau pour quitter, ou n'importe quelle autre touche pour annuler ⚠",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ])
    } else {
        // Raccourcis propres à l'écran courant
        let mut spans = vec![
            Span::styled("[q]", key),
            Span::raw(" Quitter  "),
            Span::styled("[ [ ] ]", key),
            Span::raw(" Écran  "),
        ];
        match app.current_screen {
            Screen::Detail => spans.extend([
                Span::styled("[Tab]", key),
                Span::raw(" Champ  "),
                Span::styled("[↑↓ / j k]", key),
                Span::raw(" Crypto  "),
                Span::styled("[Entrée]", key),
                Span::raw(" Rechercher"),
            ]),
            Screen::TopCryptos | Screen::YearlyCaps => spans.extend([
                Span::styled("[1 2 3]", key),
                Span::raw(" Écran  "),
                Span::styled("[←→ / h l]", key),
                Span::raw(" Année"),
            ]),
        }
        if app.current_screen == Screen::YearlyCaps {
            spans.extend([Span::styled("  [↑↓ / j k]", key), Span::raw(" Défiler")]);
        }
        Line::from(spans)
    };

    let paragraph = Paragraph::new(vec![overview_line(app), shortcuts])
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
