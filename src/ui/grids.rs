// ============================================================================
// Rendu : pages par année (grilles de cartes)
// ============================================================================
// - Top cryptos : grille 2x2 de mini-graphiques
// - Market caps : grille de cartes (3 colonnes) avec la market cap,
//   défilable avec ↑↓ / j k quand elle dépasse l'écran
//
// Chaque carte prend le thème de sa position : bordure = début du
// dégradé, titre = fin du dégradé, icône en tête du titre.
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::adapter::{format_market_cap, format_two_decimals, to_price_series, Theme, NO_DATA};
use crate::models::{TopCryptoEntry, Year, YearlyCapEntry};
use crate::pages::{TopCryptosPage, YearPage, YearlyCapsPage, YearlyDataset};
use crate::ui::chart::{render_error, render_loading, render_message, render_price_chart};

/// Colonnes de la grille Market caps (aussi utilisé pour le défilement)
pub const YEARLY_COLUMNS: usize = 3;
const YEARLY_CARD_HEIGHT: u16 = 5;

/// Découpe `area` en `rows` x `columns` cellules (ordre ligne par ligne)
fn grid(area: Rect, rows: usize, columns: usize) -> Vec<Rect> {
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, rows as u32); rows])
        .split(area);

    row_areas
        .iter()
        .flat_map(|row| {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
                .split(*row)
                .to_vec()
        })
        .collect()
}

fn card_block(theme: &Theme, title: String) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.from))
        .title(Span::styled(
            format!(" {} {} ", theme.icon, title),
            Style::default().fg(theme.to).add_modifier(Modifier::BOLD),
        ))
}

/// Sélecteur d'année : toutes les années, la courante en surbrillance
fn year_strip(current: Year) -> Line<'static> {
    let mut spans = vec![Span::raw("◀ ")];
    for year in Year::all() {
        let style = if year == current {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {year} "), style));
    }
    spans.push(Span::raw(" ▶"));
    Line::from(spans)
}

/// En-tête commun (sélecteur d'année) puis états chargement/erreur/vide
///
/// Retourne la zone libre pour la grille quand il y a des cartes.
fn render_year_frame<T: YearlyDataset>(
    frame: &mut Frame,
    page: &YearPage<T>,
    area: Rect,
    title: &str,
) -> Option<Rect> {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let header = Paragraph::new(year_strip(page.year()))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));
    frame.render_widget(header, chunks[0]);

    let body = chunks[1];
    if page.entries.is_loading() {
        render_loading(frame, body, title);
        return None;
    }
    if let Some(message) = page.entries.error_message() {
        render_error(frame, body, message);
        return None;
    }
    if page.cards().is_empty() {
        let message = format!("Aucune donnée pour {}", page.year());
        render_message(frame, body, title, &message, Color::Gray);
        return None;
    }
    Some(body)
}

// ============================================================================
// Top cryptos
// ============================================================================

pub fn render_top_cryptos(frame: &mut Frame, page: &TopCryptosPage, area: Rect) {
    let Some(body) = render_year_frame(frame, page, area, " 🏆 Top cryptos ") else {
        return;
    };

    let cards = page.cards();
    let rows = cards.len().div_ceil(2);
    let cells = grid(body, rows, 2);

    for ((entry, theme), cell) in cards.into_iter().zip(cells) {
        render_top_card(frame, entry, theme, cell);
    }
}

fn render_top_card(frame: &mut Frame, entry: &TopCryptoEntry, theme: &Theme, area: Rect) {
    let change = entry
        .price_change
        .and_then(format_two_decimals)
        .map(|c| format!("{c} %"))
        .unwrap_or_else(|| NO_DATA.to_string());

    // Le cadre du graphique sert de carte : icône + nom + variation
    let series = to_price_series(&entry.data);
    let title = format!("{} {}  {}", theme.icon, entry.coin_name, change);
    render_price_chart(frame, area, &series, &title, theme.from);
}

// ============================================================================
// Market caps
// ============================================================================

pub fn render_yearly_caps(frame: &mut Frame, page: &YearlyCapsPage, area: Rect) {
    let Some(body) = render_year_frame(frame, page, area, " 💰 Market caps ") else {
        return;
    };

    let cards = page.cards();
    let total_cards = cards.len();
    let total_rows = total_cards.div_ceil(YEARLY_COLUMNS);

    // Hauteur fixe par carte ; si tout ne tient pas, on garde une ligne
    // en bas pour l'indicateur de défilement
    let mut visible_rows = (body.height / YEARLY_CARD_HEIGHT).max(1) as usize;
    let overflow = total_rows > visible_rows;
    if overflow {
        visible_rows = (body.height.saturating_sub(1) / YEARLY_CARD_HEIGHT).max(1) as usize;
    }

    // L'offset de la page est recalé pour que la dernière ligne reste en bas
    let first_row = page.scroll.min(total_rows.saturating_sub(visible_rows));
    let rows = visible_rows.min(total_rows - first_row);
    let grid_area = Rect {
        height: (rows as u16 * YEARLY_CARD_HEIGHT).min(body.height),
        ..body
    };
    let cells = grid(grid_area, rows, YEARLY_COLUMNS);

    let shown = cards
        .into_iter()
        .skip(first_row * YEARLY_COLUMNS)
        .take(rows * YEARLY_COLUMNS);
    for ((entry, theme), cell) in shown.zip(cells) {
        render_cap_card(frame, entry, theme, cell);
    }

    if overflow {
        let indicator_area = Rect {
            y: body.y + body.height.saturating_sub(1),
            height: 1,
            ..body
        };
        let below = total_cards.saturating_sub((first_row + rows) * YEARLY_COLUMNS);
        frame.render_widget(scroll_indicator(first_row, below), indicator_area);
    }
}

/// Ligne "▲ ... ▼ N cartes de plus" sous la grille
fn scroll_indicator(first_row: usize, below: usize) -> Paragraph<'static> {
    let hint = Style::default().fg(Color::DarkGray);
    let mut spans = Vec::new();
    if first_row > 0 {
        spans.push(Span::styled(format!("▲ {first_row} ligne(s) au-dessus   "), hint));
    }
    if below > 0 {
        spans.push(Span::styled(
            format!("▼ {below} carte(s) de plus"),
            Style::default().fg(Color::Yellow),
        ));
    } else {
        spans.push(Span::styled("Fin de la liste", hint));
    }
    spans.push(Span::styled("   [↑↓ / j k]", hint));

    Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
}

fn render_cap_card(frame: &mut Frame, entry: &YearlyCapEntry, theme: &Theme, area: Rect) {
    let cap = format_market_cap(entry.market_cap).unwrap_or_else(|| NO_DATA.to_string());

    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("Market Cap: "),
            Span::styled(
                format!("$ {cap}"),
                Style::default().fg(theme.to).add_modifier(Modifier::BOLD),
            ),
        ]),
    ])
    .alignment(Alignment::Center)
    .block(card_block(theme, entry.coin_name.clone()));

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worker::Command;
    use ratatui::{backend::TestBackend, Terminal};

    fn caps_page(count: usize) -> YearlyCapsPage {
        let mut page = YearlyCapsPage::new();
        let Some(Command::FetchYearlyCaps { generation, .. }) = page.mount() else {
            panic!("mount must fetch");
        };
        let entries = (0..count)
            .map(|i| YearlyCapEntry {
                coin_name: format!("COIN{i:02}"),
                market_cap: 1_000.0 * i as f64,
            })
            .collect();
        page.on_result(generation, Ok(entries));
        page
    }

    /// Rend la page sur un terminal 120x30 et retourne le texte affiché
    fn draw(page: &YearlyCapsPage) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal
            .draw(|frame| render_yearly_caps(frame, page, frame.size()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_last_card_is_reachable_by_scrolling() {
        let mut page = caps_page(30);

        let screen = draw(&page);
        assert!(screen.contains("COIN00"));
        assert!(!screen.contains("COIN29"));
        assert!(screen.contains("carte(s) de plus"));

        for _ in 0..30 {
            page.scroll_down(YEARLY_COLUMNS);
        }
        let screen = draw(&page);
        assert!(screen.contains("COIN29"));
        assert!(!screen.contains("COIN00"));
        assert!(screen.contains("Fin de la liste"));
    }

    #[test]
    fn test_every_card_is_shown_while_scrolling() {
        let mut page = caps_page(30);
        let mut seen = vec![false; 30];

        for _ in 0..10 {
            let screen = draw(&page);
            for (i, flag) in seen.iter_mut().enumerate() {
                *flag |= screen.contains(&format!("COIN{i:02}"));
            }
            page.scroll_down(YEARLY_COLUMNS);
        }
        assert!(seen.iter().all(|shown| *shown));
    }

    #[test]
    fn test_year_strip_lists_selectable_years() {
        let strip = year_strip(Year::new(2021));
        let text: String = strip.spans.iter().map(|span| span.content.as_ref()).collect();
        assert!(text.contains("2015"));
        assert!(text.contains("2024"));

        let current = strip
            .spans
            .iter()
            .find(|span| span.content.contains("2021"))
            .unwrap();
        assert!(current.style.add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_small_grid_has_no_indicator() {
        let screen = draw(&caps_page(4));
        assert!(screen.contains("COIN03"));
        assert!(!screen.contains("[↑↓ / j k]"));
    }
}
