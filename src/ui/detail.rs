// ============================================================================
// Rendu : page Détail
// ============================================================================
// +-------------------+------------------------------------------+
// | Filtres           | Résumé (prix initial, final, variation)  |
// | (crypto, dates)   +------------------------------------------+
// +-------------------+                                          |
// | Liste des cryptos | Graphique des prix                       |
// |                   |                                          |
// +-------------------+------------------------------------------+
// ============================================================================

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::adapter::{SummaryView, Trend};
use crate::pages::{DetailPage, Focus};
use crate::ui::chart::{render_error, render_loading, render_message, render_price_chart};

pub fn render_detail(frame: &mut Frame, page: &DetailPage, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(32), Constraint::Min(0)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(0)])
        .split(columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(0)])
        .split(columns[1]);

    render_filters(frame, page, left[0]);
    render_coin_list(frame, page, left[1]);
    render_results(frame, page, right[0], right[1]);
}

// ============================================================================
// Filtres
// ============================================================================

fn field_style(page: &DetailPage, focus: Focus) -> Style {
    if page.focus == focus {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}

fn render_filters(frame: &mut Frame, page: &DetailPage, area: Rect) {
    let coin = page
        .selected_coin()
        .map(|c| c.to_string())
        .unwrap_or_else(|| "Sélectionnez une crypto".to_string());

    // Curseur visible uniquement sur le champ focalisé
    let with_cursor = |input: &str, focus: Focus| {
        if page.focus == focus {
            format!("{input}█")
        } else if input.is_empty() {
            "AAAA-MM-JJ".to_string()
        } else {
            input.to_string()
        }
    };

    let mut lines = vec![
        Line::from(vec![
            Span::raw("Crypto : "),
            Span::styled(coin, field_style(page, Focus::Coin)),
        ]),
        Line::from(vec![
            Span::raw("Début  : "),
            Span::styled(
                with_cursor(&page.start_input, Focus::StartDate),
                field_style(page, Focus::StartDate),
            ),
        ]),
        Line::from(vec![
            Span::raw("Fin    : "),
            Span::styled(
                with_cursor(&page.end_input, Focus::EndDate),
                field_style(page, Focus::EndDate),
            ),
        ]),
    ];

    if let Some(error) = &page.input_error {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" 🔎 Filtres "),
    );

    frame.render_widget(paragraph, area);
}

fn render_coin_list(frame: &mut Frame, page: &DetailPage, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Cryptos ");

    if page.coins.is_loading() {
        render_loading(frame, area, " Cryptos ");
        return;
    }
    if let Some(message) = page.coins.error_message() {
        render_error(frame, area, message);
        return;
    }

    let items: Vec<ListItem> = page
        .available_coins()
        .iter()
        .map(|coin| ListItem::new(format!(" {coin}")))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .add_modifier(Modifier::REVERSED),
        );

    // CONCEPT RATATUI : StatefulWidget
    // - ListState porte la sélection et le défilement
    let mut state = ListState::default().with_selected(page.coin_cursor);
    frame.render_stateful_widget(list, area, &mut state);
}

// ============================================================================
// Résultats : résumé + graphique
// ============================================================================

fn render_results(frame: &mut Frame, page: &DetailPage, summary_area: Rect, chart_area: Rect) {
    if page.history.is_loading() {
        render_loading(frame, summary_area, " Résumé ");
        render_loading(frame, chart_area, " Historique ");
        return;
    }

    if let Some(message) = page.history.error_message() {
        render_error(frame, summary_area, message);
        render_message(frame, chart_area, " Historique ", "", Color::DarkGray);
        return;
    }

    match (page.summary_view(), page.price_series()) {
        (Some(summary), Some(series)) => {
            render_summary(frame, &summary, summary_area);
            let title = summary.coin_name.as_deref().unwrap_or("Historique");
            render_price_chart(frame, chart_area, &series, title, trend_color(summary.trend));
        }
        _ => {
            let hint = "Choisissez une crypto et une période, puis [Entrée]";
            render_message(frame, summary_area, " Résumé ", hint, Color::Gray);
            render_message(frame, chart_area, " Historique ", "", Color::DarkGray);
        }
    }
}

fn trend_color(trend: Trend) -> Color {
    match trend {
        Trend::Up => Color::Green,
        Trend::Down => Color::Red,
        Trend::Flat | Trend::Unknown => Color::Gray,
    }
}

fn render_summary(frame: &mut Frame, summary: &SummaryView, area: Rect) {
    let color = trend_color(summary.trend);
    let label = Style::default().fg(Color::Gray);
    let value = Style::default().add_modifier(Modifier::BOLD);

    let lines = vec![
        Line::from(vec![
            Span::styled("Période        : ", label),
            Span::raw(SummaryView::display(&summary.period).to_string()),
        ]),
        Line::from(vec![
            Span::styled("Prix initial   : ", label),
            Span::styled(format!("$ {}", SummaryView::display(&summary.initial_price)), value),
        ]),
        Line::from(vec![
            Span::styled("Prix final     : ", label),
            Span::styled(format!("$ {}", SummaryView::display(&summary.final_price)), value),
        ]),
        Line::from(vec![
            Span::styled("Variation      : ", label),
            Span::styled(
                format!(
                    "{} {} %",
                    summary.trend.arrow(),
                    SummaryView::display(&summary.price_change_percentage)
                ),
                value.fg(color),
            ),
        ]),
    ];

    let title = format!(" 📈 {} ", SummaryView::display(&summary.coin_name));
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(title),
    );

    frame.render_widget(paragraph, area);
}
