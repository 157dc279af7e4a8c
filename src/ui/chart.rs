// ============================================================================
// Chart - Rendu d'une série de prix
// ============================================================================
// Graphique ligne utilisé par la page détail (grand format) et par les
// cartes de la page top cryptos (petit format)
//
// CONCEPTS RATATUI :
// 1. Chart widget : graphique ligne
// 2. Dataset : série de données à afficher
// 3. Axis : configuration des axes X et Y
// ============================================================================

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Wrap},
    Frame,
};

use crate::adapter::PriceSeries;

/// Dessine une série de prix en graphique ligne
///
/// - Axe X : position dans la série, labels = première/dernière date
/// - Axe Y : prix avec 5% de marge
/// - Série vide : panneau "aucune donnée" (ce n'est pas une erreur)
pub fn render_price_chart(
    frame: &mut Frame,
    area: Rect,
    series: &PriceSeries,
    title: &str,
    color: Color,
) {
    let Some((min_price, max_price)) = series.bounds() else {
        render_message(frame, area, title, "Aucune donnée sur cette période", Color::Gray);
        return;
    };

    let points = series.points();

    // Marge de 5% pour que le graphique respire (série plate : marge fixe)
    let margin = match (max_price - min_price) * 0.05 {
        m if m > 0.0 => m,
        _ => (max_price.abs() * 0.05).max(1.0),
    };
    let y_min = (min_price - margin).max(0.0);
    let y_max = max_price + margin;

    // CONCEPT RATATUI : Marker types
    // - Braille : résolution 2x4 par cellule, ligne plus fine
    let datasets = vec![Dataset::default()
        .name(title.to_string())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(&points)];

    let first_label = series.labels.first().cloned().unwrap_or_default();
    let last_label = series.labels.last().cloned().unwrap_or_default();

    let x_axis = Axis::default()
        .style(Style::default().fg(Color::Gray))
        .bounds([0.0, (points.len().saturating_sub(1)).max(1) as f64])
        .labels(vec![Span::raw(first_label), Span::raw(last_label)]);

    let y_axis = Axis::default()
        .title("Prix ($)")
        .style(Style::default().fg(Color::Gray))
        .bounds([y_min, y_max])
        .labels(vec![
            Span::raw(format!("{:.2}", y_min)),
            Span::raw(format!("{:.2}", (y_min + y_max) / 2.0)),
            Span::raw(format!("{:.2}", y_max)),
        ]);

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(format!(" {} ({} points) ", title, series.len())),
        )
        .x_axis(x_axis)
        .y_axis(y_axis);

    frame.render_widget(chart, area);
}

/// Panneau "chargement en cours"
pub fn render_loading(frame: &mut Frame, area: Rect, title: &str) {
    render_message(frame, area, title, "⏳ Chargement...", Color::Yellow);
}

/// Panneau d'erreur (message statique destiné à l'utilisateur)
pub fn render_error(frame: &mut Frame, area: Rect, message: &str) {
    render_message(frame, area, " ⚠ Erreur ", message, Color::Red);
}

/// Panneau centré avec un message
pub fn render_message(frame: &mut Frame, area: Rect, title: &str, message: &str, color: Color) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(title.to_string());

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}
