// ============================================================================
// Summary - Rendu de l'écran principal
// ============================================================================
// Dessine le rapport d'analyse : paramètres + les sept statistiques
//
// CONCEPTS RATATUI :
// 1. Frame : surface de dessin
// 2. Layout : découpage de l'espace en zones (header, contenu, footer)
// 3. Paragraph + Span : texte stylé
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Screen};
use crate::ui::histogram;

/// Dessine l'écran actif
///
/// CONCEPT RUST : Routing avec match sur enum
/// - Le compilateur garantit que tous les écrans sont gérés
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = create_layout(frame.size());

    render_header(frame, app, chunks[0]);

    match app.current_screen {
        Screen::Summary => render_statistics(frame, app, chunks[1]),
        Screen::Histogram => histogram::render_histogram(frame, app, chunks[1]),
    }

    render_footer(frame, chunks[2]);
}

/// Header, contenu, footer
fn create_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Contenu
            Constraint::Length(3), // Footer
        ])
        .split(area)
        .to_vec()
}

/// Header : ticker et écart analysé
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" PriceBehavior ")
        .title_alignment(Alignment::Center);

    let text = Line::from(vec![
        Span::styled(
            app.report.ticker.to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::raw(app.report.title()),
        Span::styled(
            format!("  (boundary ±{})", app.report.boundary),
            Style::default().fg(Color::Gray),
        ),
    ]);

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Tableau des statistiques arrondies
fn render_statistics(frame: &mut Frame, app: &App, area: Rect) {
    let summary = app.report.summary.rounded();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(format!(" Statistics - {} trading days ", app.report.trading_days));

    let mut lines = vec![Line::from("")];
    for (name, value) in summary.entries() {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<26}", name), Style::default().fg(Color::Cyan)),
            Span::styled(
                format_value(name, value),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]));
    }

    if summary.is_degenerate() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "No day has both prices of this range",
            Style::default().fg(Color::Red),
        )));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Les compteurs sans décimale, le reste tel quel
fn format_value(name: &str, value: f64) -> String {
    match name {
        "all_obs_number" | "obs_btw_boundaries" => format!("{}", value as u64),
        _ => format!("{}", value),
    }
}

/// Footer : raccourcis clavier
fn render_footer(frame: &mut Frame, area: Rect) {
    let key = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let text = Line::from(vec![
        Span::styled("[Tab]", key),
        Span::raw(" Switch view  "),
        Span::styled("[s]", key),
        Span::raw(" Statistics  "),
        Span::styled("[h]", key),
        Span::raw(" Histogram  "),
        Span::styled("[q/Esc]", key),
        Span::raw(" Quit"),
    ]);

    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
