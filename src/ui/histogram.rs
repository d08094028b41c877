// ============================================================================
// Histogram - Rendu de l'histogramme des écarts
// ============================================================================
// Une barre par classe de l'histogramme, étiquetée par le centre de classe
//
// Titre : "Histogram of Stock {écart}" / "Ticker Symbol: {ticker}"
// Axe Y : "Frequency"
//
// CONCEPTS RATATUI :
// 1. BarChart : graphique en barres verticales
// 2. Bar / BarGroup : données + labels
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

use crate::analysis::Histogram;
use crate::app::App;

/// Dessine l'histogramme du rapport
pub fn render_histogram(frame: &mut Frame, app: &App, area: Rect) {
    if app.histogram.is_empty() {
        render_no_data(frame, area, "Empty sample: nothing to plot");
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Titre sur deux lignes
            Constraint::Min(0),    // Barres
        ])
        .split(area)
        .to_vec();

    let title = vec![
        Line::from(format!("Histogram of Stock {}", app.report.title())),
        Line::from(Span::styled(
            format!("Ticker Symbol: {}", app.report.ticker),
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(Paragraph::new(title).alignment(Alignment::Center), chunks[0]);

    let bars = bars(&app.histogram);
    let (bar_width, bar_gap) = bar_geometry(chunks[1].width.saturating_sub(2), bars.len());

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Frequency (max {}) ", app.histogram.max_count())),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(bar_gap)
        .bar_style(Style::default().fg(Color::Blue))
        .value_style(Style::default().fg(Color::White).bg(Color::Blue));

    frame.render_widget(chart, chunks[1]);
}

/// Convertit les classes en barres
///
/// CONCEPT RUST : Iterator chaining
/// - map() : HistogramBin -> Bar
fn bars(histogram: &Histogram) -> Vec<Bar<'static>> {
    histogram
        .bins
        .iter()
        .map(|bin| {
            Bar::default()
                .value(bin.count)
                .label(Line::from(format!("{:.2}", bin.center())))
        })
        .collect()
}

/// Largeur des barres et espacement pour tenir dans `width` colonnes
///
/// Les barres ne descendent jamais sous une colonne : si elles sont trop
/// nombreuses, la fin de l'histogramme est coupée par ratatui.
fn bar_geometry(width: u16, count: usize) -> (u16, u16) {
    if count == 0 {
        return (1, 0);
    }
    let per_bar = (width as usize / count).max(1) as u16;
    if per_bar >= 3 {
        (per_bar - 1, 1)
    } else {
        (per_bar, 0)
    }
}

/// Message quand il n'y a rien à afficher
fn render_no_data(frame: &mut Frame, area: Rect, message: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Histogram ");

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(Color::Red))),
    ];

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_geometry() {
        assert_eq!(bar_geometry(120, 12), (9, 1));
        assert_eq!(bar_geometry(24, 12), (2, 0));
        assert_eq!(bar_geometry(5, 40), (1, 0));
        assert_eq!(bar_geometry(80, 0), (1, 0));
    }

    #[test]
    fn test_one_bar_per_bin() {
        let histogram = Histogram::from_sample(&[0.1, -0.3, 0.6, -0.7], 0.25);
        assert_eq!(bars(&histogram).len(), histogram.bins.len());
    }
}
