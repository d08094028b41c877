// ============================================================================
// PriceBehavior - Statistiques d'écarts de prix intraday
// ============================================================================
// Programme en ligne de commande :
// - lit le fichier de cotations 5 minutes d'un ticker
// - calcule l'échantillon d'écarts de prix (open/close/veille/intraday)
// - affiche les sept statistiques (texte ou JSON)
// - avec --chart, ouvre un visualiseur TUI (statistiques + histogramme)
//
// CONCEPTS RUST CLÉS :
// 1. clap derive : parsing des arguments déclaratif
// 2. anyhow::Context : enrichir les erreurs de la librairie
// 3. Terminal raw mode : contrôle total du terminal pour le TUI
// ============================================================================

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info};

use pricebehavior::analysis::{self, AnalysisReport, AnalysisRequest};
use pricebehavior::app::App;
use pricebehavior::config::{default_config_path, load_settings, Settings};
use pricebehavior::ui::events::{
    is_escape_event, is_histogram_event, is_quit_event, is_summary_event, is_tab_event, Event,
};
use pricebehavior::ui::{render, EventHandler};

// ============================================================================
// Arguments de la ligne de commande
// ============================================================================
// CONCEPT RUST : clap derive
// - Chaque champ devient un argument
// - Les doc comments deviennent l'aide (--help)
// ============================================================================

/// Statistiques des écarts de prix journaliers d'un ticker
#[derive(Debug, Parser)]
#[command(name = "pricebehavior", version, about)]
struct Cli {
    /// Ticker (ex: MU, MSFT)
    ticker: String,

    /// open_priorclose | close_open | close_priorclose | intraprice_open
    price_range: String,

    /// Seuil : compte les écarts strictement dans ]-boundary, +boundary[
    #[arg(short, long, default_value_t = 0.5, allow_negative_numbers = true)]
    boundary: f64,

    /// Heure intraday "HHMM" (requis pour intraprice_open, ex: 1900)
    #[arg(short, long)]
    intra_time: Option<String>,

    /// Ouvre le visualiseur (statistiques + histogramme)
    #[arg(short, long)]
    chart: bool,

    /// Affiche le résultat en JSON
    #[arg(long, conflicts_with = "chart")]
    json: bool,

    /// Répertoire des fichiers de cotations
    #[arg(long, env = "PRICEBEHAVIOR_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Fichier de configuration JSON
    #[arg(long)]
    config: Option<PathBuf>,
}

// ============================================================================
// Initialisation du logging
// ============================================================================
// CONCEPT : Logging dans une app TUI
// - Les println! cassent l'affichage une fois le TUI lancé
// - On log vers un fichier à la place, avec rotation quotidienne
// ============================================================================

/// Initialise le système de logging vers fichier
///
/// Les logs sont écrits dans :
/// - Linux : ~/.local/share/pricebehavior/logs/pricebehavior.log
/// - macOS : ~/Library/Application Support/pricebehavior/logs/pricebehavior.log
///
/// ```bash
/// RUST_LOG=pricebehavior=trace pricebehavior MU close_open
/// ```
fn init_logging() -> Result<PathBuf> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = dirs::data_local_dir()
        .map(|dir| dir.join("pricebehavior").join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"));

    std::fs::create_dir_all(&log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "pricebehavior.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false) // Pas de codes couleur dans le fichier
                .with_target(true)
                .with_line_number(true),
        )
        .with(
            // RUST_LOG prioritaire, sinon debug pour nous et info pour les dépendances
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pricebehavior=debug,info".into()),
        )
        .try_init()
        .context("Échec de l'initialisation du subscriber")?;

    info!(?log_dir, "Logging initialisé");
    Ok(log_dir)
}

// ============================================================================
// Chargement de la configuration
// ============================================================================

/// Ordre de recherche : --config, puis le fichier par défaut s'il existe,
/// sinon les valeurs par défaut. --data-dir remplace data_dir.
fn resolve_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => load_settings(path)
            .with_context(|| format!("Impossible de lire la configuration {}", path.display()))?,
        None => match default_config_path().filter(|path| path.is_file()) {
            Some(path) => load_settings(&path)
                .with_context(|| format!("Configuration invalide {}", path.display()))?,
            None => {
                debug!("No configuration file, using defaults");
                Settings::default()
            }
        },
    };

    if let Some(dir) = &cli.data_dir {
        settings.data_dir = dir.clone();
    }

    Ok(settings)
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging en premier ; un échec n'empêche pas l'analyse
    if let Err(e) = init_logging() {
        eprintln!("Warning: failed to initialize logging: {:#}", e);
    }

    info!(ticker = %cli.ticker, price_range = %cli.price_range, "PriceBehavior starting up");

    let result = execute(&cli);
    if let Err(e) = &result {
        error!(error = ?e, "Analysis failed");
    }
    result
}

/// Valide les paramètres, lance l'analyse et affiche le résultat
fn execute(cli: &Cli) -> Result<()> {
    let settings = resolve_settings(cli)?;

    let request = AnalysisRequest::from_raw(
        &cli.ticker,
        &cli.price_range,
        cli.boundary,
        cli.intra_time.as_deref(),
        cli.chart,
        &settings,
    )
    .context("Paramètre invalide")?;

    let report = analysis::run(&request, &settings)
        .with_context(|| format!("Échec de l'analyse de {}", request.ticker))?;

    if request.chart {
        show_viewer(report, settings.histogram_step)
    } else if cli.json {
        print_json(&report)
    } else {
        print_text(&report);
        Ok(())
    }
}

// ============================================================================
// Sorties texte et JSON
// ============================================================================

/// Une statistique par ligne, valeurs arrondies
fn print_text(report: &AnalysisReport) {
    println!("{} - {}", report.ticker, report.title());
    for (name, value) in report.summary.rounded().entries() {
        println!("{}: {}", name, value);
    }
}

/// Objet JSON : paramètres + statistiques arrondies (NaN -> null)
fn print_json(report: &AnalysisReport) -> Result<()> {
    let value = serde_json::json!({
        "ticker": report.ticker,
        "price_range": report.price_range,
        "intra_time": report.intra_time.map(|t| t.label()),
        "boundary": report.boundary,
        "trading_days": report.trading_days,
        "summary": report.summary.rounded(),
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

// ============================================================================
// Visualiseur TUI
// ============================================================================

fn show_viewer(report: AnalysisReport, histogram_step: f64) -> Result<()> {
    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    let mut app = App::new(report, histogram_step);
    let events = EventHandler::default();

    let result = run_viewer(&mut terminal, &mut app, &events);

    // Restaure le terminal (même en cas d'erreur)
    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    result
}

/// Boucle Render -> Input jusqu'à ce que l'utilisateur quitte
fn run_viewer(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    while app.is_running() {
        terminal.draw(|frame| render(frame, app))?;
        let event = events.next()?;
        handle_event(app, &event);
    }
    Ok(())
}

/// Traite une touche
fn handle_event(app: &mut App, event: &Event) {
    if is_quit_event(event) || is_escape_event(event) {
        app.quit();
    } else if is_tab_event(event) {
        app.toggle_screen();
    } else if is_summary_event(event) {
        app.show_summary();
    } else if is_histogram_event(event) {
        app.show_histogram();
    }
}

// ============================================================================
// Setup et restauration du terminal
// ============================================================================
// CONCEPT : Raw mode + alternate screen
// - Raw mode : on reçoit tous les caractères directement
// - Alternate screen : l'écran précédent est restauré en sortant
// ============================================================================

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| e.into())
}

/// Toujours appelé avant de quitter, sinon le terminal reste en raw mode
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "pricebehavior",
            "MU",
            "intraprice_open",
            "--boundary",
            "0.25",
            "--intra-time",
            "1900",
        ])
        .unwrap();

        assert_eq!(cli.ticker, "MU");
        assert_eq!(cli.boundary, 0.25);
        assert_eq!(cli.intra_time.as_deref(), Some("1900"));
        assert!(!cli.chart);
    }

    #[test]
    fn test_cli_accepts_negative_boundary_for_validation() {
        let cli =
            Cli::try_parse_from(["pricebehavior", "MU", "close_open", "--boundary", "-1"]).unwrap();
        assert_eq!(cli.boundary, -1.0);
    }

    #[test]
    fn test_json_conflicts_with_chart() {
        assert!(Cli::try_parse_from(["pricebehavior", "MU", "close_open", "--chart", "--json"]).is_err());
    }
}
