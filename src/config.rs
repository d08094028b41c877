// ============================================================================
// Module : config
// ============================================================================
// Paramètres de l'outil, chargés depuis un fichier JSON optionnel
//
// Exemple de fichier :
// {
//     "data_dir": "/srv/quotes/IntraQuotes",
//     "valid_tickers": ["AMAT", "C", "JD", "MSFT", "MU", "TWTR"],
//     "histogram_step": 0.5
// }
//
// CONCEPT RUST : #[serde(default)]
// - Les champs absents du JSON prennent la valeur de Settings::default()
// - Un fichier vide "{}" est donc valide
// ============================================================================

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveTime;
use serde::Deserialize;
use tracing::debug;

use crate::error::{AnalysisError, Result};
use crate::models::{Ticker, TradingSession};

/// Paramètres de l'application
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Répertoire des fichiers de cotations (un fichier par ticker)
    pub data_dir: PathBuf,

    /// Extension des fichiers de cotations ("txt" -> MU.txt)
    pub file_extension: String,

    /// Horodatage de la première barre de la séance ("HH:MM")
    pub session_open: String,

    /// Horodatage de la dernière barre de la séance ("HH:MM")
    pub session_last_bar: String,

    /// Première barre des jours décalés d'une heure ("HH:MM")
    pub late_start_marker: String,

    /// Tickers acceptés (vide = tous ceux qui ont un fichier)
    pub valid_tickers: Vec<String>,

    /// Largeur des classes de l'histogramme
    pub histogram_step: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("IntraQuotes"),
            file_extension: "txt".to_string(),
            session_open: "15:30".to_string(),
            session_last_bar: "21:55".to_string(),
            late_start_marker: "14:30".to_string(),
            valid_tickers: Vec::new(),
            histogram_step: 0.25,
        }
    }
}

impl Settings {
    /// Horaires de séance validés
    pub fn session(&self) -> Result<TradingSession> {
        TradingSession::new(
            parse_clock(&self.session_open)?,
            parse_clock(&self.session_last_bar)?,
            parse_clock(&self.late_start_marker)?,
        )
    }

    /// Chemin du fichier de cotations d'un ticker
    pub fn quotes_path(&self, ticker: &Ticker) -> PathBuf {
        self.data_dir
            .join(format!("{}.{}", ticker.symbol(), self.file_extension))
    }

    /// Vérifie la cohérence des valeurs numériques et horaires
    pub fn validate(&self) -> Result<()> {
        if !(self.histogram_step.is_finite() && self.histogram_step > 0.0) {
            return Err(AnalysisError::Config(format!(
                "histogram_step must be positive, got {}",
                self.histogram_step
            )));
        }
        self.session()?;
        Ok(())
    }
}

/// Parse une heure "HH:MM" (ou "HH:MM:SS")
fn parse_clock(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| AnalysisError::Config(format!("invalid time of day '{}'", value)))
}

/// Charge les paramètres depuis un fichier JSON
pub fn load_settings(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path)?;
    let settings: Settings = serde_json::from_str(&content)
        .map_err(|e| AnalysisError::Config(format!("{}: {}", path.display(), e)))?;
    settings.validate()?;

    debug!(path = %path.display(), "Settings loaded");
    Ok(settings)
}

/// Emplacement par défaut du fichier de configuration
///
/// - Linux : ~/.config/pricebehavior/config.json
/// - macOS : ~/Library/Application Support/pricebehavior/config.json
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pricebehavior").join("config.json"))
}
