// ============================================================================
// Module : analysis
// ============================================================================
// Analyseur d'écarts de prix :
// 1. charge la table de cotations du ticker
// 2. extrait les prix de chaque jour (open, close, intraday)
// 3. calcule l'échantillon d'écarts selon le PriceRange
// 4. résume l'échantillon (Summary) et, si demandé, prépare l'histogramme
//
// Tout est synchrone : une seule passe sur une table en mémoire.
// ============================================================================

pub mod daily;     // Prix journaliers et échantillon d'écarts
pub mod histogram; // Classes de l'histogramme
pub mod summary;   // Les sept statistiques

pub use daily::{daily_prices, difference_sample, DailyPrices};
pub use histogram::{Histogram, HistogramBin};
pub use summary::Summary;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::config::Settings;
use crate::data::load_quotes;
use crate::error::{AnalysisError, Result};
use crate::models::{IntraTime, PriceRange, QuoteTable, Ticker, TradingSession};

// ============================================================================
// Requête
// ============================================================================

/// Paramètres validés d'une analyse
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub ticker: Ticker,
    pub price_range: PriceRange,
    /// Seuil strictement positif : compte les écarts dans ]-boundary, +boundary[
    pub boundary: f64,
    /// Requis uniquement pour PriceRange::IntraPriceOpen
    pub intra_time: Option<IntraTime>,
    /// Afficher l'histogramme
    pub chart: bool,
}

impl AnalysisRequest {
    /// Construit une requête après validation
    pub fn new(
        ticker: Ticker,
        price_range: PriceRange,
        boundary: f64,
        intra_time: Option<IntraTime>,
        chart: bool,
    ) -> Result<Self> {
        validate_boundary(boundary)?;
        if price_range.requires_intra_time() && intra_time.is_none() {
            return Err(AnalysisError::MissingIntraTime);
        }

        Ok(Self {
            ticker,
            price_range,
            boundary,
            intra_time,
            chart,
        })
    }

    /// Valide des paramètres bruts (saisie utilisateur)
    ///
    /// L'heure intraday n'est lue que pour intraprice_open ; pour les autres
    /// règles elle est ignorée, même mal formée.
    pub fn from_raw(
        ticker: &str,
        price_range: &str,
        boundary: f64,
        intra_time: Option<&str>,
        chart: bool,
        settings: &Settings,
    ) -> Result<Self> {
        let ticker = Ticker::parse(ticker, &settings.valid_tickers)?;
        let price_range: PriceRange = price_range.parse()?;
        validate_boundary(boundary)?;

        let intra_time = if price_range.requires_intra_time() {
            let raw = intra_time.ok_or(AnalysisError::MissingIntraTime)?;
            Some(IntraTime::parse(raw.trim(), &settings.session()?)?)
        } else {
            if intra_time.is_some() {
                debug!(price_range = %price_range, "Intraday time ignored");
            }
            None
        };

        Self::new(ticker, price_range, boundary, intra_time, chart)
    }
}

fn validate_boundary(boundary: f64) -> Result<()> {
    // CONCEPT : NaN n'est ni > 0 ni <= 0, d'où la forme !(... > 0.0)
    if !(boundary.is_finite() && boundary > 0.0) {
        return Err(AnalysisError::InvalidBoundary(boundary));
    }
    Ok(())
}

// ============================================================================
// Résultat
// ============================================================================

/// Résultat d'une analyse
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub ticker: Ticker,
    pub price_range: PriceRange,
    pub intra_time: Option<IntraTime>,
    pub boundary: f64,
    /// Nombre de jours de cotation dans le fichier
    pub trading_days: usize,
    #[serde(skip)]
    pub sample: Vec<f64>,
    pub summary: Summary,
}

impl AnalysisReport {
    /// Libellé de l'écart analysé
    ///
    /// Ex: "Close-Open Price Difference", "Intraday Price @1900 - Open Price Difference"
    pub fn title(&self) -> String {
        match (self.price_range, self.intra_time) {
            (PriceRange::IntraPriceOpen, Some(time)) => {
                format!("Intraday Price @{} - Open Price Difference", time.label())
            }
            (range, _) => range.description().to_string(),
        }
    }

    /// Histogramme de l'échantillon
    pub fn histogram(&self, step: f64) -> Histogram {
        Histogram::from_sample(&self.sample, step)
    }
}

// ============================================================================
// Point d'entrée
// ============================================================================

/// Exécute une analyse complète : chargement + calcul
#[instrument(skip_all, fields(ticker = %request.ticker, price_range = %request.price_range))]
pub fn run(request: &AnalysisRequest, settings: &Settings) -> Result<AnalysisReport> {
    let session = settings.session()?;
    let table = load_quotes(settings, &request.ticker)?;
    Ok(analyze(&table, request, &session))
}

/// Calcule le rapport à partir d'une table déjà chargée
pub fn analyze(table: &QuoteTable, request: &AnalysisRequest, session: &TradingSession) -> AnalysisReport {
    let days = daily_prices(table, session, request.intra_time);
    let sample = difference_sample(&days, request.price_range);

    let skipped = days.len() - sample.len();
    if skipped > 0 {
        debug!(skipped, "Days without a complete price pair");
    }

    let summary = Summary::from_sample(&sample, request.boundary);
    if summary.is_degenerate() {
        warn!(days = days.len(), "No day yields a complete price pair");
    } else {
        info!(
            observations = summary.all_obs_number,
            mean = summary.mean,
            std = summary.std,
            "Analysis complete"
        );
    }

    AnalysisReport {
        ticker: request.ticker.clone(),
        price_range: request.price_range,
        intra_time: request.intra_time,
        boundary: request.boundary,
        trading_days: days.len(),
        sample,
        summary,
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Deux jours : open=10/close=12 puis open=11/close=13, barre à 19:00
    const TWO_DAYS: &str = "\
2018.06.04,15:30:00,10.00,10.60,9.90,10.50,100
2018.06.04,19:00:00,10.50,11.30,10.40,11.20,100
2018.06.04,21:55:00,11.20,12.10,11.10,12.00,100
2018.06.05,15:30:00,11.00,11.50,10.90,11.40,100
2018.06.05,19:00:00,11.40,11.40,10.50,10.60,100
2018.06.05,21:55:00,10.60,13.10,10.60,13.00,100
";

    fn settings_with(files: &[(&str, &str)]) -> (tempfile::TempDir, Settings) {
        let dir = tempfile::tempdir().unwrap();
        for (name, content) in files {
            fs::write(dir.path().join(name), content).unwrap();
        }
        let settings = Settings {
            data_dir: dir.path().to_path_buf(),
            ..Settings::default()
        };
        (dir, settings)
    }

    #[test]
    fn test_run_close_open() {
        let (_dir, settings) = settings_with(&[("TEST.txt", TWO_DAYS)]);
        let request =
            AnalysisRequest::from_raw("test", "close_open", 0.5, None, false, &settings).unwrap();

        let report = run(&request, &settings).unwrap();
        let summary = report.summary;

        assert_eq!(report.trading_days, 2);
        assert_eq!(summary.all_obs_number, 2);
        assert_eq!(summary.min_price_change, 2.0);
        assert_eq!(summary.max_price_change, 2.0);
        assert_eq!(summary.mean, 2.0);
        assert_eq!(summary.std, 0.0);
        assert_eq!(summary.obs_btw_boundaries, 0);
        assert_eq!(report.title(), "Close-Open Price Difference");
    }

    #[test]
    fn test_run_intraprice_open() {
        let (_dir, settings) = settings_with(&[("TEST.txt", TWO_DAYS)]);
        let request =
            AnalysisRequest::from_raw("TEST", "intraprice_open", 0.5, Some("1900"), false, &settings)
                .unwrap();

        let report = run(&request, &settings).unwrap();
        assert_eq!(report.summary.all_obs_number, 2);
        // 11.2 - 10 = 1.2 et 10.6 - 11 = -0.4 : un seul écart dans ]-0.5, 0.5[
        assert_eq!(report.summary.obs_btw_boundaries, 1);
        assert_eq!(report.title(), "Intraday Price @1900 - Open Price Difference");
    }

    #[test]
    fn test_run_prior_close_has_n_minus_one_values() {
        let (_dir, settings) = settings_with(&[("TEST.txt", TWO_DAYS)]);
        for range in ["open_priorclose", "close_priorclose"] {
            let request = AnalysisRequest::from_raw("TEST", range, 1.0, None, false, &settings).unwrap();
            let report = run(&request, &settings).unwrap();
            assert_eq!(report.summary.all_obs_number, 1, "{range}");
        }
    }

    #[test]
    fn test_single_day_prior_close_is_degenerate() {
        let one_day = "2018.06.04,15:30:00,10,10,10,10,1\n2018.06.04,21:55:00,10,12,10,12,1\n";
        let (_dir, settings) = settings_with(&[("ONE.txt", one_day)]);
        let request =
            AnalysisRequest::from_raw("ONE", "close_priorclose", 0.5, None, false, &settings).unwrap();

        let report = run(&request, &settings).unwrap();
        assert!(report.summary.is_degenerate());
        assert!(report.summary.mean.is_nan());
        assert!(report.histogram(0.25).is_empty());
    }

    #[test]
    fn test_invalid_parameters() {
        let settings = Settings::default();

        let err = AnalysisRequest::from_raw("MU", "intra_open", 0.5, Some("1900"), false, &settings)
            .unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidPriceRange(_)));

        for boundary in [-0.5, 0.0, f64::NAN, f64::INFINITY] {
            let err = AnalysisRequest::from_raw("MU", "close_open", boundary, None, false, &settings)
                .unwrap_err();
            assert!(matches!(err, AnalysisError::InvalidBoundary(_)));
            assert!(err.is_invalid_parameter());
        }

        let err = AnalysisRequest::from_raw("MU", "intraprice_open", 0.5, None, false, &settings)
            .unwrap_err();
        assert!(matches!(err, AnalysisError::MissingIntraTime));

        for bad in ["1200", "2300", "1803", "xxxx", "18000"] {
            let err =
                AnalysisRequest::from_raw("MU", "intraprice_open", 0.5, Some(bad), false, &settings)
                    .unwrap_err();
            assert!(matches!(err, AnalysisError::InvalidIntraTime { .. }), "{bad}");
        }
    }

    #[test]
    fn test_intra_time_ignored_for_daily_ranges() {
        let settings = Settings::default();
        let request =
            AnalysisRequest::from_raw("AMAT", "open_priorclose", 0.5, Some("garbage"), false, &settings)
                .unwrap();
        assert!(request.intra_time.is_none());
    }

    #[test]
    fn test_missing_ticker_file() {
        let (_dir, settings) = settings_with(&[]);
        let request =
            AnalysisRequest::from_raw("TWTR1", "close_open", 0.5, None, false, &settings).unwrap();

        let err = run(&request, &settings).unwrap_err();
        assert!(matches!(err, AnalysisError::TickerNotFound { .. }));
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn test_report_serializes_summary_fields() {
        let (_dir, settings) = settings_with(&[("TEST.txt", TWO_DAYS)]);
        let request =
            AnalysisRequest::from_raw("TEST", "close_open", 0.5, None, false, &settings).unwrap();
        let report = run(&request, &settings).unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["price_range"], "close_open");
        assert_eq!(json["summary"]["all_obs_number"], 2);
        assert!(json.get("sample").is_none());
    }
}
