// ============================================================================
// Chargement des cotations : fichiers IntraQuotes
// ============================================================================
// Lit le fichier de cotations 5 minutes d'un ticker et construit la QuoteTable
//
// Format (CSV sans en-tête, une barre par ligne) :
//   Date,Time,Open,High,Low,Close,Volume
//   2018.01.02,15:30:00,44.50,44.98,44.30,44.71,251400
//
// CONCEPTS RUST :
// 1. Generics avec trait bound : read_quotes<R: Read> accepte un fichier,
//    un &[u8] (tests), un stdin...
// 2. Result<T, E> et ? : chaque ligne invalide arrête le chargement avec
//    son numéro de ligne
// ============================================================================

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};

use chrono::{Duration, NaiveDate, NaiveTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info, instrument, warn};

use crate::config::Settings;
use crate::error::{AnalysisError, Result};
use crate::models::{Quote, QuoteTable, Ticker, TradingSession};

/// Formats de date acceptés dans la première colonne
const DATE_FORMATS: [&str; 4] = ["%Y.%m.%d", "%Y-%m-%d", "%m/%d/%Y", "%Y%m%d"];

/// Formats d'heure acceptés dans la deuxième colonne
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

/// Nombre de colonnes attendues
const COLUMNS: usize = 7;

// ============================================================================
// Fonctions publiques
// ============================================================================

/// Charge les cotations d'un ticker depuis `settings.data_dir`
///
/// # Erreurs
/// * `TickerNotFound` si le fichier n'existe pas
/// * `MalformedQuote` si une ligne est invalide
///
/// CONCEPT RUST : #[instrument]
/// - Ajoute un span avec le ticker à tous les logs de la fonction
#[instrument(skip(settings), fields(ticker = %ticker))]
pub fn load_quotes(settings: &Settings, ticker: &Ticker) -> Result<QuoteTable> {
    let path = settings.quotes_path(ticker);
    debug!(path = %path.display(), "Opening quotes file");

    if !path.is_file() {
        warn!(path = %path.display(), "Quotes file not found");
        return Err(AnalysisError::TickerNotFound {
            ticker: ticker.symbol().to_string(),
            path,
        });
    }

    let session = settings.session()?;
    let file = File::open(&path)?;
    let table = read_quotes(BufReader::new(file), ticker.symbol(), &session)?;

    info!(
        quotes = table.len(),
        days = table.trading_days().len(),
        "Quotes loaded"
    );
    Ok(table)
}

/// Lit des cotations depuis n'importe quelle source et construit la table
///
/// Les jours décalés (voir adjust_late_start) sont corrigés ici.
pub fn read_quotes<R: Read>(
    reader: R,
    symbol: &str,
    session: &TradingSession,
) -> Result<QuoteTable> {
    // CONCEPT : Builder pattern (csv::ReaderBuilder)
    // - has_headers(false) : les fichiers IntraQuotes n'ont pas d'en-tête
    // - flexible(true) : on vérifie nous-mêmes le nombre de colonnes
    //   pour donner un message d'erreur avec le numéro de ligne
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut quotes = Vec::new();
    let mut blank_lines = 0;

    for result in csv_reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.iter().all(|field| field.is_empty()) {
            blank_lines += 1;
            continue;
        }

        quotes.push(parse_record(&record, line)?);
    }

    if blank_lines > 0 {
        debug!(blank_lines, "Skipped blank lines");
    }

    let adjusted = adjust_late_start(&mut quotes, session.late_start_marker);
    if adjusted > 0 {
        info!(days = adjusted, "Shifted late-start days by one hour");
    }

    Ok(QuoteTable::new(symbol.to_string(), quotes))
}

/// Décale d'une heure les jours dont la séance commence à `marker`
///
/// En 2018, l'heure d'été hongroise a commencé 2 semaines plus tard et fini
/// 1 semaine plus tôt qu'à New York : ces jours-là, la première barre est
/// horodatée 14:30 au lieu de 15:30. Toutes les barres du jour sont décalées.
///
/// Retourne le nombre de jours corrigés.
pub fn adjust_late_start(quotes: &mut [Quote], marker: NaiveTime) -> usize {
    // CONCEPT RUST : HashSet
    // - Ensemble des dates concernées, recherche en O(1)
    let late_days: HashSet<NaiveDate> = quotes
        .iter()
        .filter(|q| q.time == marker)
        .map(|q| q.date)
        .collect();

    if late_days.is_empty() {
        return 0;
    }

    for quote in quotes.iter_mut().filter(|q| late_days.contains(&q.date)) {
        quote.time += Duration::hours(1);
    }

    late_days.len()
}

// ============================================================================
// Parsing d'une ligne
// ============================================================================

/// Convertit une ligne CSV en Quote
fn parse_record(record: &StringRecord, line: u64) -> Result<Quote> {
    let malformed = |message: String| AnalysisError::MalformedQuote { line, message };

    if record.len() != COLUMNS {
        return Err(malformed(format!(
            "expected {} columns, found {}",
            COLUMNS,
            record.len()
        )));
    }

    let date = parse_date(&record[0]).ok_or_else(|| malformed(format!("bad date '{}'", &record[0])))?;
    let time = parse_time(&record[1]).ok_or_else(|| malformed(format!("bad time '{}'", &record[1])))?;

    let price = |index: usize, name: &str| -> Result<f64> {
        record[index]
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| malformed(format!("bad {} price '{}'", name, &record[index])))
    };

    let open = price(2, "open")?;
    let high = price(3, "high")?;
    let low = price(4, "low")?;
    let close = price(5, "close")?;
    let volume = parse_volume(&record[6])
        .ok_or_else(|| malformed(format!("bad volume '{}'", &record[6])))?;

    Ok(Quote::new(date, time, open, high, low, close, volume))
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

fn parse_time(value: &str) -> Option<NaiveTime> {
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(value, fmt).ok())
}

/// Volume entier, ou décimal tronqué ("1200.0" -> 1200)
fn parse_volume(value: &str) -> Option<u64> {
    value.parse::<u64>().ok().or_else(|| {
        value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| v.trunc() as u64)
    })
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn hms(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_read_quotes_basic() {
        let csv = "\
2018.01.02,15:30:00,44.50,44.98,44.30,44.71,251400
2018.01.02,15:35:00,44.71,44.80,44.60,44.62,120000
2018.01.03,15:30:00,44.90,45.10,44.85,45.00,98000.0
";
        let table = read_quotes(csv.as_bytes(), "MU", &TradingSession::default()).unwrap();

        assert_eq!(table.symbol, "MU");
        assert_eq!(table.len(), 3);
        assert_eq!(table.trading_days().len(), 2);

        let first = &table.quotes()[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2018, 1, 2).unwrap());
        assert_eq!(first.time, hms(15, 30));
        assert_eq!(first.open, 44.50);
        assert_eq!(first.close, 44.71);
        assert_eq!(table.quotes()[2].volume, 98000);
    }

    #[test]
    fn test_read_quotes_alternate_formats() {
        let csv = "2018-01-02,15:30,10,11,9,10.5,100\n01/03/2018,15:30,10.5,11,10,10.8,100\n";
        let table = read_quotes(csv.as_bytes(), "C", &TradingSession::default()).unwrap();
        assert_eq!(table.trading_days().len(), 2);
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let csv = "\
2018.01.02,15:30:00,44.50,44.98,44.30,44.71,251400
2018.01.02,15:35:00,abc,44.80,44.60,44.62,120000
";
        let err = read_quotes(csv.as_bytes(), "MU", &TradingSession::default()).unwrap_err();
        match err {
            AnalysisError::MalformedQuote { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("open"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_wrong_column_count() {
        let csv = "2018.01.02,15:30:00,44.50,44.98\n";
        let err = read_quotes(csv.as_bytes(), "MU", &TradingSession::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedQuote { line: 1, .. }));
    }

    #[test]
    fn test_late_start_day_is_shifted() {
        // Le 12 mars commence à 14:30 : toutes ses barres gagnent une heure
        let csv = "\
2018.03.12,14:30:00,10,10,10,10,1
2018.03.12,20:55:00,10,10,10,11,1
2018.03.13,15:30:00,11,11,11,11,1
2018.03.13,21:55:00,11,11,11,12,1
";
        let table = read_quotes(csv.as_bytes(), "JD", &TradingSession::default()).unwrap();
        let times: Vec<NaiveTime> = table.quotes().iter().map(|q| q.time).collect();
        assert_eq!(times, vec![hms(15, 30), hms(21, 55), hms(15, 30), hms(21, 55)]);
    }

    #[test]
    fn test_adjust_late_start_counts_days() {
        let date = NaiveDate::from_ymd_opt(2018, 3, 12).unwrap();
        let mut quotes = vec![
            Quote::new(date, hms(14, 30), 1.0, 1.0, 1.0, 1.0, 1),
            Quote::new(date, hms(14, 35), 1.0, 1.0, 1.0, 1.0, 1),
        ];
        assert_eq!(adjust_late_start(&mut quotes, hms(14, 30)), 1);
        assert_eq!(quotes[1].time, hms(15, 35));

        // Deuxième passage : plus rien à corriger
        assert_eq!(adjust_late_start(&mut quotes, hms(14, 30)), 0);
    }

    #[test]
    fn test_load_quotes_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            data_dir: dir.path().to_path_buf(),
            ..Settings::default()
        };
        let ticker = Ticker::parse("TWTR1", &[]).unwrap();

        let err = load_quotes(&settings, &ticker).unwrap_err();
        assert!(matches!(err, AnalysisError::TickerNotFound { .. }));
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn test_load_quotes_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = File::create(dir.path().join("MSFT.txt")).unwrap();
        writeln!(file, "2018.01.02,15:30:00,86.13,86.30,86.00,86.20,1000").unwrap();
        writeln!(file, "2018.01.02,21:55:00,86.20,86.40,86.10,85.95,1000").unwrap();

        let settings = Settings {
            data_dir: dir.path().to_path_buf(),
            ..Settings::default()
        };
        let ticker = Ticker::parse("msft", &[]).unwrap();

        let table = load_quotes(&settings, &ticker).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.symbol, "MSFT");
    }
}
