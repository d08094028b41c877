// ============================================================================
// Module : error
// ============================================================================
// Erreurs typées de la bibliothèque
//
// CONCEPT RUST : thiserror
// - #[derive(Error)] génère l'implémentation de std::error::Error
// - #[error("...")] définit le message Display de chaque variant
// - #[from] génère la conversion automatique (utilisable avec ?)
//
// Le binaire utilise anyhow par-dessus, la bibliothèque garde des erreurs
// précises pour que l'appelant puisse distinguer "paramètre invalide" des
// erreurs d'I/O.
// ============================================================================

use std::path::PathBuf;

use thiserror::Error;

/// Alias de Result pour toute la bibliothèque
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Erreurs possibles lors d'une analyse
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Invalid ticker symbol: '{0}'")]
    InvalidTicker(String),

    #[error("Ticker '{ticker}' is not in the list of valid tickers ({valid})")]
    UnknownTicker { ticker: String, valid: String },

    #[error(
        "Invalid price range '{0}' (expected open_priorclose, close_open, close_priorclose or intraprice_open)"
    )]
    InvalidPriceRange(String),

    #[error("Invalid boundary {0}: must be a positive number")]
    InvalidBoundary(f64),

    #[error("An intraday time (HHMM) is required for intraprice_open")]
    MissingIntraTime,

    #[error("Invalid intraday time '{value}': {reason}")]
    InvalidIntraTime { value: String, reason: String },

    #[error("No quotes file for ticker '{ticker}' ({})", path.display())]
    TickerNotFound { ticker: String, path: PathBuf },

    #[error("Malformed quote on line {line}: {message}")]
    MalformedQuote { line: u64, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl AnalysisError {
    /// Vrai si l'erreur vient des paramètres fournis par l'appelant
    /// (un ticker sans fichier de cotations compte comme paramètre invalide)
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(
            self,
            AnalysisError::InvalidTicker(_)
                | AnalysisError::UnknownTicker { .. }
                | AnalysisError::InvalidPriceRange(_)
                | AnalysisError::InvalidBoundary(_)
                | AnalysisError::MissingIntraTime
                | AnalysisError::InvalidIntraTime { .. }
                | AnalysisError::TickerNotFound { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_classification() {
        assert!(AnalysisError::InvalidBoundary(-0.5).is_invalid_parameter());
        assert!(AnalysisError::InvalidPriceRange("intra_open".into()).is_invalid_parameter());
        assert!(AnalysisError::TickerNotFound {
            ticker: "OXY".into(),
            path: PathBuf::from("IntraQuotes/OXY.txt"),
        }
        .is_invalid_parameter());

        assert!(!AnalysisError::MalformedQuote { line: 3, message: "bad".into() }
            .is_invalid_parameter());
        assert!(!AnalysisError::Config("bad".into()).is_invalid_parameter());
    }

    #[test]
    fn test_error_messages() {
        let err = AnalysisError::InvalidBoundary(0.0);
        assert_eq!(err.to_string(), "Invalid boundary 0: must be a positive number");
    }
}
