// ============================================================================
// Structure : Ticker
// ============================================================================
// Représente un symbole boursier validé (ex: "MSFT", "MU")
//
// CONCEPTS RUST :
// 1. String vs &str :
//    - String : owned string (le Ticker possède son symbole)
//    - &str : on reçoit une référence, on crée une String normalisée
//
// 2. Constructeur faillible :
//    - parse() retourne Result<Ticker>
//    - Un Ticker existant est toujours en majuscules et non vide
// ============================================================================

use std::fmt;

use serde::Serialize;

use crate::error::{AnalysisError, Result};

/// Ticker représentant un symbole boursier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Ticker {
    /// Symbole en majuscules (ex: "AAPL", "BRK.B")
    symbol: String,
}

impl Ticker {
    /// Normalise et valide un symbole
    ///
    /// - espaces retirés, mis en majuscules ("mu" -> "MU")
    /// - caractères autorisés : alphanumériques ASCII, '.' et '-'
    /// - si `valid` n'est pas vide, le symbole doit y figurer
    pub fn parse(raw: &str, valid: &[String]) -> Result<Self> {
        let symbol = raw.trim().to_uppercase();

        let well_formed = !symbol.is_empty()
            && symbol
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
        if !well_formed {
            return Err(AnalysisError::InvalidTicker(raw.to_string()));
        }

        if !valid.is_empty() && !valid.iter().any(|v| v.eq_ignore_ascii_case(&symbol)) {
            return Err(AnalysisError::UnknownTicker {
                ticker: symbol,
                valid: valid.join(", "),
            });
        }

        Ok(Self { symbol })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol)
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_normalized() {
        let ticker = Ticker::parse(" mu ", &[]).unwrap();
        assert_eq!(ticker.symbol(), "MU");
        assert_eq!(ticker.to_string(), "MU");
    }

    #[test]
    fn test_ticker_rejects_garbage() {
        assert!(Ticker::parse("", &[]).is_err());
        assert!(Ticker::parse("../etc/passwd", &[]).is_err());
        assert!(Ticker::parse("MS FT", &[]).is_err());
    }

    #[test]
    fn test_ticker_whitelist() {
        let valid: Vec<String> = ["AMAT", "C", "JD", "MSFT", "MU", "TWTR"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        assert!(Ticker::parse("twtr", &valid).is_ok());

        let err = Ticker::parse("OXY", &valid).unwrap_err();
        assert!(matches!(err, AnalysisError::UnknownTicker { .. }));
        assert!(err.is_invalid_parameter());
    }
}
