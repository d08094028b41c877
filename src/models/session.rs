// ============================================================================
// Structures : TradingSession et IntraTime
// ============================================================================
// TradingSession décrit la séance (heure locale des fichiers de cotations) :
// - open : horodatage de la première barre de 5 minutes (15:30)
// - last_bar : horodatage de la dernière barre (21:55)
// - late_start_marker : première barre des jours décalés d'une heure (14:30)
//
// IntraTime est une heure intraday validée : sur la grille de 5 minutes,
// entre open et last_bar inclus.
//
// CONCEPT RUST : Newtype pattern
// - IntraTime enveloppe un NaiveTime
// - Impossible de construire un IntraTime invalide hors de ce module
// ============================================================================

use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::Serialize;

use crate::error::{AnalysisError, Result};

/// Durée d'une barre de cotation, en minutes
pub const BAR_MINUTES: u32 = 5;

/// Horaires de la séance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradingSession {
    pub open: NaiveTime,
    pub last_bar: NaiveTime,
    pub late_start_marker: NaiveTime,
}

impl TradingSession {
    pub fn new(open: NaiveTime, last_bar: NaiveTime, late_start_marker: NaiveTime) -> Result<Self> {
        if last_bar < open {
            return Err(AnalysisError::Config(format!(
                "session last bar {} is before session open {}",
                last_bar.format("%H:%M"),
                open.format("%H:%M")
            )));
        }
        Ok(Self {
            open,
            last_bar,
            late_start_marker,
        })
    }

    /// Vrai si l'heure est dans la séance (bornes incluses)
    pub fn contains(&self, time: NaiveTime) -> bool {
        time >= self.open && time <= self.last_bar
    }
}

impl Default for TradingSession {
    /// Séance US en heure de Budapest : 15:30 → 21:55 (dernière barre)
    fn default() -> Self {
        Self {
            open: hm(15, 30),
            last_bar: hm(21, 55),
            late_start_marker: hm(14, 30),
        }
    }
}

/// Construit une heure HH:MM:00 (valeurs constantes, toujours valides)
fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

/// Heure intraday validée pour la règle intraprice_open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntraTime(NaiveTime);

impl IntraTime {
    /// Parse une heure au format "HHMM" (ex: "1900")
    ///
    /// Règles :
    /// - exactement 4 chiffres
    /// - minutes multiples de 5
    /// - dans la séance, bornes incluses ("1530" et "2155" sont valides)
    pub fn parse(raw: &str, session: &TradingSession) -> Result<Self> {
        let invalid = |reason: &str| AnalysisError::InvalidIntraTime {
            value: raw.to_string(),
            reason: reason.to_string(),
        };

        if raw.len() != 4 || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected four digits HHMM"));
        }

        // Les 4 octets sont des chiffres ASCII : le découpage est sûr
        let hour: u32 = raw[..2].parse().map_err(|_| invalid("bad hour"))?;
        let minute: u32 = raw[2..].parse().map_err(|_| invalid("bad minute"))?;

        let time = NaiveTime::from_hms_opt(hour, minute, 0)
            .ok_or_else(|| invalid("not a valid time of day"))?;

        if minute % BAR_MINUTES != 0 {
            return Err(invalid("minutes must be a multiple of 5"));
        }

        if !session.contains(time) {
            return Err(invalid(&format!(
                "outside the trading session {}-{}",
                session.open.format("%H%M"),
                session.last_bar.format("%H%M")
            )));
        }

        Ok(Self(time))
    }

    pub fn time(&self) -> NaiveTime {
        self.0
    }

    /// Forme "HHMM", comme saisie par l'utilisateur
    pub fn label(&self) -> String {
        format!("{:02}{:02}", self.0.hour(), self.0.minute())
    }
}

impl fmt::Display for IntraTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> TradingSession {
        TradingSession::default()
    }

    #[test]
    fn test_intra_time_valid_bounds() {
        let first = IntraTime::parse("1530", &session()).unwrap();
        assert_eq!(first.time(), hm(15, 30));

        let last = IntraTime::parse("2155", &session()).unwrap();
        assert_eq!(last.label(), "2155");

        assert!(IntraTime::parse("1800", &session()).is_ok());
    }

    #[test]
    fn test_intra_time_out_of_session() {
        // Avant l'ouverture
        assert!(IntraTime::parse("1200", &session()).is_err());
        assert!(IntraTime::parse("1525", &session()).is_err());
        // Après la dernière barre
        assert!(IntraTime::parse("2200", &session()).is_err());
        assert!(IntraTime::parse("2300", &session()).is_err());
    }

    #[test]
    fn test_intra_time_malformed() {
        assert!(IntraTime::parse("1803", &session()).is_err()); // hors grille
        assert!(IntraTime::parse("18000", &session()).is_err());
        assert!(IntraTime::parse("xxxx", &session()).is_err());
        assert!(IntraTime::parse("18:00", &session()).is_err());
        assert!(IntraTime::parse("1875", &session()).is_err());
        assert!(IntraTime::parse("", &session()).is_err());

        let err = IntraTime::parse("1803", &session()).unwrap_err();
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn test_session_rejects_inverted_times() {
        assert!(TradingSession::new(hm(16, 0), hm(15, 0), hm(14, 30)).is_err());
    }
}
