// ============================================================================
// Enum : PriceRange
// ============================================================================
// La règle qui choisit les deux prix comparés chaque jour de cotation
//
// CONCEPT RUST : FromStr
// - Trait standard pour parser une valeur depuis une &str
// - Permet d'écrire "close_open".parse::<PriceRange>()
// - L'erreur est typée (AnalysisError::InvalidPriceRange)
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Écart de prix à analyser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceRange {
    /// Ouverture du jour - clôture de la veille
    #[serde(rename = "open_priorclose")]
    OpenPriorClose,

    /// Clôture du jour - ouverture du jour
    #[serde(rename = "close_open")]
    CloseOpen,

    /// Clôture du jour - clôture de la veille
    #[serde(rename = "close_priorclose")]
    ClosePriorClose,

    /// Prix à une heure donnée - ouverture du jour
    #[serde(rename = "intraprice_open")]
    IntraPriceOpen,
}

impl PriceRange {
    /// Nom utilisé en ligne de commande et dans les résultats
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceRange::OpenPriorClose => "open_priorclose",
            PriceRange::CloseOpen => "close_open",
            PriceRange::ClosePriorClose => "close_priorclose",
            PriceRange::IntraPriceOpen => "intraprice_open",
        }
    }

    /// Libellé lisible (titre de l'histogramme)
    ///
    /// Pour IntraPriceOpen, l'heure est ajoutée par AnalysisReport::title()
    pub fn description(&self) -> &'static str {
        match self {
            PriceRange::OpenPriorClose => "Open-Prior Close Price Difference",
            PriceRange::CloseOpen => "Close-Open Price Difference",
            PriceRange::ClosePriorClose => "Close-Prior Close Price Difference",
            PriceRange::IntraPriceOpen => "Intraday Price - Open Price Difference",
        }
    }

    /// Vrai si la règle a besoin d'une heure intraday
    pub fn requires_intra_time(&self) -> bool {
        matches!(self, PriceRange::IntraPriceOpen)
    }

    /// Vrai si la règle compare avec la séance précédente
    /// (le premier jour du fichier est alors toujours ignoré)
    pub fn uses_prior_close(&self) -> bool {
        matches!(self, PriceRange::OpenPriorClose | PriceRange::ClosePriorClose)
    }

    /// Toutes les règles disponibles
    pub fn all() -> [PriceRange; 4] {
        [
            PriceRange::OpenPriorClose,
            PriceRange::CloseOpen,
            PriceRange::ClosePriorClose,
            PriceRange::IntraPriceOpen,
        ]
    }
}

impl FromStr for PriceRange {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // CONCEPT RUST : Iterator::find
        // - Parcourt les variants et compare leur nom
        // - Pas de conversion de casse : les noms sont exacts
        PriceRange::all()
            .into_iter()
            .find(|range| range.as_str() == s.trim())
            .ok_or_else(|| AnalysisError::InvalidPriceRange(s.to_string()))
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
