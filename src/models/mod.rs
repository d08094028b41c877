// ============================================================================
// Module : models
// ============================================================================
// Ce module contient toutes les structures de données de l'application
//
// CONCEPT RUST : Modules et visibilité
// - "pub mod" : déclare un sous-module publique (accessible depuis l'extérieur)
// - Sans "pub", le module serait privé au crate
// ============================================================================

pub mod ohlc;        // Barres de 5 minutes et table de cotations
pub mod price_range; // Règle de calcul de l'écart de prix
pub mod session;     // Horaires de séance et heure intraday
pub mod ticker;      // Symbole boursier validé

// Re-export des structures principales pour simplifier les imports
pub use ohlc::{Quote, QuoteTable, TradingDay};
pub use price_range::PriceRange;
pub use session::{IntraTime, TradingSession, BAR_MINUTES};
pub use ticker::Ticker;
