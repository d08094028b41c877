// ============================================================================
// Module : data
// ============================================================================
// Sources de données : fichiers de cotations 5 minutes, un par ticker
// ============================================================================

pub mod quotes; // Lecture des fichiers IntraQuotes

// Re-export des fonctions principales
pub use quotes::{adjust_late_start, load_quotes, read_quotes};
