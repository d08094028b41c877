// ============================================================================
// Module : ui
// ============================================================================
// Visualiseur terminal d'un rapport d'analyse (option --chart)
// ============================================================================

pub mod events;    // Gestion des événements clavier
pub mod summary;   // Écran des statistiques
pub mod histogram; // Écran de l'histogramme

// Re-exports pour simplifier les imports
pub use events::{Event, EventHandler};
pub use summary::render;
