// ============================================================================
// PriceBehavior - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod analysis;  // Écarts de prix et statistiques
pub mod app;       // État du visualiseur
pub mod config;    // Paramètres (fichier JSON)
pub mod data;      // Lecture des fichiers de cotations
pub mod error;     // Erreurs typées
pub mod models;    // Structures de données
pub mod ui;        // Interface utilisateur

pub use analysis::{run, AnalysisReport, AnalysisRequest, Summary};
pub use config::Settings;
pub use error::{AnalysisError, Result};
