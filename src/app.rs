// ============================================================================
// Structure : App
// ============================================================================
// État du visualiseur terminal d'un rapport d'analyse
//
// CONCEPTS RUST :
// 1. State Management : un seul endroit pour l'état de l'écran
// 2. Mutabilité contrôlée : &mut self pour modifier l'état
//
// Le rapport est calculé avant l'ouverture du terminal ; l'App ne fait que
// le présenter (statistiques ou histogramme).
// ============================================================================

use crate::analysis::{AnalysisReport, Histogram};

// ============================================================================
// Enum : Screen
// ============================================================================
// CONCEPT RUST : Enums pour state machines
// - Un seul écran actif à la fois
// - Le compilateur force à gérer tous les cas
// ============================================================================

/// Écrans du visualiseur
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Tableau des sept statistiques
    Summary,

    /// Histogramme des écarts
    Histogram,
}

impl Screen {
    /// Écran suivant (Tab)
    pub fn next(self) -> Self {
        match self {
            Screen::Summary => Screen::Histogram,
            Screen::Histogram => Screen::Summary,
        }
    }
}

/// État principal du visualiseur
pub struct App {
    /// Indique si la boucle d'affichage doit continuer
    pub running: bool,

    /// Rapport affiché
    pub report: AnalysisReport,

    /// Classes précalculées de l'histogramme
    pub histogram: Histogram,

    /// Écran actuellement affiché
    pub current_screen: Screen,
}

impl App {
    /// Crée le visualiseur pour un rapport
    ///
    /// `histogram_step` : largeur des classes (Settings::histogram_step)
    pub fn new(report: AnalysisReport, histogram_step: f64) -> Self {
        let histogram = report.histogram(histogram_step);
        Self {
            running: true,
            report,
            histogram,
            current_screen: Screen::Histogram, // --chart : on ouvre sur le graphique
        }
    }

    /// Quitte le visualiseur
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Vérifie si le visualiseur doit continuer
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Bascule entre statistiques et histogramme
    pub fn toggle_screen(&mut self) {
        self.current_screen = self.current_screen.next();
    }

    pub fn show_summary(&mut self) {
        self.current_screen = Screen::Summary;
    }

    pub fn show_histogram(&mut self) {
        self.current_screen = Screen::Histogram;
    }

    pub fn is_on_histogram(&self) -> bool {
        self.current_screen == Screen::Histogram
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
