// ============================================================================
// Structure : Summary
// ============================================================================
// Les sept statistiques de l'échantillon d'écarts de prix
//
// Les noms des champs sont aussi les clés du résultat (JSON, to_map()).
//
// Échantillon vide : pas d'erreur, les statistiques sont "dégénérées"
// (compteurs à 0, tout le reste à NaN). Avec un seul écart, std vaut NaN
// (dénominateur n - 1 nul).
// ============================================================================

use std::collections::BTreeMap;

use serde::Serialize;

/// Statistiques descriptives d'un échantillon d'écarts
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub min_price_change: f64,
    pub max_price_change: f64,
    pub all_obs_number: usize,
    /// Écarts strictement compris dans ]-boundary, +boundary[
    pub obs_btw_boundaries: usize,
    pub obs_btw_boundaries_perc: f64,
    pub mean: f64,
    /// Écart-type de l'échantillon (n - 1)
    pub std: f64,
}

impl Summary {
    /// Calcule les statistiques en une passe pour min/max/compte/somme,
    /// une seconde pour la variance
    pub fn from_sample(sample: &[f64], boundary: f64) -> Self {
        let n = sample.len();

        // CONCEPT RUST : fold
        // - min et max en un seul passage
        // - f64::min ignore un NaN, on part de ±infini
        let (min, max, sum) = sample.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(min, max, sum), &v| (min.min(v), max.max(v), sum + v),
        );

        let inside = sample
            .iter()
            .filter(|&&v| v > -boundary && v < boundary)
            .count();

        if n == 0 {
            return Self {
                min_price_change: f64::NAN,
                max_price_change: f64::NAN,
                all_obs_number: 0,
                obs_btw_boundaries: 0,
                obs_btw_boundaries_perc: f64::NAN,
                mean: f64::NAN,
                std: f64::NAN,
            };
        }

        let mean = sum / n as f64;
        let std = if n > 1 {
            let squares: f64 = sample.iter().map(|v| (v - mean).powi(2)).sum();
            (squares / (n - 1) as f64).sqrt()
        } else {
            f64::NAN
        };

        Self {
            min_price_change: min,
            max_price_change: max,
            all_obs_number: n,
            obs_btw_boundaries: inside,
            obs_btw_boundaries_perc: inside as f64 / n as f64 * 100.0,
            mean,
            std,
        }
    }

    /// Vrai si l'échantillon était vide
    pub fn is_degenerate(&self) -> bool {
        self.all_obs_number == 0
    }

    /// Copie arrondie pour l'affichage :
    /// min/max à 2 décimales, pourcentage à 1, moyenne et écart-type à 3
    pub fn rounded(&self) -> Self {
        Self {
            min_price_change: round_to(self.min_price_change, 2),
            max_price_change: round_to(self.max_price_change, 2),
            obs_btw_boundaries_perc: round_to(self.obs_btw_boundaries_perc, 1),
            mean: round_to(self.mean, 3),
            std: round_to(self.std, 3),
            ..*self
        }
    }

    /// Les sept statistiques, dans l'ordre d'affichage
    pub fn entries(&self) -> [(&'static str, f64); 7] {
        [
            ("min_price_change", self.min_price_change),
            ("max_price_change", self.max_price_change),
            ("all_obs_number", self.all_obs_number as f64),
            ("obs_btw_boundaries", self.obs_btw_boundaries as f64),
            ("obs_btw_boundaries_perc", self.obs_btw_boundaries_perc),
            ("mean", self.mean),
            ("std", self.std),
        ]
    }

    /// Les statistiques sous forme de dictionnaire nom -> valeur
    pub fn to_map(&self) -> BTreeMap<&'static str, f64> {
        self.entries().into_iter().collect()
    }
}

/// Arrondi à `decimals` décimales, demi-valeurs au pair (arrondi bancaire)
fn round_to(value: f64, decimals: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}
