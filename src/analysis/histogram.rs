// ============================================================================
// Structure : Histogram
// ============================================================================
// Classes de l'histogramme des écarts de prix
//
// Bornes : de floor(min) - 0.5 à ceil(max) + 0.5, par pas de `step`
// (0.25 par défaut). Une valeur sur une borne intérieure va dans la classe
// supérieure ; la dernière classe est fermée à droite.
// ============================================================================

use serde::Serialize;

/// Une classe de l'histogramme : [start, end[
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: u64,
}

impl HistogramBin {
    /// Centre de la classe (label de l'axe X)
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// Histogramme complet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub step: f64,
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    /// Construit l'histogramme d'un échantillon
    ///
    /// Les valeurs non finies sont ignorées ; un échantillon vide donne
    /// un histogramme sans classe.
    pub fn from_sample(sample: &[f64], step: f64) -> Self {
        let values: Vec<f64> = sample.iter().copied().filter(|v| v.is_finite()).collect();
        if values.is_empty() || !(step.is_finite() && step > 0.0) {
            return Self { step, bins: Vec::new() };
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let lower = min.floor() - 0.5;
        let upper = max.ceil() + 0.5;
        let bin_count = (((upper - lower) / step).round() as usize).max(1);

        let mut counts = vec![0u64; bin_count];
        for v in values {
            // Le dernier index est fermé à droite
            let idx = (((v - lower) / step).floor() as usize).min(bin_count - 1);
            counts[idx] += 1;
        }

        let bins = counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                start: lower + i as f64 * step,
                end: lower + (i + 1) as f64 * step,
                count,
            })
            .collect();

        Self { step, bins }
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Effectif de la classe la plus remplie
    pub fn max_count(&self) -> u64 {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }

    /// Somme des effectifs (= nombre de valeurs finies de l'échantillon)
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|b| b.count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_follow_floor_and_ceil() {
        let hist = Histogram::from_sample(&[0.1, -0.3, 0.6, -0.7], 0.25);
        let first = hist.bins.first().unwrap();
        let last = hist.bins.last().unwrap();

        // floor(-0.7) - 0.5 = -1.5 ; ceil(0.6) + 0.5 = 1.5
        assert_eq!(first.start, -1.5);
        assert_eq!(last.end, 1.5);
        assert_eq!(hist.bins.len(), 12);
        assert_eq!(hist.total(), 4);
    }

    #[test]
    fn test_value_on_inner_edge_goes_up() {
        // Bornes -0.5, -0.25, 0.0, 0.25, ... : 0.0 tombe dans [0.0, 0.25[
        let hist = Histogram::from_sample(&[0.0], 0.25);
        let bin = hist.bins.iter().find(|b| b.count == 1).unwrap();
        assert_eq!(bin.start, 0.0);
        assert_eq!(bin.end, 0.25);
    }

    #[test]
    fn test_constant_sample() {
        let hist = Histogram::from_sample(&[2.0, 2.0], 0.25);
        assert_eq!(hist.total(), 2);
        assert_eq!(hist.max_count(), 2);
    }

    #[test]
    fn test_empty_sample() {
        let hist = Histogram::from_sample(&[], 0.25);
        assert!(hist.is_empty());
        assert_eq!(hist.max_count(), 0);
    }

    #[test]
    fn test_center() {
        let bin = HistogramBin { start: -0.5, end: -0.25, count: 3 };
        assert_eq!(bin.center(), -0.375);
    }
}
