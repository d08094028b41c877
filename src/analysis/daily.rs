// ============================================================================
// Prix journaliers et échantillon d'écarts
// ============================================================================
// Pour chaque jour de cotation on extrait :
// - open  : Open de la barre de 15:30 (ouverture de séance)
// - close : Close de la dernière barre du jour
// - intra : Close de la barre à l'heure demandée (si présente)
//
// Puis chaque PriceRange combine deux de ces prix. Un jour auquel il manque
// un des deux prix est simplement ignoré (ex: le premier jour n'a pas de
// clôture de la veille, une séance courte n'a pas de barre à 21:00).
// ============================================================================

use chrono::NaiveDate;

use crate::models::{IntraTime, PriceRange, QuoteTable, TradingSession};

/// Prix retenus pour un jour de cotation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyPrices {
    pub date: NaiveDate,
    pub open: Option<f64>,
    pub close: Option<f64>,
    pub intra: Option<f64>,
}

/// Extrait les prix de chaque jour de la table
pub fn daily_prices(
    table: &QuoteTable,
    session: &TradingSession,
    intra_time: Option<IntraTime>,
) -> Vec<DailyPrices> {
    table
        .days()
        .iter()
        .map(|day| DailyPrices {
            date: day.date,
            open: day.at(session.open).map(|q| q.open),
            close: day.last().map(|q| q.close),
            intra: intra_time.and_then(|t| day.at(t.time())).map(|q| q.close),
        })
        .collect()
}

/// Calcule l'écart (comparaison - référence) pour chaque jour complet
///
/// CONCEPT RUST : Option combinators
/// - zip() : Some((a, b)) seulement si les deux sont Some
/// - map() : applique la soustraction
/// - filter_map() : garde uniquement les jours complets
pub fn difference_sample(days: &[DailyPrices], range: PriceRange) -> Vec<f64> {
    // La veille de days[i] est days[i - 1] : pas de veille pour le premier jour
    let prior_close = |i: usize| i.checked_sub(1).and_then(|p| days[p].close);

    days.iter()
        .enumerate()
        .filter_map(|(i, day)| {
            let (comparison, reference) = match range {
                PriceRange::OpenPriorClose => (day.open, prior_close(i)),
                PriceRange::CloseOpen => (day.close, day.open),
                PriceRange::ClosePriorClose => (day.close, prior_close(i)),
                PriceRange::IntraPriceOpen => (day.intra, day.open),
            };
            comparison.zip(reference).map(|(c, r)| c - r)
        })
        .collect()
}
