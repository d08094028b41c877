// ============================================================================
// Structures : Quote et QuoteTable
// ============================================================================
// Quote : une barre de cotation de 5 minutes (Open, High, Low, Close, Volume)
// QuoteTable : toutes les barres d'un ticker, triées par date puis heure
//
// CONCEPTS RUST :
// 1. NaiveDate / NaiveTime : dates et heures sans fuseau horaire
//    - Les fichiers sont en heure locale, on ne convertit rien
// 2. Slices (&[Quote]) : vue sur une partie du Vec sans copie
//    - Chaque jour de cotation est une slice contiguë du Vec trié
// ============================================================================

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Une barre de cotation de 5 minutes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Jour de cotation
    pub date: NaiveDate,

    /// Heure de la barre (heure de séance, après ajustement)
    pub time: NaiveTime,

    /// Prix d'ouverture (Open)
    pub open: f64,

    /// Prix le plus haut (High)
    pub high: f64,

    /// Prix le plus bas (Low)
    pub low: f64,

    /// Prix de clôture (Close)
    pub close: f64,

    /// Volume échangé
    pub volume: u64,
}

impl Quote {
    /// Constructeur : crée une nouvelle barre
    pub fn new(
        date: NaiveDate,
        time: NaiveTime,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
    ) -> Self {
        Self {
            date,
            time,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// Les barres d'un même jour de cotation
///
/// CONCEPT RUST : Lifetime 'a
/// - TradingDay emprunte les barres de la QuoteTable
/// - Il ne peut pas vivre plus longtemps que la table
#[derive(Debug, Clone, Copy)]
pub struct TradingDay<'a> {
    pub date: NaiveDate,
    pub quotes: &'a [Quote],
}

impl<'a> TradingDay<'a> {
    /// Barre horodatée exactement à `time`
    pub fn at(&self, time: NaiveTime) -> Option<&'a Quote> {
        self.quotes.iter().find(|q| q.time == time)
    }

    /// Dernière barre du jour (plus tôt que 21:55 les jours de séance courte)
    pub fn last(&self) -> Option<&'a Quote> {
        self.quotes.last()
    }
}

/// Collection de barres pour un ticker
#[derive(Debug, Clone)]
pub struct QuoteTable {
    /// Symbole du ticker
    pub symbol: String,

    /// Barres triées par (date, heure)
    quotes: Vec<Quote>,
}

impl QuoteTable {
    /// Crée la table ; les barres sont triées par (date, heure)
    ///
    /// CONCEPT RUST : sort_by_key est stable
    /// - Deux barres au même horodatage gardent l'ordre du fichier
    pub fn new(symbol: String, mut quotes: Vec<Quote>) -> Self {
        quotes.sort_by_key(|q| (q.date, q.time));
        Self { symbol, quotes }
    }

    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    /// Retourne le nombre de barres
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// Vérifie si la table est vide
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Jours de cotation distincts, croissants
    pub fn trading_days(&self) -> Vec<NaiveDate> {
        let mut days: Vec<NaiveDate> = self.quotes.iter().map(|q| q.date).collect();
        days.dedup(); // les barres sont triées, les doublons sont adjacents
        days
    }

    /// Regroupe les barres par jour de cotation
    ///
    /// Un jour = une slice contiguë de barres, dans l'ordre des heures
    pub fn days(&self) -> Vec<TradingDay<'_>> {
        let mut days = Vec::new();
        let mut start = 0;

        for i in 1..=self.quotes.len() {
            if i == self.quotes.len() || self.quotes[i].date != self.quotes[start].date {
                days.push(TradingDay {
                    date: self.quotes[start].date,
                    quotes: &self.quotes[start..i],
                });
                start = i;
            }
        }

        days
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
