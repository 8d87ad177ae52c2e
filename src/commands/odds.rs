//! Dice Roll odds table
//!
//! Enumerates every outcome of the Zero/One/Two dice and the flip
//! percentages each one produces.

use crate::glitch::{DIE_FACES, DiceRolls, FlipOdds};

/// One dice outcome and its flip odds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OddsRow {
    pub rolls: DiceRolls,
    pub odds: FlipOdds,
    pub expected_flips: f64,
}

/// Averages over all equally likely dice outcomes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OddsSummary {
    pub outcomes: usize,
    /// Mean percent chance of 0, 1 and 2 flips
    pub mean_odds: [f64; 3],
    pub mean_expected_flips: f64,
}

/// Every dice outcome in lexicographic order
#[must_use]
pub fn dice_odds_table() -> Vec<OddsRow> {
    let faces = 1..=DIE_FACES;
    faces
        .clone()
        .flat_map(|zero| {
            faces.clone().flat_map(move |one| {
                (1..=DIE_FACES).map(move |two| DiceRolls::new(zero, one, two))
            })
        })
        .map(|rolls| {
            let odds = rolls.odds();
            OddsRow {
                rolls,
                odds,
                expected_flips: odds.expected_flips(),
            }
        })
        .collect()
}

/// Summarize a table
#[must_use]
pub fn summarize(rows: &[OddsRow]) -> OddsSummary {
    let outcomes = rows.len();
    if outcomes == 0 {
        return OddsSummary {
            outcomes,
            mean_odds: [0.0; 3],
            mean_expected_flips: 0.0,
        };
    }

    let n = outcomes as f64;
    let mut mean_odds = [0.0; 3];
    for row in rows {
        for (mean, pct) in mean_odds.iter_mut().zip(row.odds.as_array()) {
            *mean += f64::from(pct) / n;
        }
    }

    OddsSummary {
        outcomes,
        mean_odds,
        mean_expected_flips: rows.iter().map(|r| r.expected_flips).sum::<f64>() / n,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_all_outcomes() {
        let table = dice_odds_table();
        assert_eq!(table.len(), 216);
        assert_eq!(table[0].rolls, DiceRolls::new(1, 1, 1));
        assert_eq!(table[215].rolls, DiceRolls::new(6, 6, 6));
    }

    #[test]
    fn every_row_sums_to_100() {
        for row in dice_odds_table() {
            let total: u32 = row.odds.as_array().iter().map(|&p| u32::from(p)).sum();
            assert_eq!(total, 100, "{:?}", row.rolls);
        }
    }

    #[test]
    fn all_ones_never_flips() {
        let table = dice_odds_table();
        assert_eq!(table[0].odds, FlipOdds::new(100, 0, 0));
        assert!(table[0].expected_flips.abs() < f64::EPSILON);
    }

    #[test]
    fn summary_is_bounded() {
        let summary = summarize(&dice_odds_table());
        assert_eq!(summary.outcomes, 216);
        let total: f64 = summary.mean_odds.iter().sum();
        assert!((total - 100.0).abs() < 1e-9);
        assert!(summary.mean_expected_flips > 0.0 && summary.mean_expected_flips < 2.0);
    }

    #[test]
    fn empty_summary() {
        let summary = summarize(&[]);
        assert_eq!(summary.outcomes, 0);
        assert!(summary.mean_expected_flips.abs() < f64::EPSILON);
    }
}
