//! Interleaving division fixtures into one dispatch stream.
//!
//! Dispatch is order-sensitive, so the stream order decides which
//! division gets the early dates and slots.

use serde::{Deserialize, Serialize};

use crate::dispatching::FixtureRef;
use crate::pairing::Division;

/// Interleaving policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grouping {
    /// Whole rounds, one division after another: D1 R1, D2 R1, D1 R2, ...
    #[default]
    Grouped,
    /// Fixture by fixture across divisions within a round index.
    Flattened,
}

/// Builds the dispatch stream. Bye fixtures are included; the
/// dispatcher skips them.
pub fn interleave(divisions: &[Division], grouping: Grouping) -> Vec<FixtureRef> {
    match grouping {
        Grouping::Grouped => grouped(divisions),
        Grouping::Flattened => flattened(divisions),
    }
}

fn max_rounds(divisions: &[Division]) -> usize {
    divisions
        .iter()
        .map(|d| d.rounds().len())
        .max()
        .unwrap_or(0)
}

fn grouped(divisions: &[Division]) -> Vec<FixtureRef> {
    let mut stream = Vec::new();
    for r in 0..max_rounds(divisions) {
        for d in divisions {
            if let Some(round) = d.rounds().get(r) {
                stream.extend(round.fixtures.iter().map(|&f| FixtureRef::new(d.index, f)));
            }
        }
    }
    stream
}

fn flattened(divisions: &[Division]) -> Vec<FixtureRef> {
    let mut stream = Vec::new();
    for r in 0..max_rounds(divisions) {
        let rounds: Vec<_> = divisions
            .iter()
            .filter_map(|d| d.rounds().get(r).map(|round| (d.index, &round.fixtures)))
            .collect();
        let widest = rounds.iter().map(|(_, f)| f.len()).max().unwrap_or(0);
        for i in 0..widest {
            for (division, fixtures) in &rounds {
                if let Some(&f) = fixtures.get(i) {
                    stream.push(FixtureRef::new(*division, f));
                }
            }
        }
    }
    stream
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FixtureId;
    use crate::pairing::PairingOptions;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn divisions(sizes: &[usize], max_rounds: Option<usize>) -> Vec<Division> {
        let mut rng = SmallRng::seed_from_u64(0);
        sizes
            .iter()
            .enumerate()
            .map(|(i, &n)| {
                let names: Vec<String> = (0..n).map(|t| format!("D{i}T{t}")).collect();
                let mut d = Division::new(i, format!("Division {}", i + 1), &names).unwrap();
                let options = PairingOptions {
                    max_rounds,
                    ..Default::default()
                };
                d.generate(&options, &mut rng);
                d
            })
            .collect()
    }

    #[test]
    fn test_grouped_round_by_round() {
        let ds = divisions(&[4, 4], None);
        let stream = interleave(&ds, Grouping::Grouped);
        assert_eq!(stream.len(), 12);
        let order: Vec<_> = stream.iter().take(6).map(|r| (r.division, r.fixture.0)).collect();
        assert_eq!(order, vec![(0, 0), (0, 1), (1, 0), (1, 1), (0, 2), (0, 3)]);
    }

    #[test]
    fn test_flattened_fixture_by_fixture() {
        let ds = divisions(&[4, 4], None);
        let stream = interleave(&ds, Grouping::Flattened);
        assert_eq!(stream.len(), 12);
        let order: Vec<_> = stream.iter().take(6).map(|r| (r.division, r.fixture.0)).collect();
        assert_eq!(order, vec![(0, 0), (1, 0), (0, 1), (1, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn test_uneven_divisions() {
        // 4 teams → 3 rounds of 2; 6 teams → 5 rounds of 3
        let ds = divisions(&[4, 6], None);
        for grouping in [Grouping::Grouped, Grouping::Flattened] {
            let stream = interleave(&ds, grouping);
            assert_eq!(stream.len(), 6 + 15);
            let tail: Vec<_> = stream[stream.len() - 3..].iter().map(|r| r.division).collect();
            assert_eq!(tail, vec![1, 1, 1]);
        }

        let flat = interleave(&ds, Grouping::Flattened);
        assert_eq!(flat[4], FixtureRef::new(1, FixtureId(2)));
    }

    #[test]
    fn test_empty() {
        assert!(interleave(&[], Grouping::Grouped).is_empty());
        assert!(interleave(&[], Grouping::Flattened).is_empty());
    }
}
