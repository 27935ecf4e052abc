//! Division: one self-contained round-robin group.
//!
//! Owns the team arena (bye pad included), the fixture arena and the
//! round list. Fixtures and teams are addressed by index so the
//! dispatcher can mutate them in place without copying the object graph.

use chrono::NaiveTime;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

use super::{circle_round, rotate_roster, PairingOptions};
use crate::error::{Result, ScheduleError};
use crate::models::{Fixture, FixtureId, Team, TeamId, BYE_TEAM_NAME};
use crate::validation;

/// One round of a division: every team appears exactly once.
#[derive(Debug, Clone, Serialize)]
pub struct Round {
    /// Zero-based index across all cycles.
    pub index: usize,
    /// Zero-based cycle.
    pub cycle: usize,
    /// One-based round number within the cycle.
    pub number: usize,
    /// Fixtures of this round, in pairing order.
    pub fixtures: Vec<FixtureId>,
}

/// A round-robin group of teams.
#[derive(Debug, Clone, Serialize)]
pub struct Division {
    /// Position in the schedule.
    pub index: usize,
    /// Display name.
    pub name: String,
    teams: Vec<Team>,
    roster: Vec<TeamId>,
    rounds: Vec<Round>,
    fixtures: Vec<Fixture>,
}

impl Division {
    /// Creates a division from team names.
    ///
    /// Pads with the bye sentinel when the count is odd.
    ///
    /// # Errors
    /// - [`ScheduleError::TooFewTeams`] for fewer than two names
    /// - [`ScheduleError::ReservedTeamName`] if a name equals [`BYE_TEAM_NAME`]
    /// - [`ScheduleError::DuplicateTeam`] for a repeated name
    pub fn new<S: AsRef<str>>(index: usize, name: impl Into<String>, names: &[S]) -> Result<Self> {
        let name = name.into();
        if names.len() < 2 {
            return Err(ScheduleError::TooFewTeams {
                division: name,
                count: names.len(),
            });
        }

        let mut seen = HashSet::new();
        let mut teams = Vec::with_capacity(names.len() + 1);
        for team_name in names {
            let team_name = team_name.as_ref();
            if team_name == BYE_TEAM_NAME {
                return Err(ScheduleError::ReservedTeamName(team_name.to_string()));
            }
            if !seen.insert(team_name) {
                return Err(ScheduleError::DuplicateTeam {
                    division: name,
                    team: team_name.to_string(),
                });
            }
            teams.push(Team::new(TeamId(teams.len()), team_name));
        }
        if teams.len() % 2 == 1 {
            teams.push(Team::bye(TeamId(teams.len())));
        }

        let roster = teams.iter().map(|t| t.id).collect();
        Ok(Self {
            index,
            name,
            teams,
            roster,
            rounds: Vec::new(),
            fixtures: Vec::new(),
        })
    }

    /// Generates all rounds.
    ///
    /// Stops after `cycles` full round-robins or `max_rounds` rounds,
    /// whichever comes first. Re-running discards earlier rounds, their
    /// fixtures and the teams' slot/field usage counters.
    pub fn generate<R: Rng>(&mut self, options: &PairingOptions, rng: &mut R) -> &[Round] {
        self.rounds.clear();
        self.fixtures.clear();
        for team in &mut self.teams {
            team.clear_usage();
        }

        if options.shuffle {
            self.roster.shuffle(rng);
        }

        let per_cycle = self.teams.len() - 1;
        let mut total = options.cycles * per_cycle;
        if let Some(cap) = options.max_rounds {
            total = total.min(cap);
        }

        for index in 0..total {
            let cycle = index / per_cycle;
            let mut round = Round {
                index,
                cycle,
                number: index % per_cycle + 1,
                fixtures: Vec::with_capacity(self.roster.len() / 2),
            };

            for pair in circle_round(&self.roster) {
                let (a, b) = options.orientation.orient(pair, cycle, rng);
                let id = FixtureId(self.fixtures.len());
                let is_bye = self.teams[a.0].is_bye || self.teams[b.0].is_bye;
                self.fixtures
                    .push(Fixture::new(id, self.index, index, a, b, is_bye));
                round.fixtures.push(id);
            }

            self.rounds.push(round);
            rotate_roster(&mut self.roster);
        }

        debug!(
            division = %self.name,
            teams = self.teams.len(),
            rounds = self.rounds.len(),
            fixtures = self.fixtures.len(),
            "generated round-robin"
        );
        &self.rounds
    }

    /// All teams, bye pad included, by id.
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    /// Teams excluding the bye pad.
    pub fn real_teams(&self) -> impl Iterator<Item = &Team> {
        self.teams.iter().filter(|t| !t.is_bye)
    }

    /// Team by id.
    pub fn team(&self, id: TeamId) -> &Team {
        &self.teams[id.0]
    }

    pub(crate) fn team_mut(&mut self, id: TeamId) -> &mut Team {
        &mut self.teams[id.0]
    }

    /// Looks up a team by name.
    pub fn find_team(&self, name: &str) -> Option<TeamId> {
        self.teams.iter().find(|t| t.name == name).map(|t| t.id)
    }

    /// Roster size after bye padding (always even).
    pub fn padded_size(&self) -> usize {
        self.teams.len()
    }

    /// Whether a bye pad was added.
    pub fn has_bye(&self) -> bool {
        self.teams.iter().any(|t| t.is_bye)
    }

    /// Current roster order (changes as rounds are generated).
    pub fn roster(&self) -> &[TeamId] {
        &self.roster
    }

    /// Generated rounds.
    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    /// All generated fixtures, byes included.
    pub fn fixtures(&self) -> &[Fixture] {
        &self.fixtures
    }

    /// Fixture by id.
    pub fn fixture(&self, id: FixtureId) -> &Fixture {
        &self.fixtures[id.0]
    }

    pub(crate) fn fixture_mut(&mut self, id: FixtureId) -> &mut Fixture {
        &mut self.fixtures[id.0]
    }

    /// Times `team` has been dispatched at `slot`.
    pub fn slot_usage(&self, team: TeamId, slot: NaiveTime) -> u32 {
        self.teams[team.0].slot_usage(slot)
    }

    /// Times `team` has been dispatched on `field`.
    pub fn field_usage(&self, team: TeamId, field: &str) -> u32 {
        self.teams[team.0].field_usage(field)
    }

    /// All fixtures between two named teams, either orientation.
    ///
    /// Empty if either name is unknown.
    pub fn fixtures_between(&self, a: &str, b: &str) -> Vec<&Fixture> {
        match (self.find_team(a), self.find_team(b)) {
            (Some(a), Some(b)) if a != b => {
                self.fixtures.iter().filter(|f| f.is_between(a, b)).collect()
            }
            _ => Vec::new(),
        }
    }

    /// All fixtures of one team, in generation order.
    pub fn fixtures_for(&self, team: TeamId) -> Vec<&Fixture> {
        self.fixtures.iter().filter(|f| f.involves(team)).collect()
    }

    /// Fixtures per full round-robin pass times `cycles`, byes included.
    pub fn expected_fixture_count(&self, cycles: usize) -> usize {
        let n = self.teams.len();
        (n / 2) * (n - 1) * cycles
    }

    /// Whether the generated rounds form a complete `cycles`-fold round-robin.
    pub fn is_round_robin(&self, cycles: usize) -> bool {
        validation::is_round_robin(self, cycles)
    }
}

impl std::fmt::Display for Division {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pairing::Orientation;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn names(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("T{i}")).collect()
    }

    fn generated(n: usize, options: PairingOptions) -> Division {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut d = Division::new(0, "Division 1", &names(n)).unwrap();
        d.generate(&options, &mut rng);
        d
    }

    #[test]
    fn test_even_roster_no_bye() {
        let d = Division::new(0, "D", &names(4)).unwrap();
        assert_eq!(d.padded_size(), 4);
        assert!(!d.has_bye());
    }

    #[test]
    fn test_odd_roster_gets_one_bye() {
        let d = Division::new(0, "D", &names(5)).unwrap();
        assert_eq!(d.padded_size(), 6);
        assert!(d.has_bye());
        assert_eq!(d.real_teams().count(), 5);
        assert_eq!(d.teams().iter().filter(|t| t.is_bye).count(), 1);
    }

    #[test]
    fn test_too_few_teams() {
        let err = Division::new(0, "D", &["solo"]).unwrap_err();
        assert!(matches!(err, ScheduleError::TooFewTeams { count: 1, .. }));
    }

    #[test]
    fn test_duplicate_team() {
        let err = Division::new(0, "D", &["a", "b", "a"]).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::DuplicateTeam {
                division: "D".into(),
                team: "a".into()
            }
        );
    }

    #[test]
    fn test_reserved_name() {
        let err = Division::new(0, "D", &["a", BYE_TEAM_NAME]).unwrap_err();
        assert_eq!(err, ScheduleError::ReservedTeamName(BYE_TEAM_NAME.into()));
    }

    #[test]
    fn test_round_counts() {
        let options = PairingOptions {
            cycles: 2,
            ..Default::default()
        };
        let d = generated(6, options);
        assert_eq!(d.rounds().len(), 2 * 5);
        assert_eq!(d.fixtures().len(), d.expected_fixture_count(2));
        for round in d.rounds() {
            assert_eq!(round.fixtures.len(), 3);
            let mut seen = HashSet::new();
            for &id in &round.fixtures {
                let f = d.fixture(id);
                assert!(seen.insert(f.team_a));
                assert!(seen.insert(f.team_b));
            }
        }
        assert!(d.is_round_robin(2));
    }

    #[test]
    fn test_round_numbering() {
        let options = PairingOptions {
            cycles: 2,
            ..Default::default()
        };
        let d = generated(4, options);
        let numbers: Vec<_> = d.rounds().iter().map(|r| (r.cycle, r.number)).collect();
        assert_eq!(numbers, vec![(0, 1), (0, 2), (0, 3), (1, 1), (1, 2), (1, 3)]);
    }

    #[test]
    fn test_every_pair_meets_cycles_times() {
        let options = PairingOptions {
            cycles: 3,
            shuffle: true,
            ..Default::default()
        };
        let d = generated(7, options);
        let real: Vec<_> = d.real_teams().map(|t| t.name.clone()).collect();
        for (i, a) in real.iter().enumerate() {
            for b in &real[i + 1..] {
                assert_eq!(d.fixtures_between(a, b).len(), 3, "{a} vs {b}");
            }
        }
        assert!(d.is_round_robin(3));
    }

    #[test]
    fn test_odd_roster_one_bye_per_round() {
        let d = generated(5, PairingOptions::default());
        assert_eq!(d.rounds().len(), 5);
        for round in d.rounds() {
            let byes = round
                .fixtures
                .iter()
                .filter(|&&id| d.fixture(id).is_bye)
                .count();
            assert_eq!(byes, 1);
        }
    }

    #[test]
    fn test_round_cap() {
        let options = PairingOptions {
            cycles: 3,
            max_rounds: Some(4),
            ..Default::default()
        };
        let d = generated(8, options);
        assert_eq!(d.rounds().len(), 4);
        assert!(!d.is_round_robin(3));
    }

    #[test]
    fn test_cycle_parity_swaps_sides() {
        let options = PairingOptions {
            cycles: 2,
            orientation: Orientation::CycleParity,
            ..Default::default()
        };
        let d = generated(4, options);
        let first = d.fixture(d.rounds()[0].fixtures[0]);
        let mirror = d.fixture(d.rounds()[3].fixtures[0]);
        assert_eq!((first.team_a, first.team_b), (mirror.team_b, mirror.team_a));
    }

    #[test]
    fn test_regenerate_resets() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut d = Division::new(0, "D", &names(4)).unwrap();
        d.generate(&PairingOptions::default(), &mut rng);
        let slot = NaiveTime::from_hms_opt(19, 0, 0).unwrap();
        d.team_mut(TeamId(0)).record_usage(slot, "A");

        d.generate(&PairingOptions::default(), &mut rng);
        assert_eq!(d.rounds().len(), 3);
        assert_eq!(d.fixtures().len(), 6);
        assert_eq!(d.slot_usage(TeamId(0), slot), 0);
        assert_eq!(d.field_usage(TeamId(0), "A"), 0);
        assert_eq!(d.team(TeamId(0)).games_played(), 0);
    }

    #[test]
    fn test_fixtures_between_unknown() {
        let d = generated(4, PairingOptions::default());
        assert!(d.fixtures_between("T1", "nobody").is_empty());
        assert!(d.fixtures_between("T1", "T1").is_empty());
        assert_eq!(d.fixtures_for(TeamId(0)).len(), 3);
    }
}
