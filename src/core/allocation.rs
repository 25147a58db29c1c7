use crate::core::allocator::allocate_round;
use crate::core::preferences::update_preferences;
use crate::core::preprocess::preprocess;
use crate::core::themes::resolve_themes;
use crate::domain::model::{AllocationResult, AllocationStats, RawTeam, Round};

/// Runs the whole allocation: preprocess, three rounds with preference
/// cascading in between, then theme resolution.
pub fn run_allocation(rows: &[RawTeam], seed: u32, manual_label: &str) -> AllocationResult {
    let mut teams = preprocess(rows, manual_label);
    let mut stats = AllocationStats::default();

    for round in Round::ALL {
        if round != Round::First {
            teams = update_preferences(teams, round);
        }
        let (updated, count) = allocate_round(teams, round, seed);
        teams = updated;
        stats.record(round, count);
        tracing::info!("Round {}: allocated {} team(s)", round, count);
    }

    let teams = resolve_themes(teams, manual_label);
    AllocationResult { teams, stats, seed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Team, MANUAL_ASSIGNMENT};
    use std::collections::HashSet;

    const SEED: u32 = 19032025;

    fn rows(data: &[(&str, &str)]) -> Vec<RawTeam> {
        data.iter().map(|(n, p)| RawTeam::new(*n, *p)).collect()
    }

    fn find<'a>(teams: &'a [Team], name: &str) -> &'a Team {
        teams.iter().find(|t| t.team_name == name).unwrap()
    }

    #[test]
    fn test_scenario_two_teams_compete_for_one_domain() {
        let input = rows(&[("X1-T1", "A-alpha"), ("X2-T2", "A-alpha"), ("X3-T3", "B-beta")]);
        let result = run_allocation(&input, SEED, MANUAL_ASSIGNMENT);

        assert_eq!(result.stats, AllocationStats { round1: 2, round2: 0, round3: 0 });
        let t3 = find(&result.teams, "X3-T3");
        assert_eq!(t3.allocated_domain.as_deref(), Some("B"));
        assert_eq!(t3.assigned_theme, "B-beta");

        let contenders: Vec<&Team> = result.teams[..2].iter().collect();
        let winners: Vec<_> = contenders.iter().filter(|t| t.is_allocated()).collect();
        assert_eq!(winners.len(), 1);
        assert_eq!(winners[0].assigned_theme, "A-alpha");
        // RandomState(19032026).randint(0, 2) == 0
        assert_eq!(winners[0].team_name, "X1-T1");
        let loser = contenders.iter().find(|t| !t.is_allocated()).unwrap();
        assert_eq!(loser.assigned_theme, MANUAL_ASSIGNMENT);
        assert_eq!(result.manual_count(), 1);
    }

    #[test]
    fn test_loser_falls_back_to_later_preferences() {
        let input = rows(&[("X1-T1", "A-a1,B-b1,C-c1"), ("X2-T2", "A-a2,B-b2,C-c2")]);
        let result = run_allocation(&input, SEED, MANUAL_ASSIGNMENT);

        assert_eq!(result.stats, AllocationStats { round1: 1, round2: 1, round3: 0 });
        let domains: HashSet<_> = result
            .teams
            .iter()
            .map(|t| t.allocated_domain.clone().unwrap())
            .collect();
        assert_eq!(domains, HashSet::from(["A".to_string(), "B".to_string()]));
        let second = result
            .teams
            .iter()
            .find(|t| t.round_allocated == Some(Round::Second))
            .unwrap();
        assert!(second.assigned_theme.starts_with("B-"));
    }

    #[test]
    fn test_cascade_skips_domain_held_by_group() {
        // G1 takes B in round 1, so G2's second choice B cascades to C.
        let input = rows(&[("G1-a", "B-one"), ("G2-b", "A-x,B-y,C-z"), ("G3-c", "A-x")]);
        let result = run_allocation(&input, SEED, MANUAL_ASSIGNMENT);

        let g2 = find(&result.teams, "G2-b");
        let g3 = find(&result.teams, "G3-c");
        if g2.round_allocated == Some(Round::First) {
            assert_eq!(g2.allocated_domain.as_deref(), Some("A"));
            assert!(!g3.is_allocated());
        } else {
            assert_eq!(g2.allocated_domain.as_deref(), Some("C"));
            assert_eq!(g2.round_allocated, Some(Round::Second));
            assert_eq!(g2.assigned_theme, "C-z");
        }
    }

    #[test]
    fn test_group_never_holds_a_domain_twice() {
        let data: Vec<(String, String)> = (0..60)
            .map(|i| {
                let group = ["A", "B", "C"][i % 3];
                let prefs = match i % 4 {
                    0 => "AI-x,WEB-y,IOT-z",
                    1 => "WEB-y,AI-x,GAME-w",
                    2 => "AI-x,AI-y,WEB-z",
                    _ => "IOT-z,GAME-w,AI-x",
                };
                (format!("{}{}-team", group, i), prefs.to_string())
            })
            .collect();
        let input: Vec<RawTeam> = data.iter().map(|(n, p)| RawTeam::new(n, p)).collect();
        let result = run_allocation(&input, SEED, MANUAL_ASSIGNMENT);

        let mut seen = HashSet::new();
        for team in &result.teams {
            if let Some(domain) = &team.allocated_domain {
                assert!(seen.insert((team.group_id.clone(), domain.clone())));
            }
        }
        assert_eq!(result.teams.len(), 60);
        assert_eq!(result.stats.total() + result.manual_count(), 60);
    }

    #[test]
    fn test_runs_are_reproducible() {
        let data: Vec<(String, String)> = (0..30)
            .map(|i| (format!("Z{}-t", i), "A-1,B-2,C-3".to_string()))
            .collect();
        let input: Vec<RawTeam> = data.iter().map(|(n, p)| RawTeam::new(n, p)).collect();

        let first = run_allocation(&input, SEED, MANUAL_ASSIGNMENT);
        let second = run_allocation(&input, SEED, MANUAL_ASSIGNMENT);
        assert_eq!(first.teams, second.teams);
        assert_eq!(first.stats, AllocationStats { round1: 1, round2: 1, round3: 1 });
    }

    #[test]
    fn test_empty_input() {
        let result = run_allocation(&[], SEED, MANUAL_ASSIGNMENT);
        assert!(result.teams.is_empty());
        assert_eq!(result.stats.total(), 0);
    }
}
