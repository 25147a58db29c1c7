//! Cascades remaining preferences past domains a team's group already holds.

use crate::core::allocator::claimed_domains;
use crate::domain::model::{Round, Team};

/// Prepares the preference slots read by `round`. Only the second and third
/// rounds have anything to prepare.
pub fn update_preferences(mut teams: Vec<Team>, round: Round) -> Vec<Team> {
    let claimed = claimed_domains(&teams);
    if claimed.is_empty() {
        return teams;
    }

    let mut changed = 0usize;
    for team in teams.iter_mut() {
        let Some(group_claims) = claimed.get(&team.group_id) else {
            continue;
        };
        let is_claimed = |slot: &Option<String>| {
            slot.as_ref().is_some_and(|domain| group_claims.contains(domain))
        };

        let before = team.choices.clone();
        let [_, second, third] = &mut team.choices;
        match round {
            Round::First => {}
            Round::Second => {
                if is_claimed(second) {
                    if third.is_some() && !is_claimed(third) {
                        *second = third.take();
                    } else {
                        *second = None;
                        *third = None;
                    }
                }
            }
            Round::Third => {
                if is_claimed(third) {
                    *third = None;
                }
            }
        }

        if team.choices != before {
            changed += 1;
            tracing::debug!(
                "Round {} prep: '{}' preferences {:?} -> {:?}",
                round,
                team.team_name,
                before,
                team.choices
            );
        }
    }

    tracing::debug!("Round {} prep: {} team(s) had preferences cascaded", round, changed);
    teams
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::preprocess::preprocess_team;
    use crate::domain::model::{RawTeam, MANUAL_ASSIGNMENT};

    fn team(name: &str, prefs: &str) -> Team {
        preprocess_team(&RawTeam::new(name, prefs), MANUAL_ASSIGNMENT)
    }

    fn allocated(name: &str, domain: &str) -> Team {
        let mut t = team(name, &format!("{}-x", domain));
        t.allocated_domain = Some(domain.to_string());
        t.round_allocated = Some(Round::First);
        t
    }

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    #[test]
    fn test_nothing_allocated_leaves_preferences() {
        let input = vec![team("G1-a", "A-1,B-1,C-1")];
        let out = update_preferences(input.clone(), Round::Second);
        assert_eq!(out, input);
    }

    #[test]
    fn test_claimed_second_choice_is_replaced_by_third() {
        let input = vec![allocated("G1-holder", "B"), team("G2-a", "A-1,B-1,C-1")];
        let out = update_preferences(input, Round::Second);
        assert_eq!(out[1].choices, [s("A"), s("C"), None]);
    }

    #[test]
    fn test_claimed_second_and_third_are_both_cleared() {
        let input = vec![
            allocated("G1-holder", "B"),
            allocated("G3-other", "C"),
            team("G2-a", "A-1,B-1,C-1"),
        ];

        let out = update_preferences(input, Round::Second);
        assert_eq!(out[2].choices, [s("A"), None, None]);
    }

    #[test]
    fn test_claimed_second_without_third_is_cleared() {
        let input = vec![allocated("G1-holder", "B"), team("G2-a", "A-1,B-1")];
        let out = update_preferences(input, Round::Second);
        assert_eq!(out[1].choices, [s("A"), None, None]);
    }

    #[test]
    fn test_other_groups_are_unaffected() {
        let input = vec![allocated("G1-holder", "B"), team("H1-a", "A-1,B-1,C-1")];
        let out = update_preferences(input, Round::Second);
        assert_eq!(out[1].choices, [s("A"), s("B"), s("C")]);
    }

    #[test]
    fn test_unclaimed_second_is_kept() {
        let input = vec![allocated("G1-holder", "A"), team("G2-a", "A-1,B-1,C-1")];
        let out = update_preferences(input, Round::Second);
        assert_eq!(out[1].choices, [s("A"), s("B"), s("C")]);
    }

    #[test]
    fn test_third_round_clears_claimed_third_only() {
        let input = vec![
            allocated("G1-holder", "C"),
            team("G2-a", "A-1,B-1,C-1"),
            team("G3-b", "A-1,C-1,D-1"),
        ];
        let out = update_preferences(input, Round::Third);
        assert_eq!(out[1].choices, [s("A"), s("B"), None]);
        assert_eq!(out[2].choices, [s("A"), s("C"), s("D")]);
    }

    #[test]
    fn test_first_round_is_a_noop() {
        let input = vec![allocated("G1-holder", "B"), team("G2-a", "A-1,B-1,C-1")];
        let out = update_preferences(input.clone(), Round::First);
        assert_eq!(out, input);
    }
}
