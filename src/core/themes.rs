use crate::core::preprocess::domain_of;
use crate::domain::model::Team;

/// The first preference entry whose domain is `domain`.
pub fn theme_for<'a>(options: &'a [String], domain: &str) -> Option<&'a str> {
    options
        .iter()
        .find(|entry| domain_of(entry).as_deref() == Some(domain))
        .map(String::as_str)
}

/// Sets every team's theme from its allocated domain, falling back to
/// `manual_label` for teams without one.
pub fn resolve_themes(mut teams: Vec<Team>, manual_label: &str) -> Vec<Team> {
    for team in teams.iter_mut() {
        let theme = team
            .allocated_domain
            .as_deref()
            .and_then(|domain| theme_for(&team.options, domain));

        team.assigned_theme = match theme {
            Some(theme) => theme.to_string(),
            None => {
                if team.is_allocated() {
                    tracing::warn!(
                        "No preference entry matches allocated domain of '{}'",
                        team.team_name
                    );
                }
                manual_label.to_string()
            }
        };
    }
    teams
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::preprocess::preprocess_team;
    use crate::domain::model::{RawTeam, Round, MANUAL_ASSIGNMENT};

    fn allocated(prefs: &str, domain: &str) -> Team {
        let mut team = preprocess_team(&RawTeam::new("A1-t", prefs), MANUAL_ASSIGNMENT);
        team.allocated_domain = Some(domain.to_string());
        team.round_allocated = Some(Round::Second);
        team
    }

    #[test]
    fn test_theme_is_matching_preference_entry() {
        let out = resolve_themes(
            vec![allocated("AI-Chatbot, WEB-Online shop", "WEB")],
            MANUAL_ASSIGNMENT,
        );
        assert_eq!(out[0].assigned_theme, "WEB-Online shop");
    }

    #[test]
    fn test_first_matching_entry_wins() {
        let out = resolve_themes(vec![allocated("AI-First, AI-Second", "AI")], MANUAL_ASSIGNMENT);
        assert_eq!(out[0].assigned_theme, "AI-First");
    }

    #[test]
    fn test_domain_must_match_whole_prefix() {
        let out = resolve_themes(vec![allocated("AIX-Other, AI-Exact", "AI")], MANUAL_ASSIGNMENT);
        assert_eq!(out[0].assigned_theme, "AI-Exact");
    }

    #[test]
    fn test_unallocated_team_needs_manual_assignment() {
        let team = preprocess_team(&RawTeam::new("A1-t", "AI-x"), "placeholder");
        let out = resolve_themes(vec![team], MANUAL_ASSIGNMENT);
        assert_eq!(out[0].assigned_theme, MANUAL_ASSIGNMENT);
    }

    #[test]
    fn test_unmatched_domain_falls_back_to_manual() {
        let out = resolve_themes(vec![allocated("AI-x", "WEB")], "manual");
        assert_eq!(out[0].assigned_theme, "manual");
    }
}
