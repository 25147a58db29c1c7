//! Turns raw input rows into team records ready for allocation.

use crate::domain::model::{RawTeam, Team};

/// First character of the team name segment before the first `-`.
pub fn group_id(team_name: &str) -> String {
    team_name
        .split('-')
        .next()
        .and_then(|segment| segment.chars().next())
        .map(String::from)
        .unwrap_or_default()
}

/// Domain token of a preference entry: the text before the first `-`,
/// with whitespace removed. Empty entries have no domain.
pub fn domain_of(entry: &str) -> Option<String> {
    let prefix = entry.split('-').next().unwrap_or_default();
    let domain: String = prefix.chars().filter(|c| !c.is_whitespace()).collect();
    (!domain.is_empty()).then_some(domain)
}

/// Non-empty, trimmed preference entries in the order they were written.
pub fn split_options(preferences: &str) -> Vec<String> {
    preferences
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(String::from)
        .collect()
}

/// Keeps at most three distinct domains, left-packed into the second slot
/// when the second choice repeats the first or is missing.
pub fn dedup_choices(
    first: Option<String>,
    second: Option<String>,
    third: Option<String>,
) -> [Option<String>; 3] {
    let mut second = second;
    let mut third = third;

    if third.is_none() || third == first || third == second {
        third = None;
    }
    if second.is_none() || second == first {
        second = third.take();
    }

    [first, second, third]
}

pub fn preprocess_team(raw: &RawTeam, manual_label: &str) -> Team {
    // Slots are positional: an empty entry still occupies its slot.
    let mut slots = raw.preferences.split(',').map(domain_of);
    let first = slots.next().flatten();
    let second = slots.next().flatten();
    let third = slots.next().flatten();

    Team {
        team_name: raw.team_name.clone(),
        group_id: group_id(&raw.team_name),
        options: split_options(&raw.preferences),
        choices: dedup_choices(first, second, third),
        allocated_domain: None,
        round_allocated: None,
        assigned_theme: manual_label.to_string(),
    }
}

pub fn preprocess(rows: &[RawTeam], manual_label: &str) -> Vec<Team> {
    let teams: Vec<Team> = rows
        .iter()
        .map(|raw| preprocess_team(raw, manual_label))
        .collect();
    tracing::debug!("Preprocessed {} teams", teams.len());
    teams
}
