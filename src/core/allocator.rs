//! Single allocation round.
//!
//! Candidates are partitioned by `(group, domain)` and each partition yields
//! at most one winner. Partitions are visited in sorted key order and ties are
//! broken with a Mersenne Twister freshly seeded for the round. The draws are
//! the same as numpy's legacy `RandomState(seed + round).randint(0, n)`.

use crate::domain::model::{Round, Team};
use rand_mt::Mt as Mt19937GenRand32;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Domains already held by each group.
pub type ClaimedDomains = HashMap<String, HashSet<String>>;

pub fn claimed_domains(teams: &[Team]) -> ClaimedDomains {
    let mut claimed = ClaimedDomains::new();
    for team in teams {
        if let Some(domain) = &team.allocated_domain {
            claimed
                .entry(team.group_id.clone())
                .or_default()
                .insert(domain.clone());
        }
    }
    claimed
}

/// Tie-break generator for one round, seeded with `base_seed + round`.
pub struct TieBreaker {
    mt: Mt19937GenRand32,
}

impl TieBreaker {
    pub fn new(seed: u32) -> Self {
        Self {
            mt: Mt19937GenRand32::new(seed),
        }
    }

    pub fn for_round(base_seed: u32, round: Round) -> Self {
        Self::new(base_seed.wrapping_add(u32::from(round.number())))
    }

    /// Uniform index in `0..n` by masked rejection: draws are masked to the
    /// smallest `2^k - 1` covering `n - 1` and retried until in range.
    pub fn index(&mut self, n: usize) -> usize {
        let max = u32::try_from(n.saturating_sub(1)).unwrap_or(u32::MAX);
        if max == 0 {
            return 0;
        }
        let mask = u32::MAX >> max.leading_zeros();
        loop {
            let value = self.mt.next_u32() & mask;
            if value <= max {
                return value as usize;
            }
        }
    }
}

/// Allocates `round`'s preference slot. Returns the teams and how many were
/// placed in this round.
pub fn allocate_round(mut teams: Vec<Team>, round: Round, base_seed: u32) -> (Vec<Team>, usize) {
    let mut partitions: BTreeMap<(String, String), Vec<usize>> = BTreeMap::new();
    for (idx, team) in teams.iter().enumerate() {
        if team.is_allocated() {
            continue;
        }
        if let Some(domain) = team.choice(round) {
            partitions
                .entry((team.group_id.clone(), domain.to_string()))
                .or_default()
                .push(idx);
        }
    }

    if partitions.is_empty() {
        tracing::debug!("Round {}: no candidates", round);
        return (teams, 0);
    }

    let mut claimed = claimed_domains(&teams);
    let mut tie_breaker = TieBreaker::for_round(base_seed, round);
    let mut winners: Vec<(usize, String)> = Vec::new();

    for ((group, domain), members) in &partitions {
        let group_claims = claimed.entry(group.clone()).or_default();
        if group_claims.contains(domain) {
            tracing::debug!(
                "Round {}: group '{}' already holds '{}', skipping {} team(s)",
                round,
                group,
                domain,
                members.len()
            );
            continue;
        }

        let pick = if members.len() == 1 {
            members[0]
        } else {
            members[tie_breaker.index(members.len())]
        };

        group_claims.insert(domain.clone());
        winners.push((pick, domain.clone()));
    }

    let allocated = winners.len();
    for (idx, domain) in winners {
        let team = &mut teams[idx];
        tracing::debug!("Round {}: '{}' -> {}", round, team.team_name, domain);
        team.allocated_domain = Some(domain);
        team.round_allocated = Some(round);
    }

    (teams, allocated)
}
