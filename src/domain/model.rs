use serde::{Deserialize, Serialize};

/// Theme given to teams the allocation could not place.
pub const MANUAL_ASSIGNMENT: &str = "needs manual assignment";

/// One of the three allocation passes. Round N consumes preference slot N.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Round {
    First = 1,
    Second = 2,
    Third = 3,
}

impl Round {
    pub const ALL: [Round; 3] = [Round::First, Round::Second, Round::Third];

    pub fn number(self) -> u8 {
        self as u8
    }

    /// Index of the preference slot this round reads.
    pub fn slot(self) -> usize {
        self as usize - 1
    }
}

impl std::fmt::Display for Round {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// A row as read from the input table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTeam {
    pub team_name: String,
    pub preferences: String,
}

impl RawTeam {
    pub fn new(team_name: impl Into<String>, preferences: impl Into<String>) -> Self {
        Self {
            team_name: team_name.into(),
            preferences: preferences.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub team_name: String,
    pub group_id: String,
    /// Preference entries as written, in input order.
    pub options: Vec<String>,
    /// Deduplicated domain per round slot; `None` means nothing to offer.
    pub choices: [Option<String>; 3],
    pub allocated_domain: Option<String>,
    pub round_allocated: Option<Round>,
    pub assigned_theme: String,
}

impl Team {
    pub fn choice(&self, round: Round) -> Option<&str> {
        self.choices[round.slot()].as_deref()
    }

    pub fn is_allocated(&self) -> bool {
        self.allocated_domain.is_some()
    }
}

/// Number of teams placed in each round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationStats {
    pub round1: usize,
    pub round2: usize,
    pub round3: usize,
}

impl AllocationStats {
    pub fn record(&mut self, round: Round, count: usize) {
        match round {
            Round::First => self.round1 = count,
            Round::Second => self.round2 = count,
            Round::Third => self.round3 = count,
        }
    }

    pub fn total(&self) -> usize {
        self.round1 + self.round2 + self.round3
    }
}

#[derive(Debug, Clone)]
pub struct AllocationResult {
    pub teams: Vec<Team>,
    pub stats: AllocationStats,
    pub seed: u32,
}

impl AllocationResult {
    pub fn manual_count(&self) -> usize {
        self.teams.iter().filter(|t| !t.is_allocated()).count()
    }
}

/// JSON report written next to the allocation table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AllocationSummary {
    pub seed: u32,
    pub teams: usize,
    pub rounds: AllocationStats,
    pub allocated: usize,
    pub manual_assignment: usize,
}

impl From<&AllocationResult> for AllocationSummary {
    fn from(result: &AllocationResult) -> Self {
        Self {
            seed: result.seed,
            teams: result.teams.len(),
            rounds: result.stats,
            allocated: result.stats.total(),
            manual_assignment: result.manual_count(),
        }
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub output_path: String,
    pub summary: AllocationSummary,
}
