//! CSV reading and writing for the team table.

use crate::domain::model::{AllocationResult, RawTeam, Team};
use crate::utils::error::{AllocError, Result};
use serde::Serialize;

pub const OUTPUT_HEADERS: [&str; 8] =
    ["team", "group", "d1", "d2", "d3", "allocation", "round", "theme"];

fn column_index(headers: &csv::StringRecord, column: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == column)
        .ok_or_else(|| AllocError::MissingColumnError {
            column: column.to_string(),
            available: headers.iter().collect::<Vec<_>>().join(", "),
        })
}

/// Parses the input table. A row may stop short of the preferences column,
/// which then reads as empty, but must reach the team column and may not
/// have more fields than the header.
pub fn parse_teams(data: &[u8], team_column: &str, preferences_column: &str) -> Result<Vec<RawTeam>> {
    // A UTF-8 BOM would otherwise end up in the first header name.
    let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    let headers = reader.headers()?.clone();
    let team_idx = column_index(&headers, team_column)?;
    let prefs_idx = column_index(&headers, preferences_column)?;

    let mut teams = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        if record.len() > headers.len() {
            return Err(AllocError::InvalidInputError {
                line,
                message: format!(
                    "found {} fields, the header has {}",
                    record.len(),
                    headers.len()
                ),
            });
        }
        let team_name = record.get(team_idx).ok_or_else(|| AllocError::InvalidInputError {
            line,
            message: format!("missing '{}' value", team_column),
        })?;
        let preferences = record.get(prefs_idx).unwrap_or_default();
        teams.push(RawTeam::new(team_name, preferences));
    }

    Ok(teams)
}

#[derive(Debug, Serialize)]
struct OutputRow<'a> {
    team: &'a str,
    group: &'a str,
    d1: &'a str,
    d2: &'a str,
    d3: &'a str,
    allocation: &'a str,
    round: String,
    theme: &'a str,
}

impl<'a> From<&'a Team> for OutputRow<'a> {
    fn from(team: &'a Team) -> Self {
        let slot = move |i: usize| team.choices[i].as_deref().unwrap_or_default();
        Self {
            team: &team.team_name,
            group: &team.group_id,
            d1: slot(0),
            d2: slot(1),
            d3: slot(2),
            allocation: team.allocated_domain.as_deref().unwrap_or_default(),
            round: team
                .round_allocated
                .map(|r| r.to_string())
                .unwrap_or_default(),
            theme: &team.assigned_theme,
        }
    }
}

/// Serializes the final table in input order.
pub fn write_teams(result: &AllocationResult) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(OUTPUT_HEADERS)?;
    for team in &result.teams {
        writer.serialize(OutputRow::from(team))?;
    }
    writer
        .into_inner()
        .map_err(|e| AllocError::IoError(e.into_error()))
}
