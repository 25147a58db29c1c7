use crate::config::{
    DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH, DEFAULT_PREFERENCES_COLUMN, DEFAULT_SEED,
    DEFAULT_TEAM_COLUMN, MAX_SEED,
};
use crate::domain::model::MANUAL_ASSIGNMENT;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{AllocError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub allocation: AllocationConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationConfig {
    pub name: String,
    pub seed: Option<u32>,
    pub manual_label: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: Option<String>,
    pub team_column: Option<String>,
    pub preferences_column: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
    /// Any of "csv", "json". The table is always written.
    pub formats: Option<Vec<String>>,
    pub summary_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AllocError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AllocError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are
    /// left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| AllocError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("allocation.name", &self.allocation.name)?;
        validation::validate_path("input.path", self.input_path())?;
        validation::validate_path("output.path", self.output_path())?;
        validation::validate_file_extensions("output.path", &[self.output_path()], &["csv"])?;
        validation::validate_non_empty_string("input.team_column", self.team_column())?;
        validation::validate_non_empty_string(
            "input.preferences_column",
            self.preferences_column(),
        )?;
        validation::validate_non_empty_string("allocation.manual_label", self.manual_label())?;
        validation::validate_range("allocation.seed", self.seed(), 0, MAX_SEED)?;

        let valid_formats = ["csv", "json"];
        for format in self.formats() {
            if !valid_formats.contains(&format) {
                return Err(AllocError::InvalidConfigValueError {
                    field: "output.formats".to_string(),
                    value: format.to_string(),
                    reason: format!(
                        "Unsupported format. Valid formats: {}",
                        valid_formats.join(", ")
                    ),
                });
            }
        }

        if self.formats().contains(&"json") {
            let summary =
                validation::validate_required_field("output.summary_path", &self.output.summary_path)?;
            validation::validate_file_extensions(
                "output.summary_path",
                &[summary.as_str()],
                &["json"],
            )?;
        }

        Ok(())
    }

    pub fn formats(&self) -> Vec<&str> {
        match &self.output.formats {
            Some(formats) => formats.iter().map(String::as_str).collect(),
            None => vec!["csv"],
        }
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        self.input.path.as_deref().unwrap_or(DEFAULT_INPUT_PATH)
    }

    fn output_path(&self) -> &str {
        self.output.path.as_deref().unwrap_or(DEFAULT_OUTPUT_PATH)
    }

    /// Only set when the `json` format is enabled.
    fn summary_path(&self) -> Option<&str> {
        if !self.formats().contains(&"json") {
            return None;
        }
        self.output.summary_path.as_deref()
    }

    fn seed(&self) -> u32 {
        self.allocation.seed.unwrap_or(DEFAULT_SEED)
    }

    fn team_column(&self) -> &str {
        self.input.team_column.as_deref().unwrap_or(DEFAULT_TEAM_COLUMN)
    }

    fn preferences_column(&self) -> &str {
        self.input
            .preferences_column
            .as_deref()
            .unwrap_or(DEFAULT_PREFERENCES_COLUMN)
    }

    fn manual_label(&self) -> &str {
        self.allocation
            .manual_label
            .as_deref()
            .unwrap_or(MANUAL_ASSIGNMENT)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
