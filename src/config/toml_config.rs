use crate::domain::model::Theme;
use crate::utils::error::{Result, StreakError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid placeholder regex"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    #[serde(default)]
    pub github: GitHubSection,
    #[serde(default)]
    pub output: OutputSection,
    pub theme: Option<ThemeSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GitHubSection {
    pub username: Option<String>,
    pub api_endpoint: Option<String>,
    pub token: Option<String>,
    pub window_days: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    pub path: Option<String>,
    pub formats: Option<Vec<String>>,
    pub svg_filename: Option<String>,
    pub json_filename: Option<String>,
}

/// Partial theme; unset colors fall back to the default dark palette.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeSection {
    pub background_start: Option<String>,
    pub background_end: Option<String>,
    pub title: Option<String>,
    pub accent: Option<String>,
    pub value: Option<String>,
    pub label: Option<String>,
}

impl ThemeSection {
    pub fn apply(&self, base: Theme) -> Theme {
        Theme {
            background_start: self.background_start.clone().unwrap_or(base.background_start),
            background_end: self.background_end.clone().unwrap_or(base.background_end),
            title: self.title.clone().unwrap_or(base.title),
            accent: self.accent.clone().unwrap_or(base.accent),
            value: self.value.clone().unwrap_or(base.value),
            label: self.label.clone().unwrap_or(base.label),
        }
    }
}

fn escape_basic_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(c),
        }
    }
    escaped
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(StreakError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| StreakError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay verbatim.
    /// Values are escaped for TOML basic strings, so placeholders belong inside quotes.
    fn substitute_env_vars(content: &str) -> String {
        ENV_PLACEHOLDER
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                match std::env::var(var_name) {
                    Ok(value) => escape_basic_string(&value),
                    Err(_) => format!("${{{}}}", var_name),
                }
            })
            .into_owned()
    }

    pub fn theme(&self) -> Theme {
        match &self.theme {
            Some(section) => section.apply(Theme::default()),
            None => Theme::default(),
        }
    }
}
