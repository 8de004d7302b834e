pub mod cli;
pub mod toml_config;

use crate::adapters::github::DEFAULT_GRAPHQL_ENDPOINT;
use crate::core::ConfigProvider;
use crate::domain::model::{OutputFormat, Theme};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::fmt;
use toml_config::TomlConfig;

pub const DEFAULT_OUTPUT_PATH: &str = "assets";
pub const DEFAULT_SVG_FILENAME: &str = "streak.svg";
pub const DEFAULT_JSON_FILENAME: &str = "streak.json";
/// GitHub rejects contribution windows longer than one year.
pub const MAX_WINDOW_DAYS: u32 = 365;

/// Fully resolved settings for one run.
#[derive(Clone)]
pub struct StreakConfig {
    pub username: String,
    pub api_endpoint: String,
    pub token: Option<String>,
    pub output_path: String,
    pub window_days: u32,
    pub formats: Vec<String>,
    pub svg_filename: String,
    pub json_filename: String,
    pub theme: Theme,
}

impl StreakConfig {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into().trim().to_string(),
            api_endpoint: DEFAULT_GRAPHQL_ENDPOINT.to_string(),
            token: None,
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            window_days: MAX_WINDOW_DAYS,
            formats: vec!["svg".to_string()],
            svg_filename: DEFAULT_SVG_FILENAME.to_string(),
            json_filename: DEFAULT_JSON_FILENAME.to_string(),
            theme: Theme::default(),
        }
    }

    /// Starts from a config file; `username` wins over the file when given.
    pub fn from_toml(file: &TomlConfig, username: Option<&str>) -> Self {
        let username = username
            .or(file.github.username.as_deref())
            .unwrap_or_default();
        let mut config = Self::new(username);

        if let Some(endpoint) = &file.github.api_endpoint {
            config.api_endpoint = endpoint.clone();
        }
        config.token = file.github.token.clone();
        if let Some(days) = file.github.window_days {
            config.window_days = days;
        }
        if let Some(path) = &file.output.path {
            config.output_path = path.clone();
        }
        if let Some(formats) = &file.output.formats {
            config.formats = formats.clone();
        }
        if let Some(name) = &file.output.svg_filename {
            config.svg_filename = name.clone();
        }
        if let Some(name) = &file.output.json_filename {
            config.json_filename = name.clone();
        }
        config.theme = file.theme();
        config
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

impl fmt::Debug for StreakConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreakConfig")
            .field("username", &self.username)
            .field("api_endpoint", &self.api_endpoint)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("output_path", &self.output_path)
            .field("window_days", &self.window_days)
            .field("formats", &self.formats)
            .field("svg_filename", &self.svg_filename)
            .field("json_filename", &self.json_filename)
            .field("theme", &self.theme)
            .finish()
    }
}

impl ConfigProvider for StreakConfig {
    fn username(&self) -> &str {
        &self.username
    }

    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn window_days(&self) -> u32 {
        self.window_days
    }

    fn output_formats(&self) -> Vec<OutputFormat> {
        self.formats
            .iter()
            .filter_map(|f| OutputFormat::parse(f))
            .collect()
    }

    fn svg_filename(&self) -> &str {
        &self.svg_filename
    }

    fn json_filename(&self) -> &str {
        &self.json_filename
    }

    fn theme(&self) -> &Theme {
        &self.theme
    }
}

impl Validate for StreakConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_github_login("username", &self.username)?;
        validation::validate_url("api_endpoint", &self.api_endpoint)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_range("window_days", self.window_days, 1, MAX_WINDOW_DAYS)?;
        validation::validate_allowed_values("formats", &self.formats, &OutputFormat::ALL)?;
        validation::validate_path("svg_filename", &self.svg_filename)?;
        validation::validate_path("json_filename", &self.json_filename)?;

        let theme = &self.theme;
        validation::validate_color("theme.background_start", &theme.background_start)?;
        validation::validate_color("theme.background_end", &theme.background_end)?;
        validation::validate_color("theme.title", &theme.title)?;
        validation::validate_color("theme.accent", &theme.accent)?;
        validation::validate_color("theme.value", &theme.value)?;
        validation::validate_color("theme.label", &theme.label)?;

        Ok(())
    }
}

#[cfg(feature = "cli")]
pub use args::CliConfig;

#[cfg(feature = "cli")]
mod args {
    use super::toml_config::TomlConfig;
    use super::StreakConfig;
    use crate::utils::error::Result;
    use crate::utils::validation;
    use clap::Parser;
    use std::path::PathBuf;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "streak-stats")]
    #[command(about = "Render a GitHub contribution streak card as SVG", version)]
    pub struct CliConfig {
        /// GitHub login to generate the card for
        pub username: Option<String>,

        /// Token used for the GraphQL API. Both the flag and GITHUB_TOKEN take
        /// precedence over `[github] token` in the config file
        #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
        pub token: Option<String>,

        /// GraphQL endpoint [default: https://api.github.com/graphql]
        #[arg(long)]
        pub api_endpoint: Option<String>,

        /// Directory the card is written to [default: assets]
        #[arg(long)]
        pub output_path: Option<String>,

        /// Days of history to fetch, at most 365 [default: 365]
        #[arg(long)]
        pub window_days: Option<u32>,

        /// Output formats: svg, json [default: svg]
        #[arg(long = "format", value_delimiter = ',')]
        pub formats: Vec<String>,

        /// TOML config file; explicit flags override it
        #[arg(long)]
        pub config: Option<PathBuf>,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON lines")]
        pub log_json: bool,

        #[arg(long, help = "Log process CPU and memory per phase")]
        pub monitor: bool,
    }

    impl CliConfig {
        pub fn resolve(&self) -> Result<StreakConfig> {
            let file = match &self.config {
                Some(path) => {
                    tracing::debug!("Loading config file: {}", path.display());
                    TomlConfig::from_file(path)?
                }
                None => TomlConfig::default(),
            };

            let username = self
                .username
                .as_deref()
                .or(file.github.username.as_deref())
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string);
            let username = validation::validate_required_field("username", &username)?;

            let mut config = StreakConfig::from_toml(&file, Some(username));

            if let Some(token) = &self.token {
                config.token = Some(token.clone());
            }
            if let Some(endpoint) = &self.api_endpoint {
                config.api_endpoint = endpoint.clone();
            }
            if let Some(path) = &self.output_path {
                config.output_path = path.clone();
            }
            if let Some(days) = self.window_days {
                config.window_days = days;
            }
            if !self.formats.is_empty() {
                config.formats = self.formats.clone();
            }

            Ok(config)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::utils::error::StreakError;
        use clap::CommandFactory;
        use std::io::Write;
        use tempfile::NamedTempFile;

        #[test]
        fn test_flags_override_config_file() {
            let mut file = NamedTempFile::new().unwrap();
            file.write_all(
                br#"
[github]
username = "from-file"
window_days = 30

[output]
path = "file-output"
formats = ["json"]
"#,
            )
            .unwrap();

            let cli = CliConfig::parse_from([
                "streak-stats",
                "from-cli",
                "--config",
                file.path().to_str().unwrap(),
                "--output-path",
                "cli-output",
                "--format",
                "svg,json",
            ]);

            let config = cli.resolve().unwrap();
            assert_eq!(config.username, "from-cli");
            assert_eq!(config.window_days, 30);
            assert_eq!(config.output_path, "cli-output");
            assert_eq!(config.formats, vec!["svg".to_string(), "json".to_string()]);
        }

        #[test]
        fn test_missing_username_is_reported() {
            let cli = CliConfig::parse_from(["streak-stats"]);
            assert!(matches!(
                cli.resolve(),
                Err(StreakError::MissingConfigError { ref field }) if field == "username"
            ));

            let cli = CliConfig::parse_from(["streak-stats", "   "]);
            assert!(matches!(
                cli.resolve(),
                Err(StreakError::MissingConfigError { ref field }) if field == "username"
            ));
        }

        #[test]
        fn test_username_from_config_file_is_trimmed() {
            let mut file = NamedTempFile::new().unwrap();
            file.write_all(b"[github]\nusername = \" file-user \"\n")
                .unwrap();

            let cli =
                CliConfig::parse_from(["streak-stats", "--config", file.path().to_str().unwrap()]);
            assert_eq!(cli.resolve().unwrap().username, "file-user");
        }

        #[test]
        fn test_token_help_states_precedence() {
            let command = CliConfig::command();
            let token = command
                .get_arguments()
                .find(|arg| arg.get_id() == "token")
                .unwrap();

            assert_eq!(token.get_env(), Some(std::ffi::OsStr::new("GITHUB_TOKEN")));
            let help = token.get_help().unwrap().to_string();
            assert!(help.contains("GITHUB_TOKEN"));
            assert!(help.contains("[github] token"));
        }
    }
}
