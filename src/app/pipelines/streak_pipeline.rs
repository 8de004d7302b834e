use crate::adapters::github::GitHubClient;
use crate::core::render::render_card;
use crate::core::streak::streak_stats;
use crate::core::{ConfigProvider, ContributionCalendar, Pipeline, Storage, StreakCard};
use crate::domain::model::OutputFormat;
use crate::utils::error::Result;
use chrono::{DateTime, Duration, Utc};
use std::path::Path;

pub struct StreakPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
    clock: Option<DateTime<Utc>>,
}

impl<S: Storage, C: ConfigProvider> StreakPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            clock: None,
        }
    }

    /// Pins "now" so the fetch window and the current streak are reproducible.
    pub fn with_clock(mut self, now: DateTime<Utc>) -> Self {
        self.clock = Some(now);
        self
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.unwrap_or_else(Utc::now)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for StreakPipeline<S, C> {
    async fn extract(&self) -> Result<ContributionCalendar> {
        let client = GitHubClient::new(self.config.api_endpoint(), self.config.token())?;

        let to = self.now();
        let from = to - Duration::days(i64::from(self.config.window_days()));

        tracing::info!(
            "Generating streak stats for GitHub user: {}",
            self.config.username()
        );
        let calendar = client
            .fetch_calendar(self.config.username(), from, to)
            .await?;

        tracing::info!(
            "Total contributions (last {} days): {}",
            self.config.window_days(),
            calendar.total_contributions
        );
        tracing::info!("Days with contributions: {}", calendar.active_days());

        Ok(calendar)
    }

    async fn transform(&self, calendar: ContributionCalendar) -> Result<StreakCard> {
        let stats = streak_stats(&calendar);
        tracing::info!("Current streak: {}", stats.current_streak);
        tracing::info!("Longest streak: {}", stats.longest_streak);

        let svg = render_card(&calendar.username, &stats, self.config.theme());

        Ok(StreakCard {
            username: calendar.username,
            stats,
            generated_at: self.now(),
            svg,
        })
    }

    async fn load(&self, card: StreakCard) -> Result<String> {
        let formats = self.config.output_formats();

        tracing::debug!("Writing {} ({} bytes)", self.config.svg_filename(), card.svg.len());
        self.storage
            .write_file(self.config.svg_filename(), card.svg.as_bytes())
            .await?;

        if formats.contains(&OutputFormat::Json) {
            let json_data = serde_json::to_string_pretty(&card)?;
            tracing::debug!("Writing {}", self.config.json_filename());
            self.storage
                .write_file(self.config.json_filename(), json_data.as_bytes())
                .await?;
        }

        let output_path = Path::new(self.config.output_path()).join(self.config.svg_filename());
        Ok(output_path.display().to_string())
    }
}
