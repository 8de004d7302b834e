use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionDay {
    pub date: NaiveDate,
    pub count: u32,
}

/// Contribution calendar for one user over a fetch window.
///
/// `days` only holds dates with at least one contribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionCalendar {
    pub username: String,
    pub total_contributions: u64,
    pub days: BTreeMap<NaiveDate, u32>,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
}

impl ContributionCalendar {
    pub fn new(
        username: impl Into<String>,
        total_contributions: u64,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Self {
        Self {
            username: username.into(),
            total_contributions,
            days: BTreeMap::new(),
            window_start,
            window_end,
        }
    }

    /// Zero-count days are dropped; a repeated date keeps the last count seen.
    pub fn record(&mut self, day: ContributionDay) {
        if day.count > 0 {
            self.days.insert(day.date, day.count);
        } else {
            self.days.remove(&day.date);
        }
    }

    pub fn active_days(&self) -> usize {
        self.days.len()
    }

    /// UTC date the window ends on; streaks are measured up to this day.
    pub fn today(&self) -> NaiveDate {
        self.window_end.date_naive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakStats {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_contributions: u64,
    pub active_days: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakCard {
    pub username: String,
    pub stats: StreakStats,
    pub generated_at: DateTime<Utc>,
    #[serde(skip)]
    pub svg: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub background_start: String,
    pub background_end: String,
    pub title: String,
    pub accent: String,
    pub value: String,
    pub label: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background_start: "#0d1117".to_string(),
            background_end: "#161b22".to_string(),
            title: "#58a6ff".to_string(),
            accent: "#f59e0b".to_string(),
            value: "white".to_string(),
            label: "#8b949e".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Json,
}

impl OutputFormat {
    pub const ALL: [&'static str; 2] = ["svg", "json"];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "svg" => Some(OutputFormat::Svg),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}
