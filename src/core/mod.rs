pub mod engine;
pub mod render;
pub mod streak;

pub use crate::domain::model::{ContributionCalendar, StreakCard, StreakStats};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
