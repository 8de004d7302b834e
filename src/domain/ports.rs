use crate::domain::model::{ContributionCalendar, OutputFormat, StreakCard, Theme};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn username(&self) -> &str;
    fn api_endpoint(&self) -> &str;
    fn token(&self) -> Option<&str>;
    fn output_path(&self) -> &str;
    fn window_days(&self) -> u32;
    fn output_formats(&self) -> Vec<OutputFormat>;
    fn svg_filename(&self) -> &str;
    fn json_filename(&self) -> &str;
    fn theme(&self) -> &Theme;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<ContributionCalendar>;
    async fn transform(&self, calendar: ContributionCalendar) -> Result<StreakCard>;
    async fn load(&self, card: StreakCard) -> Result<String>;
}
