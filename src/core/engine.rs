use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct StreakEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> StreakEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// Runs one extract, transform, load pass and returns the SVG path.
    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting streak card generation");
        if self.monitor.is_enabled() {
            tracing::info!("🔍 System monitoring enabled");
        }
        self.monitor.log_stats("Start");

        tracing::debug!("Fetching contribution calendar...");
        let calendar = self.pipeline.extract().await?;
        self.monitor.log_stats("Extract");

        tracing::debug!("Computing streaks...");
        let card = self.pipeline.transform(calendar).await?;
        self.monitor.log_stats("Transform");

        tracing::debug!("Writing outputs...");
        let output_path = self.pipeline.load(card).await?;
        self.monitor.log_stats("Load");

        tracing::info!("SVG generated successfully: {}", output_path);
        self.monitor.log_final_stats();

        Ok(output_path)
    }
}
