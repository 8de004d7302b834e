pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::pipelines::streak_pipeline::StreakPipeline;
pub use config::{cli::LocalStorage, StreakConfig};
pub use core::engine::StreakEngine;
pub use utils::error::{Result, StreakError};
