pub mod streak_pipeline;
