pub mod client;
pub mod models;

pub use client::{ApiClient, ApiError, PredictionsApi};
pub use models::{AccuracySummary, GamePrediction, PerformanceSample, Stat};
