pub mod charts;
pub mod html;
pub mod model;

pub use charts::{build_performance_charts, PerformanceCharts};
pub use model::{AccuracyColumn, GameCard};
