// Domain layer - pure view-model types and chart/classification logic
pub mod boiler;
pub mod chart;
pub mod dashboard;
pub mod metrics;
pub mod pollutant;
pub mod series;
pub mod summary;
