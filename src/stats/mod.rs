//! Stats module - dashboard summary metrics

mod calculator;

pub use calculator::{StatsCalculator, SummaryMetrics};
