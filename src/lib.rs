//! Covidscope - COVID-19 Case Data Engine
//!
//! Cleans per-region cumulative case CSVs and derives the daily series and
//! summary metrics behind an interactive dashboard. The dashboard shell
//! (widgets, chart rendering, file pickers) lives with the embedding
//! application; this crate is the data side: loading, cleaning, aggregation,
//! smoothing and headline metrics.

pub mod data;
pub mod stats;

pub use data::{
    aggregate, CaseRecord, CleanTable, DataLoader, DerivedSeries, LoaderError, RegionFilter,
    SeriesRow, ALL_REGIONS, SMOOTHING_WINDOW,
};
pub use stats::{StatsCalculator, SummaryMetrics};
