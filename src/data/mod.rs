//! Data module - CSV loading, cleaning and aggregation

mod aggregator;
mod loader;
mod model;

pub use aggregator::{
    aggregate, DerivedSeries, RegionFilter, SeriesRow, ALL_REGIONS, SMOOTHING_WINDOW,
};
pub use loader::{DataLoader, LoaderError};
pub use model::{CaseRecord, CleanTable};
