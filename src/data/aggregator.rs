//! Aggregator Module
//! Derives the per-date daily series (deltas + smoothing) for a region selection.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use super::model::CleanTable;

/// Rows in the trailing window of the smoothed daily averages.
pub const SMOOTHING_WINDOW: usize = 7;

/// Selector value meaning "sum across every region".
pub const ALL_REGIONS: &str = "ALL";

/// Region selection: one label, or the union of every region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RegionFilter {
    All,
    Region(String),
}

impl RegionFilter {
    /// Interpret a selector label; [`ALL_REGIONS`] selects the union.
    pub fn parse(label: &str) -> Self {
        if label == ALL_REGIONS {
            RegionFilter::All
        } else {
            RegionFilter::Region(label.to_string())
        }
    }

    /// Exact match against cleaned region labels, no fuzzy matching.
    fn matches(&self, region: &str) -> bool {
        match self {
            RegionFilter::All => true,
            RegionFilter::Region(wanted) => wanted == region,
        }
    }
}

impl std::fmt::Display for RegionFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegionFilter::All => f.write_str(ALL_REGIONS),
            RegionFilter::Region(label) => f.write_str(label),
        }
    }
}

/// One derived row: cumulative totals for a date plus daily deltas and their
/// trailing averages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesRow {
    pub date: NaiveDate,
    pub confirmed: u64,
    pub deaths: u64,
    pub cured: u64,
    pub new_cases: u64,
    pub new_deaths: u64,
    pub new_recoveries: u64,
    /// 7-row trailing mean; absent until the window has filled.
    pub new_cases_avg: Option<f64>,
    pub new_deaths_avg: Option<f64>,
    pub new_recoveries_avg: Option<f64>,
}

/// The derived daily series for one region selection, ascending by date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedSeries {
    filter: RegionFilter,
    rows: Vec<SeriesRow>,
}

impl DerivedSeries {
    /// The filter this series was computed for.
    pub fn filter(&self) -> &RegionFilter {
        &self.filter
    }

    /// All rows, one per distinct date in the filtered input.
    pub fn rows(&self) -> &[SeriesRow] {
        &self.rows
    }

    /// The most recent row, if any.
    pub fn latest(&self) -> Option<&SeriesRow> {
        self.rows.last()
    }

    /// Rows on the most recent date - the dashboard's latest-data table.
    /// Empty when the series is empty.
    pub fn latest_snapshot(&self) -> &[SeriesRow] {
        match self.rows.last() {
            Some(last) => {
                let start = self.rows.partition_point(|r| r.date < last.date);
                &self.rows[start..]
            }
            None => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Aggregate the cleaned table for one region selection.
///
/// Pure: identical table and filter always produce the identical series. An
/// unmatched region label yields an empty series, not an error.
pub fn aggregate(table: &CleanTable, filter: &RegionFilter) -> DerivedSeries {
    // Sum cumulative counters per date across the matching regions.
    let mut by_date: BTreeMap<NaiveDate, (u64, u64, u64)> = BTreeMap::new();
    for record in table.records() {
        if !filter.matches(&record.region) {
            continue;
        }
        let totals = by_date.entry(record.date).or_insert((0, 0, 0));
        totals.0 += record.confirmed;
        totals.1 += record.deaths;
        totals.2 += record.cured;
    }

    let confirmed: Vec<u64> = by_date.values().map(|t| t.0).collect();
    let deaths: Vec<u64> = by_date.values().map(|t| t.1).collect();
    let cured: Vec<u64> = by_date.values().map(|t| t.2).collect();

    let new_cases = daily_deltas(&confirmed);
    let new_deaths = daily_deltas(&deaths);
    let new_recoveries = daily_deltas(&cured);

    let new_cases_avg = rolling_mean(&new_cases, SMOOTHING_WINDOW);
    let new_deaths_avg = rolling_mean(&new_deaths, SMOOTHING_WINDOW);
    let new_recoveries_avg = rolling_mean(&new_recoveries, SMOOTHING_WINDOW);

    let rows = by_date
        .keys()
        .enumerate()
        .map(|(i, &date)| SeriesRow {
            date,
            confirmed: confirmed[i],
            deaths: deaths[i],
            cured: cured[i],
            new_cases: new_cases[i],
            new_deaths: new_deaths[i],
            new_recoveries: new_recoveries[i],
            new_cases_avg: new_cases_avg[i],
            new_deaths_avg: new_deaths_avg[i],
            new_recoveries_avg: new_recoveries_avg[i],
        })
        .collect();

    DerivedSeries {
        filter: filter.clone(),
        rows,
    }
}

/// First difference of a cumulative counter, floored at zero.
///
/// The first day has no prior value to diff against, so its delta is zero.
/// Downward corrections in the source data are clipped rather than surfaced
/// as negative days.
fn daily_deltas(cumulative: &[u64]) -> Vec<u64> {
    cumulative
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            if i == 0 {
                0
            } else {
                value.saturating_sub(cumulative[i - 1])
            }
        })
        .collect()
}

/// Trailing simple moving average over `window` rows.
///
/// Row-indexed, not calendar-indexed: a gap between dates still counts as one
/// row. Rows before the window has filled have no defined average.
fn rolling_mean(values: &[u64], window: usize) -> Vec<Option<f64>> {
    let mut sum: u64 = 0;
    values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            sum += value;
            if i + 1 < window {
                return None;
            }
            if i >= window {
                sum -= values[i - window];
            }
            Some(sum as f64 / window as f64)
        })
        .collect()
}
