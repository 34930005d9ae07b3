//! Summary Metrics Module
//! Headline dashboard numbers for the currently selected region.

use serde::Serialize;

use crate::data::DerivedSeries;

/// Cumulative totals on the most recent date of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SummaryMetrics {
    pub confirmed: u64,
    pub deaths: u64,
    pub cured: u64,
    /// confirmed - cured - deaths; can go negative when the source data
    /// disagrees with itself.
    pub active: i64,
}

/// Computes the dashboard's headline metrics.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Metrics for the latest date of the series, or `None` when the series
    /// is empty (e.g. an unknown region); callers render placeholders.
    pub fn summary(series: &DerivedSeries) -> Option<SummaryMetrics> {
        series.latest().map(|row| SummaryMetrics {
            confirmed: row.confirmed,
            deaths: row.deaths,
            cured: row.cured,
            active: row.confirmed as i64 - row.cured as i64 - row.deaths as i64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{aggregate, CaseRecord, CleanTable, RegionFilter};

    fn record(date: &str, region: &str, confirmed: u64, deaths: u64, cured: u64) -> CaseRecord {
        CaseRecord {
            date: date.parse().unwrap(),
            region: region.to_string(),
            confirmed,
            deaths,
            cured,
        }
    }

    fn two_region_table() -> CleanTable {
        CleanTable::from_records(vec![
            record("2020-04-01", "Kerala", 100, 2, 10),
            record("2020-04-01", "Delhi", 50, 1, 5),
            record("2020-04-02", "Kerala", 150, 3, 40),
            record("2020-04-02", "Delhi", 80, 2, 20),
        ])
    }

    #[test]
    fn active_cases_identity_holds() {
        let series = aggregate(&two_region_table(), &RegionFilter::All);
        let metrics = StatsCalculator::summary(&series).unwrap();

        assert_eq!(metrics.confirmed, 230);
        assert_eq!(metrics.deaths, 5);
        assert_eq!(metrics.cured, 60);
        assert_eq!(metrics.active, 230 - 60 - 5);
    }

    #[test]
    fn metrics_follow_the_region_filter() {
        let table = two_region_table();

        let kerala = StatsCalculator::summary(&aggregate(&table, &RegionFilter::parse("Kerala")))
            .unwrap();
        assert_eq!(kerala.confirmed, 150);
        assert_eq!(kerala.active, 150 - 40 - 3);

        let delhi =
            StatsCalculator::summary(&aggregate(&table, &RegionFilter::parse("Delhi"))).unwrap();
        assert_eq!(delhi.confirmed, 80);
        assert_eq!(delhi.active, 80 - 20 - 2);
    }

    #[test]
    fn empty_series_has_no_metrics() {
        let series = aggregate(&two_region_table(), &RegionFilter::parse("Atlantis"));
        assert_eq!(StatsCalculator::summary(&series), None);
    }

    #[test]
    fn active_can_go_negative_on_dirty_data() {
        let table = CleanTable::from_records(vec![record("2020-04-01", "Kerala", 10, 5, 20)]);
        let series = aggregate(&table, &RegionFilter::All);
        let metrics = StatsCalculator::summary(&series).unwrap();
        assert_eq!(metrics.active, -15);
    }
}
