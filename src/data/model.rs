//! Table Model Module
//! Typed case records and the cleaned in-memory table.

use chrono::NaiveDate;
use std::collections::HashMap;

/// One cleaned (date, region) observation with cumulative counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseRecord {
    pub date: NaiveDate,
    /// Region label with surrounding whitespace removed.
    pub region: String,
    pub confirmed: u64,
    pub deaths: u64,
    pub cured: u64,
}

/// The cleaned dataset: at most one record per (date, region), sorted
/// ascending by date. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct CleanTable {
    records: Vec<CaseRecord>,
    regions: Vec<String>,
}

impl CleanTable {
    /// Build a table from cleaned records.
    ///
    /// When several records share a (date, region) key, the last one by input
    /// order wins. Records are then stably sorted by date; relative order
    /// within a date is not significant (the aggregator regroups by date).
    pub fn from_records(records: Vec<CaseRecord>) -> Self {
        let mut deduped: Vec<CaseRecord> = Vec::with_capacity(records.len());
        let mut slots: HashMap<(NaiveDate, String), usize> = HashMap::new();

        for record in records {
            let key = (record.date, record.region.clone());
            match slots.get(&key) {
                Some(&slot) => deduped[slot] = record,
                None => {
                    slots.insert(key, deduped.len());
                    deduped.push(record);
                }
            }
        }

        deduped.sort_by_key(|r| r.date);

        let mut regions: Vec<String> = slots.into_keys().map(|(_, region)| region).collect();
        regions.sort();
        regions.dedup();

        Self {
            records: deduped,
            regions,
        }
    }

    /// All records, ascending by date.
    pub fn records(&self) -> &[CaseRecord] {
        &self.records
    }

    /// Sorted unique region labels (drives the region selector).
    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    /// Number of records in the table.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
