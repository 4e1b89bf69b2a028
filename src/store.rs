//! In-memory dataset of decoded records, rebuilt on every fetch cycle.

use crate::decode::Batch;
use crate::models::{Indicator, Record};
use std::collections::{BTreeMap, BTreeSet};

/// Ordered collection of records: indicator fetch order, then country, then year.
#[derive(Debug, Clone, Default)]
pub struct DatasetStore {
    records: Vec<Record>,
    country_labels: BTreeMap<String, String>,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        Self {
            records,
            country_labels: BTreeMap::new(),
        }
    }

    /// Drop all records and labels.
    pub fn reset(&mut self) {
        self.records.clear();
        self.country_labels.clear();
    }

    pub fn append(&mut self, records: impl IntoIterator<Item = Record>) {
        self.records.extend(records);
    }

    pub fn append_batch(&mut self, batch: Batch) {
        for (code, label) in batch.country_labels {
            self.country_labels.entry(code).or_insert(label);
        }
        self.append(batch.records);
    }

    /// Reset, then append every batch in order.
    pub fn replace(&mut self, batches: Vec<Batch>) {
        self.reset();
        for batch in batches {
            self.append_batch(batch);
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Matching records in store order.
    pub fn query<F>(&self, predicate: F) -> Vec<&Record>
    where
        F: Fn(&Record) -> bool,
    {
        self.records.iter().filter(|r| predicate(r)).collect()
    }

    /// Unique country codes in first-seen order.
    pub fn distinct_countries(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        self.records
            .iter()
            .filter(|r| seen.insert(r.country.as_str()))
            .map(|r| r.country.clone())
            .collect()
    }

    /// Unique years, ascending.
    pub fn distinct_years(&self) -> Vec<i32> {
        self.records
            .iter()
            .map(|r| r.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// `(years, values)` of one country/indicator pair in store order.
    pub fn series(&self, country: &str, indicator: Indicator) -> (Vec<i32>, Vec<f64>) {
        self.query(|r| r.country == country && r.indicator == indicator)
            .into_iter()
            .map(|r| (r.year, r.value))
            .unzip()
    }

    /// All records of one year, across countries and indicators.
    pub fn year_records(&self, year: i32) -> Vec<Record> {
        self.query(|r| r.year == year).into_iter().cloned().collect()
    }

    /// Display name for a country, falling back to the code itself.
    pub fn country_label<'a>(&'a self, code: &'a str) -> &'a str {
        self.country_labels
            .get(code)
            .map(String::as_str)
            .unwrap_or(code)
    }
}
