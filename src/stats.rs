use crate::models::{GroupKey, Record};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summary statistics for a group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub key: GroupKey,
    pub count: usize,
    pub first_year: i32,
    pub last_year: i32,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
}

/// Compute grouped statistics by (indicator, country).
pub fn grouped_summary(records: &[Record]) -> Vec<Summary> {
    let mut groups: BTreeMap<GroupKey, Vec<(i32, f64)>> = BTreeMap::new();
    for r in records {
        let key = GroupKey {
            indicator: r.indicator,
            country: r.country.clone(),
        };
        groups.entry(key).or_default().push((r.year, r.value));
    }

    let mut out = Vec::new();
    for (key, obs) in groups {
        let first_year = obs.iter().map(|(y, _)| *y).min().unwrap_or_default();
        let last_year = obs.iter().map(|(y, _)| *y).max().unwrap_or_default();
        let mut vals: Vec<f64> = obs.into_iter().map(|(_, v)| v).collect();
        vals.sort_by(|a, b| a.total_cmp(b));
        let count = vals.len();
        let mean = vals.iter().copied().sum::<f64>() / count as f64;
        let median = if count % 2 == 1 {
            vals[count / 2]
        } else {
            (vals[count / 2 - 1] + vals[count / 2]) / 2.0
        };
        out.push(Summary {
            key,
            count,
            first_year,
            last_year,
            min: vals[0],
            max: vals[count - 1],
            mean,
            median,
        });
    }
    out
}
