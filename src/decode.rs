//! Sparse-index decoder: turns one indicator's JSON-stat payload into flat [`Record`]s.
//!
//! The payload stores values in a single flat table addressed by
//! `geo_position * time_count + time_position`. Offsets absent from the table
//! (or `null`) mean "no observation" and are skipped.

use crate::error::DecodeError;
use crate::models::{Indicator, Payload, Record, ValueTable};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Output of decoding one indicator payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub indicator: Indicator,
    pub records: Vec<Record>,
    /// Country code -> display name, when the payload carries category labels.
    pub country_labels: BTreeMap<String, String>,
}

/// Decode a raw payload into records ordered by country position, then year position.
pub fn decode(raw: &Value, indicator: Indicator) -> Result<Vec<Record>, DecodeError> {
    decode_batch(raw, indicator).map(|b| b.records)
}

/// Same as [`decode`] but also returns the geo category labels.
pub fn decode_batch(raw: &Value, indicator: Indicator) -> Result<Batch, DecodeError> {
    let payload: Payload =
        serde_json::from_value(raw.clone()).map_err(|e| DecodeError::Malformed(e.to_string()))?;
    decode_payload(&payload, indicator)
}

pub fn decode_payload(payload: &Payload, indicator: Indicator) -> Result<Batch, DecodeError> {
    check_layout(payload)?;

    let geo = payload.dimension.geo.category.index.positions();
    let time = payload.dimension.time.category.index.positions();
    let time_count = time.len();

    let years = time
        .iter()
        .map(|(key, pos)| {
            key.trim()
                .parse::<i32>()
                .map(|year| (year, *pos))
                .map_err(|_| DecodeError::InvalidYear(key.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let values = offset_table(&payload.value)?;

    let mut records = Vec::new();
    for (country, geo_pos) in &geo {
        for (year, time_pos) in &years {
            let offset = geo_pos * time_count + time_pos;
            if let Some(value) = values.get(&offset) {
                records.push(Record::new(country.clone(), *year, indicator, *value));
            }
        }
    }

    Ok(Batch {
        indicator,
        records,
        country_labels: payload.dimension.geo.category.label.clone(),
    })
}

/// The flat-offset formula only holds when every dimension other than geo and
/// time is a singleton and geo comes before time.
fn check_layout(payload: &Payload) -> Result<(), DecodeError> {
    if payload.id.is_empty() || payload.size.is_empty() {
        return Ok(());
    }
    if payload.id.len() != payload.size.len() {
        return Err(DecodeError::Malformed(format!(
            "{} dimension ids but {} sizes",
            payload.id.len(),
            payload.size.len()
        )));
    }
    for (id, size) in payload.id.iter().zip(&payload.size) {
        if id != "geo" && id != "time" && *size > 1 {
            return Err(DecodeError::UnsupportedDimension {
                id: id.clone(),
                size: *size,
            });
        }
    }
    let geo_at = payload.id.iter().position(|d| d == "geo");
    let time_at = payload.id.iter().position(|d| d == "time");
    if let (Some(g), Some(t)) = (geo_at, time_at)
        && t < g
    {
        return Err(DecodeError::Malformed("time dimension precedes geo".into()));
    }
    Ok(())
}

fn offset_table(table: &ValueTable) -> Result<HashMap<usize, f64>, DecodeError> {
    let mut out = HashMap::new();
    match table {
        ValueTable::Sparse(map) => {
            for (key, raw) in map {
                let offset = key
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| DecodeError::InvalidOffset(key.clone()))?;
                if let Some(v) = parse_value(offset, raw)? {
                    out.insert(offset, v);
                }
            }
        }
        ValueTable::Dense(list) => {
            for (offset, raw) in list.iter().enumerate() {
                if let Some(v) = parse_value(offset, raw)? {
                    out.insert(offset, v);
                }
            }
        }
    }
    Ok(out)
}

/// `null` is a gap; numbers and numeric strings are values; anything else is an error.
fn parse_value(offset: usize, raw: &Value) -> Result<Option<f64>, DecodeError> {
    let parsed = match raw {
        Value::Null => return Ok(None),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(DecodeError::InvalidValue {
            offset,
            raw: raw.to_string(),
        }),
    }
}
