//! Error taxonomy shared by the fetch cycle, the decoder and the chart builders.

use crate::models::Indicator;
use thiserror::Error;

/// Reasons a raw payload cannot be turned into records.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed payload: {0}")]
    Malformed(String),
    #[error("time category `{0}` is not a year")]
    InvalidYear(String),
    #[error("value at offset {offset} is not a finite number: {raw}")]
    InvalidValue { offset: usize, raw: String },
    #[error("value key `{0}` is not a flat offset")]
    InvalidOffset(String),
    #[error("dimension `{id}` has {size} categories; only geo and time may vary")]
    UnsupportedDimension { id: String, size: usize },
}

#[derive(Debug, Error)]
pub enum Error {
    /// Network, HTTP or body-parse failure while talking to the data source.
    #[error("fetching {indicator} failed: {message}")]
    Fetch {
        indicator: Indicator,
        message: String,
    },
    /// The payload for one indicator was malformed; the whole cycle is aborted.
    #[error("decoding {indicator} failed: {source}")]
    Decode {
        indicator: Indicator,
        #[source]
        source: DecodeError,
    },
    /// A chart was requested without the required selector value.
    #[error("no {0} selected")]
    Selection(&'static str),
    /// The selection is valid but nothing in the dataset matches it.
    #[error("no data for {0}")]
    EmptyResult(String),
    #[error("years and values differ in length ({years} vs {values})")]
    SeriesLength { years: usize, values: usize },
    #[error("unknown indicator `{0}` (expected SV, POP or PIB)")]
    UnknownIndicator(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
