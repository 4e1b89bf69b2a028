use crate::error::Error;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The EU member states queried on every fetch (Eurostat geo codes, Greece is `EL`).
pub const COUNTRIES: [&str; 27] = [
    "BE", "BG", "CZ", "DK", "DE", "EE", "IE", "EL", "ES", "FR", "HR", "IT", "CY", "LV", "LT",
    "LU", "HU", "MT", "NL", "AT", "PL", "PT", "RO", "SI", "SK", "FI", "SE",
];

/// Number of years requested per fetch, counting back from the current year.
pub const YEAR_WINDOW: usize = 15;

/// The year window ending at `last_year`, newest first: `[last_year, last_year - 1, ...]`.
pub fn year_window(last_year: i32) -> Vec<i32> {
    (0..YEAR_WINDOW as i32).map(|i| last_year - i).collect()
}

/// The year window ending at the current calendar year (local time).
pub fn current_year_window() -> Vec<i32> {
    year_window(chrono::Local::now().year())
}

/// The three supported indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Indicator {
    /// Life expectancy at age one (`demo_mlexpec`).
    Sv,
    /// Population on 1 January (`demo_pjan`).
    Pop,
    /// Real GDP per capita, chain-linked 2010 euro (`sdg_08_10`).
    Pib,
}

impl Indicator {
    /// Fetch order of a full cycle.
    pub const ALL: [Indicator; 3] = [Indicator::Sv, Indicator::Pop, Indicator::Pib];

    pub fn code(&self) -> &'static str {
        match self {
            Indicator::Sv => "SV",
            Indicator::Pop => "POP",
            Indicator::Pib => "PIB",
        }
    }

    /// Human-readable name used in selectors and chart captions.
    pub fn label(&self) -> &'static str {
        match self {
            Indicator::Sv => "Life expectancy",
            Indicator::Pop => "Population",
            Indicator::Pib => "GDP per capita",
        }
    }

    /// Eurostat dataset code.
    pub fn dataset(&self) -> &'static str {
        match self {
            Indicator::Sv => "demo_mlexpec",
            Indicator::Pop => "demo_pjan",
            Indicator::Pib => "sdg_08_10",
        }
    }

    /// Fixed dimension filters that reduce the dataset to one value per (geo, time).
    pub fn filters(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Indicator::Sv => &[("sex", "T"), ("age", "Y1")],
            Indicator::Pop => &[("sex", "T"), ("age", "TOTAL")],
            Indicator::Pib => &[("na_item", "B1GQ"), ("unit", "CLV10_EUR_HAB")],
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Indicator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SV" => Ok(Indicator::Sv),
            "POP" => Ok(Indicator::Pop),
            "PIB" => Ok(Indicator::Pib),
            _ => Err(Error::UnknownIndicator(s.to_string())),
        }
    }
}

/// Flat observation used by the store and both charts (one row = one value).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Record {
    pub country: String,
    pub year: i32,
    pub indicator: Indicator,
    pub value: f64,
}

impl Record {
    pub fn new(country: impl Into<String>, year: i32, indicator: Indicator, value: f64) -> Self {
        Self {
            country: country.into(),
            year,
            indicator,
            value,
        }
    }
}

/// Grouping key used in stats.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey {
    pub indicator: Indicator,
    pub country: String,
}

/// Raw JSON-stat 2.0 dataset as served by the Eurostat dissemination API.
///
/// Only the parts the decoder needs are modelled. `id`/`size` are optional in
/// hand-made payloads; when present they are used to validate the layout.
#[derive(Debug, Clone, Deserialize)]
pub struct Payload {
    pub dimension: Dimensions,
    pub value: ValueTable,
    #[serde(default)]
    pub id: Vec<String>,
    #[serde(default)]
    pub size: Vec<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Dimensions {
    pub geo: Dimension,
    pub time: Dimension,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Dimension {
    pub category: Category,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub index: CategoryIndex,
    #[serde(default)]
    pub label: BTreeMap<String, String>,
}

/// JSON-stat allows the category index either as `{code: position}` or as an ordered code list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CategoryIndex {
    Positions(BTreeMap<String, usize>),
    Ordered(Vec<String>),
}

impl CategoryIndex {
    /// `(code, position)` pairs sorted by position.
    pub fn positions(&self) -> Vec<(String, usize)> {
        let mut out: Vec<(String, usize)> = match self {
            CategoryIndex::Positions(map) => map.iter().map(|(k, v)| (k.clone(), *v)).collect(),
            CategoryIndex::Ordered(codes) => codes
                .iter()
                .enumerate()
                .map(|(i, k)| (k.clone(), i))
                .collect(),
        };
        out.sort_by_key(|(_, pos)| *pos);
        out
    }

    pub fn len(&self) -> usize {
        match self {
            CategoryIndex::Positions(map) => map.len(),
            CategoryIndex::Ordered(codes) => codes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Values keyed by flat offset. Eurostat sends a sparse object; dense arrays use `null` for gaps.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ValueTable {
    Sparse(BTreeMap<String, serde_json::Value>),
    Dense(Vec<serde_json::Value>),
}
