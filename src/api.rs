//! Synchronous client for the **Eurostat dissemination API** (JSON-stat 2.0).
//!
//! Each indicator is one dataset request filtered down to a single value per
//! (country, year); see [`Indicator::dataset`] and [`Indicator::filters`].
//!
//! ### Notes
//! - Every request lists the 27 member states (`geo=`) and the 15-year window (`time=`).
//! - Transient failures (5xx, network) are retried with a short backoff; 4xx fails fast.
//! - A fetch cycle is all-or-nothing: the store is only replaced after all three
//!   indicators were fetched and decoded.
//!
//! Typical usage:
//! ```no_run
//! # use eustat_viz::{EurostatClient, DatasetStore};
//! # use eustat_viz::models::current_year_window;
//! let client = EurostatClient::default();
//! let mut store = DatasetStore::new();
//! eustat_viz::api::fetch_cycle(&client, &mut store, &current_year_window())?;
//! # Ok::<(), eustat_viz::Error>(())
//! ```
use crate::decode::{Batch, decode_batch};
use crate::error::{Error, Result};
use crate::models::{COUNTRIES, Indicator};
use crate::store::DatasetStore;
use log::{debug, info, warn};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str =
    "https://ec.europa.eu/eurostat/api/dissemination/statistics/1.0/data";

/// One indicator request: dataset filters plus the country and year lists.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub indicator: Indicator,
    pub countries: Vec<String>,
    pub years: Vec<i32>,
}

impl Query {
    /// Query for the fixed country list over `years`.
    pub fn new(indicator: Indicator, years: &[i32]) -> Self {
        Self {
            indicator,
            countries: COUNTRIES.iter().map(|c| c.to_string()).collect(),
            years: years.to_vec(),
        }
    }
}

/// Anything that can answer a [`Query`] with a raw JSON-stat payload.
pub trait DataSource {
    fn fetch(&self, query: &Query) -> Result<Value>;
}

#[derive(Debug, Clone)]
pub struct EurostatClient {
    pub base_url: String,
    http: HttpClient,
}

impl Default for EurostatClient {
    fn default() -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .redirect(Policy::limited(5))
            .user_agent(concat!("eustat_viz/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("reqwest client build");
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            http,
        }
    }
}

/// Sleep before each attempt; the first attempt goes out immediately.
const RETRY_BACKOFF_MS: [u64; 3] = [0, 100, 300];

// Allow -, _, . unescaped (dataset and filter codes)
const SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

fn enc(s: &str) -> String {
    percent_encoding::utf8_percent_encode(s.trim(), SAFE).to_string()
}

/// `{base}/{dataset}?{filters}&geo=..&time=..`
pub fn build_url(base_url: &str, query: &Query) -> String {
    let filters = query
        .indicator
        .filters()
        .iter()
        .map(|(k, v)| format!("{}={}", enc(k), enc(v)));
    let geo = query.countries.iter().map(|c| format!("geo={}", enc(c)));
    let time = query.years.iter().map(|y| format!("time={}", y));
    let params = filters.chain(geo).chain(time).collect::<Vec<_>>().join("&");
    format!(
        "{}/{}?{}",
        base_url.trim_end_matches('/'),
        query.indicator.dataset(),
        params
    )
}

/// Extract the human message from an Eurostat error body
/// (`{"error": [{"status": 400, "label": "..."}]}` or the single-object variant).
pub fn error_label(body: &Value) -> Option<String> {
    let err = body.get("error")?;
    let first = match err {
        Value::Array(items) => items.first()?,
        other => other,
    };
    let label = first
        .get("label")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| first.to_string());
    Some(label)
}

impl EurostatClient {
    pub fn url_for(&self, query: &Query) -> String {
        build_url(&self.base_url, query)
    }
}

impl DataSource for EurostatClient {
    fn fetch(&self, query: &Query) -> Result<Value> {
        let indicator = query.indicator;
        let fail = |message: String| Error::Fetch { indicator, message };
        let url = self.url_for(query);
        debug!("GET {}", url);

        // Small retry for transient failures (5xx / network errors)
        let mut last_err = String::from("no attempt made");
        for (attempt, backoff_ms) in RETRY_BACKOFF_MS.iter().enumerate() {
            if attempt > 0 {
                warn!("{} fetch attempt failed ({}), retrying", indicator, last_err);
                std::thread::sleep(Duration::from_millis(*backoff_ms));
            }
            match self.http.get(&url).send() {
                Ok(r) if r.status().is_success() => {
                    let body: Value = r.json().map_err(|e| fail(format!("decode json: {e}")))?;
                    if let Some(label) = error_label(&body) {
                        return Err(fail(format!("eurostat api error: {label}")));
                    }
                    return Ok(body);
                }
                Ok(r) if r.status().is_server_error() => {
                    last_err = format!("HTTP {}", r.status());
                }
                Ok(r) => {
                    let status = r.status();
                    let detail = r
                        .json::<Value>()
                        .ok()
                        .and_then(|b| error_label(&b))
                        .unwrap_or_default();
                    return Err(fail(format!("request failed with HTTP {status} {detail}")
                        .trim_end()
                        .to_string()));
                }
                Err(e) => last_err = e.to_string(),
            }
        }
        Err(fail(format!("network error: {last_err}")))
    }
}

/// Fetch and decode every indicator for `years`, then replace the store contents.
///
/// On the first fetch or decode failure the cycle aborts and `store` keeps its
/// previous records. Returns the number of records now in the store.
pub fn fetch_cycle<S>(source: &S, store: &mut DatasetStore, years: &[i32]) -> Result<usize>
where
    S: DataSource + ?Sized,
{
    let mut batches: Vec<Batch> = Vec::with_capacity(Indicator::ALL.len());
    for indicator in Indicator::ALL {
        let query = Query::new(indicator, years);
        let raw = source.fetch(&query).inspect_err(|e| warn!("fetch cycle aborted: {e}"))?;
        let batch = decode_batch(&raw, indicator)
            .map_err(|e| Error::Decode { indicator, source: e })
            .inspect_err(|e| warn!("fetch cycle aborted: {e}"))?;
        info!("{}: decoded {} records", indicator, batch.records.len());
        batches.push(batch);
    }
    store.replace(batches);
    info!("dataset replaced: {} records", store.len());
    Ok(store.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn url_lists_filters_countries_and_years() {
        let q = Query::new(Indicator::Pib, &[2024, 2023]);
        let url = build_url("https://example.test/data/", &q);
        assert!(url.starts_with(
            "https://example.test/data/sdg_08_10?na_item=B1GQ&unit=CLV10_EUR_HAB&geo=BE&geo=BG"
        ));
        assert!(url.ends_with("geo=SE&time=2024&time=2023"));
        assert_eq!(url.matches("geo=").count(), 27);
    }

    #[test]
    fn unreachable_host_gives_up_without_trailing_backoff() {
        let client = EurostatClient {
            base_url: "http://127.0.0.1:1/data".into(),
            ..EurostatClient::default()
        };
        let started = std::time::Instant::now();
        let err = client.fetch(&Query::new(Indicator::Sv, &[2020])).unwrap_err();
        assert!(matches!(err, Error::Fetch { indicator: Indicator::Sv, .. }));
        // only the two in-between sleeps (100 + 300 ms)
        assert!(started.elapsed() < Duration::from_millis(1000), "{:?}", started.elapsed());
    }

    #[test]
    fn error_label_reads_both_shapes() {
        let arr = json!({"error": [{"status": 400, "label": "bad filter"}]});
        assert_eq!(error_label(&arr).as_deref(), Some("bad filter"));
        let obj = json!({"error": {"status": 404, "label": "no such dataset"}});
        assert_eq!(error_label(&obj).as_deref(), Some("no such dataset"));
        assert_eq!(error_label(&json!({"value": {}})), None);
    }
}
