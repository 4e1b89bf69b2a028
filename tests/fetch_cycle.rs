use eustat_viz::api::{DataSource, Query, fetch_cycle};
use eustat_viz::{DatasetStore, Error, Indicator, Record};
use serde_json::{Value, json};
use std::cell::RefCell;

fn payload(value: f64) -> Value {
    json!({
        "dimension": {
            "geo": {"category": {"index": {"BE": 0}, "label": {"BE": "Belgium"}}},
            "time": {"category": {"index": {"2020": 0}}}
        },
        "value": {"0": value}
    })
}

/// Canned source: answers per indicator, records every query it sees.
struct FakeSource {
    fail_on: Option<Indicator>,
    garbage_on: Option<Indicator>,
    seen: RefCell<Vec<Query>>,
}

impl FakeSource {
    fn ok() -> Self {
        Self {
            fail_on: None,
            garbage_on: None,
            seen: RefCell::new(Vec::new()),
        }
    }
}

impl DataSource for FakeSource {
    fn fetch(&self, query: &Query) -> eustat_viz::error::Result<Value> {
        self.seen.borrow_mut().push(query.clone());
        if self.fail_on == Some(query.indicator) {
            return Err(Error::Fetch {
                indicator: query.indicator,
                message: "HTTP 503".into(),
            });
        }
        if self.garbage_on == Some(query.indicator) {
            return Ok(json!({"value": "nope"}));
        }
        let v = match query.indicator {
            Indicator::Sv => 81.0,
            Indicator::Pop => 11_500_000.0,
            Indicator::Pib => 36_000.0,
        };
        Ok(payload(v))
    }
}

#[test]
fn cycle_fetches_all_indicators_in_order() {
    let source = FakeSource::ok();
    let mut store = DatasetStore::new();
    let n = fetch_cycle(&source, &mut store, &[2020, 2019]).unwrap();
    assert_eq!(n, 3);

    let order: Vec<Indicator> = source.seen.borrow().iter().map(|q| q.indicator).collect();
    assert_eq!(order, [Indicator::Sv, Indicator::Pop, Indicator::Pib]);
    let q = &source.seen.borrow()[0];
    assert_eq!(q.countries.len(), 27);
    assert_eq!(q.years, [2020, 2019]);

    assert_eq!(
        store.records(),
        [
            Record::new("BE", 2020, Indicator::Sv, 81.0),
            Record::new("BE", 2020, Indicator::Pop, 11_500_000.0),
            Record::new("BE", 2020, Indicator::Pib, 36_000.0),
        ]
    );
    assert_eq!(store.country_label("BE"), "Belgium");
}

#[test]
fn second_cycle_replaces_instead_of_accumulating() {
    let source = FakeSource::ok();
    let mut store = DatasetStore::new();
    fetch_cycle(&source, &mut store, &[2020]).unwrap();
    fetch_cycle(&source, &mut store, &[2020]).unwrap();
    assert_eq!(store.len(), 3);
}

#[test]
fn failed_fetch_leaves_previous_dataset_intact() {
    let mut store = DatasetStore::from_records(vec![Record::new("FR", 2018, Indicator::Sv, 82.7)]);
    let source = FakeSource {
        fail_on: Some(Indicator::Pop),
        ..FakeSource::ok()
    };
    let err = fetch_cycle(&source, &mut store, &[2020]).unwrap_err();
    assert!(matches!(err, Error::Fetch { indicator: Indicator::Pop, .. }));
    // PIB is never requested once POP failed
    assert_eq!(source.seen.borrow().len(), 2);
    assert_eq!(store.records(), [Record::new("FR", 2018, Indicator::Sv, 82.7)]);
}

#[test]
fn malformed_payload_aborts_with_decode_error() {
    let mut store = DatasetStore::new();
    let source = FakeSource {
        garbage_on: Some(Indicator::Pib),
        ..FakeSource::ok()
    };
    let err = fetch_cycle(&source, &mut store, &[2020]).unwrap_err();
    assert!(matches!(err, Error::Decode { indicator: Indicator::Pib, .. }), "{err}");
    assert!(store.is_empty());
}
