use eustat_viz::decode::{decode, decode_batch};
use eustat_viz::{DecodeError, Indicator, Record};
use serde_json::{Value, json};

fn be_fr_payload() -> Value {
    json!({
        "id": ["freq", "unit", "geo", "time"],
        "size": [1, 1, 2, 2],
        "dimension": {
            "geo": {"category": {
                "index": {"BE": 0, "FR": 1},
                "label": {"BE": "Belgium", "FR": "France"}
            }},
            "time": {"category": {"index": {"2020": 0, "2021": 1}}}
        },
        "value": {"0": 80.5, "1": 81.0, "3": 82.0}
    })
}

#[test]
fn sparse_table_yields_one_record_per_present_offset() {
    let recs = decode(&be_fr_payload(), Indicator::Sv).unwrap();
    assert_eq!(
        recs,
        vec![
            Record::new("BE", 2020, Indicator::Sv, 80.5),
            Record::new("BE", 2021, Indicator::Sv, 81.0),
            Record::new("FR", 2021, Indicator::Sv, 82.0),
        ]
    );
}

#[test]
fn every_record_reads_its_value_at_the_flat_offset() {
    let raw = be_fr_payload();
    let geo = &raw["dimension"]["geo"]["category"]["index"];
    let time = &raw["dimension"]["time"]["category"]["index"];
    let time_count = time.as_object().unwrap().len() as u64;

    for r in decode(&raw, Indicator::Sv).unwrap() {
        let g = geo[&r.country].as_u64().unwrap();
        let t = time[&r.year.to_string()].as_u64().unwrap();
        let offset = (g * time_count + t).to_string();
        assert_eq!(raw["value"][&offset].as_f64(), Some(r.value), "{r:?}");
    }
}

#[test]
fn re_flattening_decoded_records_restores_the_value_table() {
    let raw = be_fr_payload();
    let mut rebuilt = serde_json::Map::new();
    for r in decode(&raw, Indicator::Sv).unwrap() {
        let g = if r.country == "BE" { 0 } else { 1 };
        let t = (r.year - 2020) as usize;
        rebuilt.insert((g * 2 + t).to_string(), json!(r.value));
    }
    assert_eq!(Value::Object(rebuilt), raw["value"]);
}

#[test]
fn ordered_index_arrays_are_positions() {
    let raw = json!({
        "dimension": {
            "geo": {"category": {"index": ["FR", "BE"]}},
            "time": {"category": {"index": ["2019"]}}
        },
        "value": {"1": 11_000_000}
    });
    let recs = decode(&raw, Indicator::Pop).unwrap();
    assert_eq!(recs, vec![Record::new("BE", 2019, Indicator::Pop, 11_000_000.0)]);
}

#[test]
fn labels_travel_with_the_batch() {
    let batch = decode_batch(&be_fr_payload(), Indicator::Sv).unwrap();
    assert_eq!(batch.indicator, Indicator::Sv);
    assert_eq!(batch.country_labels.get("FR").map(String::as_str), Some("France"));
}

#[test]
fn empty_value_table_is_not_an_error() {
    let mut raw = be_fr_payload();
    raw["value"] = json!({});
    assert!(decode(&raw, Indicator::Pib).unwrap().is_empty());
}

#[test]
fn missing_dimension_is_malformed() {
    let raw = json!({"dimension": {"geo": {"category": {"index": {"BE": 0}}}}, "value": {}});
    let err = decode(&raw, Indicator::Sv).unwrap_err();
    assert!(matches!(err, DecodeError::Malformed(_)), "{err}");
}

#[test]
fn non_numeric_year_is_rejected() {
    let mut raw = be_fr_payload();
    raw["dimension"]["time"]["category"]["index"] = json!({"2020Q1": 0});
    let err = decode(&raw, Indicator::Sv).unwrap_err();
    assert!(matches!(err, DecodeError::InvalidYear(ref y) if y == "2020Q1"));
}

#[test]
fn non_integer_offset_key_is_rejected() {
    let mut raw = be_fr_payload();
    raw["value"] = json!({"x": 1.0});
    let err = decode(&raw, Indicator::Sv).unwrap_err();
    assert!(matches!(err, DecodeError::InvalidOffset(_)));
}

#[test]
fn time_before_geo_is_rejected() {
    let mut raw = be_fr_payload();
    raw["id"] = json!(["freq", "unit", "time", "geo"]);
    let err = decode(&raw, Indicator::Sv).unwrap_err();
    assert!(matches!(err, DecodeError::Malformed(_)));
}
