use eustat_viz::storage;
use eustat_viz::{Indicator, Record};
use std::fs;
use tempfile::tempdir;

fn sample() -> Vec<Record> {
    vec![
        Record::new("BE", 2020, Indicator::Sv, 80.8),
        Record::new("BE", 2020, Indicator::Pop, 11_522_440.0),
        Record::new("EL", 2019, Indicator::Pib, 17_520.5),
    ]
}

#[test]
fn csv_has_flat_header_and_loads_back() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.csv");
    storage::save_csv(&sample(), &path).unwrap();

    let txt = fs::read_to_string(&path).unwrap();
    assert!(txt.starts_with("Country,Year,Indicator,Value\n"));
    assert!(txt.contains("BE,2020,SV,80.8"));
    assert_eq!(txt.lines().count(), 1 + sample().len());

    assert_eq!(storage::load(&path).unwrap(), sample());
}

#[test]
fn json_is_an_array_of_records_and_loads_back() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.json");
    storage::save_json(&sample(), &path).unwrap();

    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(v[0]["Country"], "BE");
    assert_eq!(v[0]["Indicator"], "SV");

    assert_eq!(storage::load(&path).unwrap(), sample());
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.parquet");
    fs::write(&path, "x").unwrap();
    assert!(storage::load(&path).is_err());
}
