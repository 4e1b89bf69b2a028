use crate::models::Record;
use anyhow::{Context, Result, bail};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

/// Save records as CSV with header `Country,Year,Indicator,Value`.
pub fn save_csv<P: AsRef<Path>>(records: &[Record], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    for r in records {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save records as pretty JSON array.
pub fn save_json<P: AsRef<Path>>(records: &[Record], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(records)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    let mut rdr = ReaderBuilder::new().from_path(path)?;
    let mut out = Vec::new();
    for row in rdr.deserialize() {
        out.push(row.context("parse csv row")?);
    }
    Ok(out)
}

pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    let f = File::open(path)?;
    let records = serde_json::from_reader(BufReader::new(f)).context("parse json dataset")?;
    Ok(records)
}

/// Load a dataset, picking the format from the file extension (`.csv` or `.json`).
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        other => bail!("unsupported dataset format: {:?}", other),
    }
    .with_context(|| format!("load {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Indicator;
    use tempfile::tempdir;

    #[test]
    fn write_csv_and_json() {
        let dir = tempdir().unwrap();
        let csvp = dir.path().join("x.csv");
        let jsonp = dir.path().join("x.json");
        let recs = vec![Record::new("BE", 2020, Indicator::Sv, 81.2)];
        save_csv(&recs, &csvp).unwrap();
        save_json(&recs, &jsonp).unwrap();
        assert!(csvp.exists());
        assert!(jsonp.exists());
    }
}
