//! CSV loader for the reference tables
//!
//! Reads `pole_resistance.csv` and `dj_mid_chart.csv` from a reference
//! directory. Files exported from Japanese spreadsheet tools are often
//! CP932 (Shift-JIS); UTF-8 is tried first, then CP932.

use std::borrow::Cow;
use std::path::PathBuf;

use encoding_rs::SHIFT_JIS;
use tracing::{debug, warn};

use vaultcoach_domain::model::{MidMarkRow, PoleResistanceRow};
use vaultcoach_domain::repository::ReferenceDataRepository;
use vaultcoach_types::{Error, Result};

pub const POLE_RESISTANCE_FILE: &str = "pole_resistance.csv";
pub const MID_MARK_CHART_FILE: &str = "dj_mid_chart.csv";

const POLE_COLUMNS: [&str; 3] = ["Length_ft", "Weight_lbs", "ResistanceIndex"];
const MID_MARK_COLUMNS: [&str; 3] = ["Grip_cm", "Takeoff_cm", "Mid_mark_m"];

/// Reference tables stored as CSV files in one directory
#[derive(Debug, Clone)]
pub struct CsvReferenceRepository {
    dir: PathBuf,
}

impl CsvReferenceRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `./data/reference` relative to the working directory
    pub fn default_dir() -> PathBuf {
        PathBuf::from("data").join("reference")
    }

    fn load_rows<T>(&self, file: &str, columns: [&str; 3], build: fn([f64; 3]) -> T) -> Result<Vec<T>> {
        let path = self.dir.join(file);
        debug!(path = %path.display(), "loading reference table");

        let bytes = std::fs::read(&path).map_err(|e| {
            warn!(path = %path.display(), error = %e, "reference table unreadable");
            Error::reference_unavailable(file, format!("{}: {}", path.display(), e))
        })?;
        let text = decode(&bytes);

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| Error::reference_unavailable(file, format!("invalid header: {}", e)))?
            .clone();
        let indices = column_indices(&headers, columns)
            .map_err(|missing| Error::reference_unavailable(file, format!("missing column: {}", missing)))?;

        let mut rows = Vec::new();
        for (row_idx, record) in reader.records().enumerate() {
            let record = record.map_err(|e| Error::reference_unavailable(file, e.to_string()))?;
            // +2: header is line 1
            let line = row_idx + 2;
            match parse_numbers(&record, indices) {
                Some(values) => rows.push(build(values)),
                None => debug!(file, line, ?record, "dropping non-numeric row"),
            }
        }

        debug!(file, rows = rows.len(), "reference table loaded");
        Ok(rows)
    }
}

impl ReferenceDataRepository for CsvReferenceRepository {
    fn load_pole_resistance(&self) -> Result<Vec<PoleResistanceRow>> {
        self.load_rows(POLE_RESISTANCE_FILE, POLE_COLUMNS, |[length_ft, weight_lbs, resistance_index]| {
            PoleResistanceRow {
                length_ft,
                weight_lbs,
                resistance_index,
            }
        })
    }

    fn load_mid_mark_chart(&self) -> Result<Vec<MidMarkRow>> {
        self.load_rows(MID_MARK_CHART_FILE, MID_MARK_COLUMNS, |[grip_cm, takeoff_cm, mid_mark_m]| {
            MidMarkRow {
                grip_cm,
                takeoff_cm,
                mid_mark_m,
            }
        })
    }
}

fn decode(bytes: &[u8]) -> Cow<'_, str> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(s) => Cow::Borrowed(s),
        Err(_) => {
            let (decoded, _, had_errors) = SHIFT_JIS.decode(bytes);
            if had_errors {
                warn!("some characters could not be decoded from CP932");
            }
            decoded
        }
    }
}

/// Header positions of the wanted columns (case-insensitive)
fn column_indices<'a>(headers: &csv::StringRecord, columns: [&'a str; 3]) -> std::result::Result<[usize; 3], &'a str> {
    let mut indices = [0usize; 3];
    for (slot, name) in indices.iter_mut().zip(columns) {
        *slot = headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or(name)?;
    }
    Ok(indices)
}

fn parse_numbers(record: &csv::StringRecord, indices: [usize; 3]) -> Option<[f64; 3]> {
    let mut values = [0.0; 3];
    for (value, idx) in values.iter_mut().zip(indices) {
        let parsed: f64 = record.get(idx)?.parse().ok()?;
        if !parsed.is_finite() {
            return None;
        }
        *value = parsed;
    }
    Some(values)
}
