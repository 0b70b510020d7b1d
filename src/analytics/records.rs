use crate::{Error, Result};
use calamine::{Data, Reader};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use tracing::{debug, info};

/// One row of uploaded vital-sign data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthRecord {
    pub date: Option<NaiveDate>,
    pub heart_rate: f64,
    pub systolic_bp: f64,
    pub diastolic_bp: f64,
    pub blood_glucose: f64,
    pub symptom: Option<String>,
}

/// First date of the synthesized daily sequence when the upload has no
/// "Date" column.
pub fn synthetic_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

/// Parses an uploaded CSV or Excel file into records. Rows without a date
/// column get a synthesized daily sequence starting 2024-01-01.
pub fn ingest(file_name: &str, bytes: &[u8]) -> Result<Vec<HealthRecord>> {
    let mut records = if file_name.to_ascii_lowercase().ends_with(".csv") {
        parse_csv(bytes)?
    } else {
        parse_workbook(bytes)?
    };

    if records.is_empty() {
        return Err(Error::upload("file contained no data rows"));
    }

    fill_missing_dates(&mut records);

    info!("Ingested {} records from {}", records.len(), file_name);
    Ok(records)
}

fn fill_missing_dates(records: &mut [HealthRecord]) {
    if records.iter().any(|r| r.date.is_some()) {
        return;
    }

    debug!("No Date column found, synthesizing daily sequence");
    let start = synthetic_start_date();
    for (i, record) in records.iter_mut().enumerate() {
        record.date = start.checked_add_days(Days::new(i as u64));
    }
}

fn parse_csv(bytes: &[u8]) -> Result<Vec<HealthRecord>> {
    let mut reader = csv::Reader::from_reader(bytes);
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let map = ColumnMap::from_headers(&headers)?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let fields: Vec<&str> = row.iter().collect();
        records.push(map.record_from_fields(&fields)?);
    }

    Ok(records)
}

fn parse_workbook(bytes: &[u8]) -> Result<Vec<HealthRecord>> {
    let cursor = Cursor::new(bytes.to_vec());
    let mut workbook = calamine::open_workbook_auto_from_rs(cursor)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| Error::upload("workbook has no sheets"))??;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .ok_or_else(|| Error::upload("workbook sheet is empty"))?
        .iter()
        .map(cell_to_string)
        .collect();
    let map = ColumnMap::from_headers(&headers)?;

    let mut records = Vec::new();
    for row in rows {
        let fields: Vec<String> = row.iter().map(cell_to_string).collect();
        let fields: Vec<&str> = fields.iter().map(String::as_str).collect();
        records.push(map.record_from_fields(&fields)?);
    }

    Ok(records)
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.date().to_string())
            .unwrap_or_default(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(_) | Data::Empty => String::new(),
    }
}

/// Header positions for the original spreadsheet layout. "Date" and
/// "Symptom" are optional, the four vitals are required.
struct ColumnMap {
    date: Option<usize>,
    heart_rate: usize,
    systolic_bp: usize,
    diastolic_bp: usize,
    blood_glucose: usize,
    symptom: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &[String]) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let require = |name: &str| find(name).ok_or_else(|| Error::missing_column(name));

        Ok(Self {
            date: find("Date"),
            heart_rate: require("HeartRate")?,
            systolic_bp: require("SystolicBP")?,
            diastolic_bp: require("DiastolicBP")?,
            blood_glucose: require("BloodGlucose")?,
            symptom: find("Symptom"),
        })
    }

    fn record_from_fields(&self, fields: &[&str]) -> Result<HealthRecord> {
        let field = |idx: usize| fields.get(idx).map(|s| s.trim()).unwrap_or("");

        let date = match self.date.map(field) {
            None | Some("") => None,
            Some(raw) => Some(parse_date(raw)?),
        };
        let symptom = self
            .symptom
            .map(field)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(HealthRecord {
            date,
            heart_rate: parse_metric("HeartRate", field(self.heart_rate))?,
            systolic_bp: parse_metric("SystolicBP", field(self.systolic_bp))?,
            diastolic_bp: parse_metric("DiastolicBP", field(self.diastolic_bp))?,
            blood_glucose: parse_metric("BloodGlucose", field(self.blood_glucose))?,
            symptom,
        })
    }
}

fn parse_metric(name: &str, raw: &str) -> Result<f64> {
    raw.parse()
        .map_err(|_| Error::upload(format!("invalid {name} value: {raw:?}")))
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| Error::upload(format!("invalid Date value: {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FULL_CSV: &str = "\
Date,HeartRate,SystolicBP,DiastolicBP,BloodGlucose,Symptom
2024-03-01,72,120,80,95,Headache
2024-03-02,75,122,82,100,Fatigue
2024-03-03,71,118,79,92,Headache
";

    #[test]
    fn test_ingest_full_csv() {
        let records = ingest("vitals.csv", FULL_CSV.as_bytes()).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(
            records[0].date,
            Some(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
        );
        assert_eq!(records[0].heart_rate, 72.0);
        assert_eq!(records[1].blood_glucose, 100.0);
        assert_eq!(records[2].symptom.as_deref(), Some("Headache"));
    }

    #[test]
    fn test_missing_date_column_synthesizes_daily_sequence() {
        let csv = "\
HeartRate,SystolicBP,DiastolicBP,BloodGlucose
70,118,78,90
72,120,80,95
74,121,81,97
";
        let records = ingest("vitals.csv", csv.as_bytes()).unwrap();

        assert_eq!(records.len(), 3);
        let expected_start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        for (i, record) in records.iter().enumerate() {
            assert_eq!(
                record.date,
                expected_start.checked_add_days(Days::new(i as u64))
            );
        }
    }

    #[test]
    fn test_missing_symptom_column_yields_none() {
        let csv = "\
Date,HeartRate,SystolicBP,DiastolicBP,BloodGlucose
2024-03-01,72,120,80,95
";
        let records = ingest("vitals.csv", csv.as_bytes()).unwrap();
        assert_eq!(records[0].symptom, None);
    }

    #[test]
    fn test_missing_required_column_errors() {
        let csv = "\
Date,SystolicBP,DiastolicBP,BloodGlucose
2024-03-01,120,80,95
";
        let err = ingest("vitals.csv", csv.as_bytes()).unwrap_err();
        assert_eq!(err.to_string(), "Missing column: HeartRate");
    }

    #[test]
    fn test_empty_file_errors() {
        let csv = "Date,HeartRate,SystolicBP,DiastolicBP,BloodGlucose\n";
        let err = ingest("vitals.csv", csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("no data rows"));
    }

    #[test]
    fn test_invalid_metric_value_errors() {
        let csv = "\
HeartRate,SystolicBP,DiastolicBP,BloodGlucose
not-a-number,120,80,95
";
        let err = ingest("vitals.csv", csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("invalid HeartRate value"));
    }
}
