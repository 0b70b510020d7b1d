use super::HealthRecord;
use serde::{Deserialize, Serialize};

/// Renderer-agnostic chart description; the front end turns these into
/// actual plots.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    Line {
        title: String,
        x: Vec<String>,
        series: Vec<Series>,
    },
    Pie {
        title: String,
        slices: Vec<PieSlice>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PieSlice {
    pub label: String,
    pub count: u64,
}

impl ChartSpec {
    pub fn title(&self) -> &str {
        match self {
            Self::Line { title, .. } | Self::Pie { title, .. } => title,
        }
    }
}

/// The dashboard's chart set: three vital-sign trends, plus a symptom
/// frequency pie when a Symptom column was present.
pub fn build_charts(records: &[HealthRecord]) -> Vec<ChartSpec> {
    let x: Vec<String> = records
        .iter()
        .map(|r| r.date.map(|d| d.to_string()).unwrap_or_default())
        .collect();

    let trend = |title: &str, name: &str, select: fn(&HealthRecord) -> f64| ChartSpec::Line {
        title: title.to_string(),
        x: x.clone(),
        series: vec![Series {
            name: name.to_string(),
            values: records.iter().map(select).collect(),
        }],
    };

    let mut charts = vec![
        trend("Heart Rate Trend", "HeartRate", |r| r.heart_rate),
        ChartSpec::Line {
            title: "Blood Pressure Trend".to_string(),
            x: x.clone(),
            series: vec![
                Series {
                    name: "SystolicBP".to_string(),
                    values: records.iter().map(|r| r.systolic_bp).collect(),
                },
                Series {
                    name: "DiastolicBP".to_string(),
                    values: records.iter().map(|r| r.diastolic_bp).collect(),
                },
            ],
        },
        trend("Blood Glucose Trend", "BloodGlucose", |r| r.blood_glucose),
    ];

    if let Some(pie) = symptom_frequency(records) {
        charts.push(pie);
    }

    charts
}

fn symptom_frequency(records: &[HealthRecord]) -> Option<ChartSpec> {
    let mut slices: Vec<PieSlice> = Vec::new();
    for symptom in records.iter().filter_map(|r| r.symptom.as_deref()) {
        match slices.iter_mut().find(|s| s.label == symptom) {
            Some(slice) => slice.count += 1,
            None => slices.push(PieSlice {
                label: symptom.to_string(),
                count: 1,
            }),
        }
    }

    if slices.is_empty() {
        return None;
    }

    Some(ChartSpec::Pie {
        title: "Symptom Frequency".to_string(),
        slices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn record(day: u32, symptom: Option<&str>) -> HealthRecord {
        HealthRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, day),
            heart_rate: 70.0 + day as f64,
            systolic_bp: 120.0,
            diastolic_bp: 80.0,
            blood_glucose: 95.0,
            symptom: symptom.map(str::to_string),
        }
    }

    #[test]
    fn test_four_charts_with_symptom_column() {
        let records = vec![record(1, Some("Headache")), record(2, Some("Fatigue"))];
        let charts = build_charts(&records);

        assert_eq!(charts.len(), 4);
        assert_eq!(charts[0].title(), "Heart Rate Trend");
        assert_eq!(charts[1].title(), "Blood Pressure Trend");
        assert_eq!(charts[2].title(), "Blood Glucose Trend");
        assert_eq!(charts[3].title(), "Symptom Frequency");
    }

    #[test]
    fn test_pie_omitted_without_symptoms() {
        let records = vec![record(1, None), record(2, None)];
        let charts = build_charts(&records);

        assert_eq!(charts.len(), 3);
        assert!(charts.iter().all(|c| c.title() != "Symptom Frequency"));
    }

    #[test]
    fn test_blood_pressure_has_two_series() {
        let records = vec![record(1, None)];
        let charts = build_charts(&records);

        let ChartSpec::Line { series, .. } = &charts[1] else {
            panic!("expected line chart");
        };
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].name, "SystolicBP");
        assert_eq!(series[1].name, "DiastolicBP");
    }

    #[test]
    fn test_symptom_counts() {
        let records = vec![
            record(1, Some("Headache")),
            record(2, Some("Fatigue")),
            record(3, Some("Headache")),
        ];
        let charts = build_charts(&records);

        let ChartSpec::Pie { slices, .. } = &charts[3] else {
            panic!("expected pie chart");
        };
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].label, "Headache");
        assert_eq!(slices[0].count, 2);
        assert_eq!(slices[1].label, "Fatigue");
        assert_eq!(slices[1].count, 1);
    }

    #[test]
    fn test_x_axis_uses_iso_dates() {
        let records = vec![record(1, None), record(2, None)];
        let charts = build_charts(&records);

        let ChartSpec::Line { x, .. } = &charts[0] else {
            panic!("expected line chart");
        };
        assert_eq!(x, &vec!["2024-01-01".to_string(), "2024-01-02".to_string()]);
    }
}
