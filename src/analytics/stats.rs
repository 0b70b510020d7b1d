use super::HealthRecord;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MetricSummary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VitalsSummary {
    pub heart_rate: MetricSummary,
    pub systolic_bp: MetricSummary,
    pub diastolic_bp: MetricSummary,
    pub blood_glucose: MetricSummary,
}

pub fn summarize(records: &[HealthRecord]) -> VitalsSummary {
    let column = |select: fn(&HealthRecord) -> f64| {
        summarize_column(&records.iter().map(select).collect::<Vec<_>>())
    };

    VitalsSummary {
        heart_rate: column(|r| r.heart_rate),
        systolic_bp: column(|r| r.systolic_bp),
        diastolic_bp: column(|r| r.diastolic_bp),
        blood_glucose: column(|r| r.blood_glucose),
    }
}

/// Sample standard deviation (n - 1 denominator), zero for fewer than two
/// values.
fn summarize_column(values: &[f64]) -> MetricSummary {
    let count = values.len();
    if count == 0 {
        return MetricSummary {
            count: 0,
            mean: 0.0,
            std: 0.0,
            min: 0.0,
            max: 0.0,
        };
    }

    let mean = values.iter().sum::<f64>() / count as f64;
    let std = if count > 1 {
        let variance =
            values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count as f64 - 1.0);
        variance.sqrt()
    } else {
        0.0
    };

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    MetricSummary {
        count,
        mean,
        std,
        min,
        max,
    }
}

impl VitalsSummary {
    /// Plain-text statistics table embedded in the insights prompt.
    pub fn describe(&self) -> String {
        let mut table = String::from("Metric | Count | Mean | Std | Min | Max\n");
        for (name, metric) in [
            ("HeartRate", &self.heart_rate),
            ("SystolicBP", &self.systolic_bp),
            ("DiastolicBP", &self.diastolic_bp),
            ("BloodGlucose", &self.blood_glucose),
        ] {
            let _ = writeln!(
                table,
                "{} | {} | {:.2} | {:.2} | {:.2} | {:.2}",
                name, metric.count, metric.mean, metric.std, metric.min, metric.max
            );
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(heart_rate: f64, glucose: f64) -> HealthRecord {
        HealthRecord {
            date: None,
            heart_rate,
            systolic_bp: 120.0,
            diastolic_bp: 80.0,
            blood_glucose: glucose,
            symptom: None,
        }
    }

    #[test]
    fn test_mean_and_sample_std() {
        let records = vec![record(70.0, 90.0), record(72.0, 95.0), record(74.0, 100.0)];
        let summary = summarize(&records);

        assert_eq!(summary.heart_rate.count, 3);
        assert!((summary.heart_rate.mean - 72.0).abs() < 1e-9);
        // sample std of [70, 72, 74] = 2.0
        assert!((summary.heart_rate.std - 2.0).abs() < 1e-9);
        assert!((summary.blood_glucose.mean - 95.0).abs() < 1e-9);
        assert!((summary.blood_glucose.std - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_min_max() {
        let records = vec![record(68.0, 85.0), record(90.0, 140.0)];
        let summary = summarize(&records);

        assert_eq!(summary.heart_rate.min, 68.0);
        assert_eq!(summary.heart_rate.max, 90.0);
        assert_eq!(summary.blood_glucose.min, 85.0);
        assert_eq!(summary.blood_glucose.max, 140.0);
    }

    #[test]
    fn test_single_value_has_zero_std() {
        let records = vec![record(72.0, 95.0)];
        let summary = summarize(&records);

        assert_eq!(summary.heart_rate.std, 0.0);
        assert_eq!(summary.heart_rate.mean, 72.0);
    }

    #[test]
    fn test_empty_records_are_all_zero() {
        let summary = summarize(&[]);
        assert_eq!(summary.heart_rate.count, 0);
        assert_eq!(summary.heart_rate.mean, 0.0);
        assert_eq!(summary.heart_rate.min, 0.0);
    }

    #[test]
    fn test_describe_lists_every_metric() {
        let records = vec![record(70.0, 90.0), record(74.0, 100.0)];
        let table = summarize(&records).describe();

        for name in ["HeartRate", "SystolicBP", "DiastolicBP", "BloodGlucose"] {
            assert!(table.contains(name), "missing {name} in:\n{table}");
        }
        assert!(table.contains("72.00"));
    }
}
