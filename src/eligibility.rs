use serde::{Deserialize, Serialize};

/// Vital signs captured during a pre-donation health check.
/// Fields are optional because screening forms are filled incrementally.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct VitalSigns {
    /// Systolic blood pressure (mmHg)
    pub systolic: Option<f64>,
    /// Diastolic blood pressure (mmHg)
    pub diastolic: Option<f64>,
    /// Heart rate (bpm)
    pub heart_rate: Option<f64>,
    /// Body temperature (°C)
    pub temperature: Option<f64>,
    /// Body weight (kg)
    pub weight: Option<f64>,
    /// Hemoglobin level (g/dL)
    pub hemoglobin: Option<f64>,
}

/// Outcome of a donor health screening
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ScreeningResult {
    Eligible,
    Ineligible,
    /// One or more vitals are missing, no verdict yet
    Incomplete,
}

/// Accepted range for a single vital sign
#[derive(Debug, Clone, Copy, Serialize)]
pub struct VitalRange {
    pub field: &'static str,
    pub min: f64,
    pub max: f64,
    pub unit: &'static str,
}

/// Reference ranges for donor screening
pub const VITAL_RANGES: [VitalRange; 6] = [
    VitalRange {
        field: "systolic pressure",
        min: 90.0,
        max: 180.0,
        unit: "mmHg",
    },
    VitalRange {
        field: "diastolic pressure",
        min: 50.0,
        max: 100.0,
        unit: "mmHg",
    },
    VitalRange {
        field: "heart rate",
        min: 50.0,
        max: 100.0,
        unit: "bpm",
    },
    VitalRange {
        field: "temperature",
        min: 36.0,
        max: 37.5,
        unit: "°C",
    },
    VitalRange {
        field: "weight",
        min: 45.0,
        max: 999.0,
        unit: "kg",
    },
    VitalRange {
        field: "hemoglobin",
        min: 12.0,
        max: 18.0,
        unit: "g/dL",
    },
];

impl VitalSigns {
    fn readings(&self) -> [Option<f64>; 6] {
        [
            self.systolic,
            self.diastolic,
            self.heart_rate,
            self.temperature,
            self.weight,
            self.hemoglobin,
        ]
    }

    /// Evaluate donation eligibility against the reference ranges.
    /// All vitals must be present for a verdict; diastolic pressure must
    /// additionally stay strictly below systolic.
    pub fn evaluate(&self) -> ScreeningResult {
        let readings = self.readings();
        if readings.iter().any(Option::is_none) {
            return ScreeningResult::Incomplete;
        }

        if !self.failed_checks().is_empty() {
            return ScreeningResult::Ineligible;
        }

        ScreeningResult::Eligible
    }

    /// Labels of vitals that are present but outside their accepted range
    pub fn failed_checks(&self) -> Vec<&'static str> {
        let mut failed = Vec::new();

        for (reading, range) in self.readings().iter().zip(VITAL_RANGES.iter()) {
            if let Some(value) = reading {
                if *value < range.min || *value > range.max {
                    failed.push(range.field);
                }
            }
        }

        if let (Some(systolic), Some(diastolic)) = (self.systolic, self.diastolic) {
            if diastolic >= systolic && !failed.contains(&"diastolic pressure") {
                failed.push("diastolic pressure");
            }
        }

        failed
    }
}
