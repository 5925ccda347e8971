use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// ABO/Rh blood type for red blood cell donation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum BloodType {
    #[serde(rename = "O+")]
    #[value(name = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    #[value(name = "O-")]
    ONegative,
    #[serde(rename = "A+")]
    #[value(name = "A+")]
    APositive,
    #[serde(rename = "A-")]
    #[value(name = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    #[value(name = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    #[value(name = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    #[value(name = "AB+")]
    ABPositive,
    #[serde(rename = "AB-")]
    #[value(name = "AB-")]
    ABNegative,
}

impl BloodType {
    /// All eight blood types in canonical enumeration order
    pub const ALL: [BloodType; 8] = [
        BloodType::OPositive,
        BloodType::ONegative,
        BloodType::APositive,
        BloodType::ANegative,
        BloodType::BPositive,
        BloodType::BNegative,
        BloodType::ABPositive,
        BloodType::ABNegative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BloodType::OPositive => "O+",
            BloodType::ONegative => "O-",
            BloodType::APositive => "A+",
            BloodType::ANegative => "A-",
            BloodType::BPositive => "B+",
            BloodType::BNegative => "B-",
            BloodType::ABPositive => "AB+",
            BloodType::ABNegative => "AB-",
        }
    }

    /// Parse a blood type, tolerating surrounding whitespace and case
    /// variation. Unknown input yields `None` rather than an error.
    pub fn parse_lenient(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "O+" => Some(BloodType::OPositive),
            "O-" => Some(BloodType::ONegative),
            "A+" => Some(BloodType::APositive),
            "A-" => Some(BloodType::ANegative),
            "B+" => Some(BloodType::BPositive),
            "B-" => Some(BloodType::BNegative),
            "AB+" => Some(BloodType::ABPositive),
            "AB-" => Some(BloodType::ABNegative),
            _ => None,
        }
    }

    pub fn is_rh_positive(&self) -> bool {
        matches!(
            self,
            BloodType::OPositive
                | BloodType::APositive
                | BloodType::BPositive
                | BloodType::ABPositive
        )
    }

    /// O- red cells can be given to any recipient
    pub fn is_universal_donor(&self) -> bool {
        matches!(self, BloodType::ONegative)
    }

    /// AB+ recipients can accept red cells from any donor
    pub fn is_universal_recipient(&self) -> bool {
        matches!(self, BloodType::ABPositive)
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for strict blood type parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized blood type: {0:?}")]
pub struct ParseBloodTypeError(pub String);

impl FromStr for BloodType {
    type Err = ParseBloodTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BloodType::parse_lenient(s).ok_or_else(|| ParseBloodTypeError(s.to_string()))
    }
}

/// One entry of the population frequency table used for fallback derivation
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DistributionEntry {
    pub blood_type: BloodType,
    pub percentage: f64,
    pub color: &'static str,
}
