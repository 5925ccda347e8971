//! # Blood Compatibility Toolkit
//!
//! A small pure-function library (plus CLI) for blood-donation coordination:
//! ABO/Rh red cell compatibility resolution, donor health screening, and a
//! deterministic display-fallback blood type derivation.
//!
//! ## Features
//!
//! - Static recipient-keyed compatibility table over the eight ABO/Rh types
//! - Donor-side and recipient-side queries plus pairwise checks
//! - Human-readable compatibility summaries (universal donor/recipient flags)
//! - Stable identifier-based fallback derivation for display purposes
//! - Donor vital-sign screening against reference ranges
//! - Report output in text, CSV and JSON formats

pub mod compatibility;
pub mod eligibility;
pub mod fallback;
pub mod output;
pub mod types;

// Re-export key types
pub use compatibility::{
    can_donate, compatibility_info, compatible_donors, compatible_recipients, CompatibilityInfo,
    CompatibilityReport,
};
pub use eligibility::{ScreeningResult, VitalSigns, VITAL_RANGES};
pub use fallback::{blood_type_color, derive_blood_type, resolve_blood_type, DISTRIBUTION};
pub use output::{ReportFormat, ReportGenerator};
pub use types::{BloodType, DistributionEntry, ParseBloodTypeError};
