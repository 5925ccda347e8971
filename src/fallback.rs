//! Deterministic display-fallback blood type derivation.
//!
//! When no recorded blood type exists for a person, the UI still needs a
//! stable label. The derivation here hashes an identifier into a bucket and
//! walks a population frequency table, so the same identifier always shows
//! the same type across sessions. This is a display convenience only and
//! must never feed eligibility decisions.

use lazy_static::lazy_static;

use crate::types::{BloodType, DistributionEntry};

lazy_static! {
    /// Population frequency of each blood type, ordered most common first.
    /// The fallback derivation walks this table cumulatively, so both the
    /// order and the percentages are part of the determinism contract.
    pub static ref DISTRIBUTION: [DistributionEntry; 8] = {
        let entries = [
            DistributionEntry { blood_type: BloodType::OPositive, percentage: 35.0, color: "#ef4444" },
            DistributionEntry { blood_type: BloodType::APositive, percentage: 28.0, color: "#f97316" },
            DistributionEntry { blood_type: BloodType::BPositive, percentage: 20.0, color: "#eab308" },
            DistributionEntry { blood_type: BloodType::ABPositive, percentage: 8.0, color: "#22c55e" },
            DistributionEntry { blood_type: BloodType::ONegative, percentage: 5.0, color: "#3b82f6" },
            DistributionEntry { blood_type: BloodType::ANegative, percentage: 2.0, color: "#6366f1" },
            DistributionEntry { blood_type: BloodType::BNegative, percentage: 1.5, color: "#8b5cf6" },
            DistributionEntry { blood_type: BloodType::ABNegative, percentage: 0.5, color: "#ec4899" },
        ];

        let total: f64 = entries.iter().map(|e| e.percentage).sum();
        assert_eq!(total, 100.0, "blood type distribution must sum to 100");

        entries
    };
}

/// 32-bit signed hash over the identifier's UTF-16 code units.
///
/// The recurrence is `hash = hash * 31 + unit` under wrapping arithmetic,
/// kept bit-for-bit compatible with the legacy
/// `((hash << 5) - hash) + charCode` form so derived types stay stable
/// across implementations.
fn identifier_hash(identifier: &str) -> i32 {
    let mut hash: i32 = 0;
    for unit in identifier.encode_utf16() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit));
    }
    hash
}

/// Derive a stable pseudo-random blood type from an arbitrary identifier.
///
/// Empty input returns the first distribution entry (O+). Identical input
/// always yields identical output across runs.
pub fn derive_blood_type(identifier: &str) -> BloodType {
    if identifier.is_empty() {
        return DISTRIBUTION[0].blood_type;
    }

    // Widen before abs so i32::MIN cannot overflow
    let bucket = i64::from(identifier_hash(identifier)).abs() % 100;

    let mut cumulative = 0.0;
    for entry in DISTRIBUTION.iter() {
        cumulative += entry.percentage;
        if (bucket as f64) < cumulative {
            return entry.blood_type;
        }
    }

    DISTRIBUTION[0].blood_type
}

/// Display color for a blood type, taken from the distribution table.
/// Unknown types fall back to the first entry's color.
pub fn blood_type_color(blood_type: &str) -> &'static str {
    let parsed = BloodType::parse_lenient(blood_type);
    DISTRIBUTION
        .iter()
        .find(|entry| Some(entry.blood_type) == parsed)
        .map(|entry| entry.color)
        .unwrap_or(DISTRIBUTION[0].color)
}

/// Resolve a blood type from recorded candidates, falling back to
/// derivation from an identifier.
///
/// Candidates are tried in priority order; the first one that parses wins.
/// When nothing is recorded and no identifier is known, derivation runs
/// against a fixed placeholder so the result is still stable.
pub fn resolve_blood_type(recorded: &[&str], identifier: Option<&str>) -> BloodType {
    for candidate in recorded {
        if let Some(blood_type) = BloodType::parse_lenient(candidate) {
            return blood_type;
        }
    }

    derive_blood_type(identifier.unwrap_or("anonymous"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distribution_sums_to_100() {
        let total: f64 = DISTRIBUTION.iter().map(|e| e.percentage).sum();
        assert_eq!(total, 100.0);
    }

    #[test]
    fn test_distribution_covers_all_types() {
        for blood_type in BloodType::ALL {
            assert!(DISTRIBUTION.iter().any(|e| e.blood_type == blood_type));
        }
    }

    #[test]
    fn test_empty_identifier_defaults_to_first_entry() {
        assert_eq!(derive_blood_type(""), BloodType::OPositive);
    }

    #[test]
    fn test_derivation_is_stable() {
        for identifier in ["user-42", "donor@example.com", "アキラ", "x"] {
            assert_eq!(derive_blood_type(identifier), derive_blood_type(identifier));
        }
    }

    #[test]
    fn test_hash_matches_legacy_recurrence() {
        // "abc" -> ((0*31 + 97)*31 + 98)*31 + 99 = 96354
        assert_eq!(identifier_hash("abc"), 96354);
        assert_eq!(identifier_hash(""), 0);
        // Order matters, so the recurrence is not a plain character sum
        assert_ne!(identifier_hash("abc"), identifier_hash("cba"));
    }

    #[test]
    fn test_derived_type_tracks_hash_bucket() {
        // Bucket boundaries follow the cumulative percentages
        // 35, 63, 83, 91, 96, 98, 99.5, 100
        for identifier in ["a", "b", "session-9", "longer identifier string"] {
            let bucket = i64::from(identifier_hash(identifier)).abs() % 100;
            let expected = match bucket {
                0..=34 => BloodType::OPositive,
                35..=62 => BloodType::APositive,
                63..=82 => BloodType::BPositive,
                83..=90 => BloodType::ABPositive,
                91..=95 => BloodType::ONegative,
                96..=97 => BloodType::ANegative,
                _ => BloodType::BNegative,
            };
            assert_eq!(derive_blood_type(identifier), expected);
        }
    }

    #[test]
    fn test_color_lookup() {
        assert_eq!(blood_type_color("O+"), "#ef4444");
        assert_eq!(blood_type_color(" ab- "), "#ec4899");
        // Unknown types reuse the first entry's color
        assert_eq!(blood_type_color("XX"), "#ef4444");
    }

    #[test]
    fn test_resolution_prefers_recorded_values() {
        assert_eq!(
            resolve_blood_type(&["B-", "A+"], Some("user-1")),
            BloodType::BNegative
        );
        // Unparseable candidates are skipped
        assert_eq!(
            resolve_blood_type(&["unknown", "a+"], None),
            BloodType::APositive
        );
    }

    #[test]
    fn test_resolution_falls_back_to_derivation() {
        assert_eq!(
            resolve_blood_type(&[], Some("user-1")),
            derive_blood_type("user-1")
        );
        assert_eq!(
            resolve_blood_type(&["??"], None),
            derive_blood_type("anonymous")
        );
    }
}
