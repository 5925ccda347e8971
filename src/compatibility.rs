use serde::{Deserialize, Serialize};

use crate::types::BloodType;

/// Recipient order used when deriving the donor-side view of the table
const RECIPIENT_ORDER: [BloodType; 8] = [
    BloodType::APositive,
    BloodType::ANegative,
    BloodType::BPositive,
    BloodType::BNegative,
    BloodType::ABPositive,
    BloodType::ABNegative,
    BloodType::OPositive,
    BloodType::ONegative,
];

/// Red blood cell compatibility: which donor types a recipient may receive
/// from. Entry order is fixed so query results are reproducible.
fn receives_from(recipient: BloodType) -> &'static [BloodType] {
    use BloodType::*;
    match recipient {
        APositive => &[APositive, ANegative, OPositive, ONegative],
        ANegative => &[ANegative, ONegative],
        BPositive => &[BPositive, BNegative, OPositive, ONegative],
        BNegative => &[BNegative, ONegative],
        // Universal recipient
        ABPositive => &[
            ABPositive, ABNegative, APositive, ANegative, BPositive, BNegative, OPositive,
            ONegative,
        ],
        ABNegative => &[ABNegative, ANegative, BNegative, ONegative],
        OPositive => &[OPositive, ONegative],
        // Receives only from itself
        ONegative => &[ONegative],
    }
}

/// Donor types compatible with the given recipient type.
///
/// Input is normalized (trim + uppercase) before lookup; an unrecognized
/// blood type yields an empty slice rather than an error.
pub fn compatible_donors(recipient: &str) -> &'static [BloodType] {
    match BloodType::parse_lenient(recipient) {
        Some(blood_type) => receives_from(blood_type),
        None => &[],
    }
}

/// Recipient types the given donor type may give to, derived as the inverse
/// of the recipient-keyed table.
pub fn compatible_recipients(donor: &str) -> Vec<BloodType> {
    let Some(donor_type) = BloodType::parse_lenient(donor) else {
        return Vec::new();
    };

    RECIPIENT_ORDER
        .iter()
        .copied()
        .filter(|recipient| receives_from(*recipient).contains(&donor_type))
        .collect()
}

/// Whether the donor type may give red cells to the recipient type
pub fn can_donate(donor: &str, recipient: &str) -> bool {
    match BloodType::parse_lenient(donor) {
        Some(donor_type) => compatible_donors(recipient).contains(&donor_type),
        None => false,
    }
}

/// Per-recipient compatibility summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompatibilityInfo {
    pub compatible_donors: Vec<BloodType>,
    pub description: String,
    pub is_universal_recipient: bool,
    pub has_universal_donor: bool,
    pub donor_count: usize,
}

/// Build a compatibility summary for a recipient blood type.
///
/// Unknown input produces an empty donor set with a "no data" description.
pub fn compatibility_info(recipient: &str) -> CompatibilityInfo {
    let recipient_type = BloodType::parse_lenient(recipient);
    let donors: Vec<BloodType> = match recipient_type {
        Some(blood_type) => receives_from(blood_type).to_vec(),
        None => Vec::new(),
    };

    let description = match recipient_type {
        Some(BloodType::ABPositive) => "Can receive blood from all blood types".to_string(),
        Some(BloodType::ONegative) => "Can only receive blood from O-".to_string(),
        Some(_) => format!("Can receive blood from {} blood types", donors.len()),
        None => "No compatibility data available".to_string(),
    };

    // Computed from the donor set rather than assumed, so the summary stays
    // correct if the table ever grows beyond ABO/Rh.
    let has_universal_donor = donors.contains(&BloodType::ONegative);

    CompatibilityInfo {
        donor_count: donors.len(),
        is_universal_recipient: matches!(recipient_type, Some(BloodType::ABPositive)),
        has_universal_donor,
        description,
        compatible_donors: donors,
    }
}

/// One row of the full compatibility report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompatibilityRecord {
    pub blood_type: BloodType,
    pub receives_from: Vec<BloodType>,
    pub donates_to: Vec<BloodType>,
    pub summary: CompatibilityInfo,
}

/// Full compatibility report covering all eight blood types
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompatibilityReport {
    pub records: Vec<CompatibilityRecord>,
}

impl CompatibilityReport {
    pub fn build() -> Self {
        let records = BloodType::ALL
            .iter()
            .map(|blood_type| CompatibilityRecord {
                blood_type: *blood_type,
                receives_from: receives_from(*blood_type).to_vec(),
                donates_to: compatible_recipients(blood_type.as_str()),
                summary: compatibility_info(blood_type.as_str()),
            })
            .collect();

        Self { records }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_type_receives_from_itself() {
        for blood_type in BloodType::ALL {
            assert!(
                compatible_donors(blood_type.as_str()).contains(&blood_type),
                "{blood_type} should accept its own type"
            );
        }
    }

    #[test]
    fn test_o_negative_donates_to_everyone() {
        for blood_type in BloodType::ALL {
            assert!(compatible_donors(blood_type.as_str()).contains(&BloodType::ONegative));
        }
        assert_eq!(compatible_recipients("O-").len(), 8);
    }

    #[test]
    fn test_ab_positive_receives_from_everyone() {
        let donors = compatible_donors("AB+");
        assert_eq!(donors.len(), 8);
        for blood_type in BloodType::ALL {
            assert!(donors.contains(&blood_type));
        }
    }

    #[test]
    fn test_o_negative_receives_only_from_itself() {
        assert_eq!(compatible_donors("O-").to_vec(), vec![BloodType::ONegative]);
    }

    #[test]
    fn test_donor_view_is_inverse_of_recipient_view() {
        for donor in BloodType::ALL {
            for recipient in BloodType::ALL {
                let via_recipient = compatible_donors(recipient.as_str()).contains(&donor);
                let via_donor = compatible_recipients(donor.as_str()).contains(&recipient);
                assert_eq!(
                    via_recipient, via_donor,
                    "{donor} -> {recipient} disagrees between table directions"
                );
            }
        }
    }

    #[test]
    fn test_pairwise_check_matches_table() {
        for donor in BloodType::ALL {
            for recipient in BloodType::ALL {
                assert_eq!(
                    can_donate(donor.as_str(), recipient.as_str()),
                    compatible_donors(recipient.as_str()).contains(&donor)
                );
            }
        }
    }

    #[test]
    fn test_rh_negative_never_receives_rh_positive() {
        for recipient in BloodType::ALL.iter().filter(|t| !t.is_rh_positive()) {
            for donor in compatible_donors(recipient.as_str()) {
                assert!(!donor.is_rh_positive());
            }
        }
    }

    #[test]
    fn test_lookup_normalizes_input() {
        assert_eq!(compatible_donors(" a+ "), compatible_donors("A+"));
        assert_eq!(compatible_donors("ab+"), compatible_donors("AB+"));
    }

    #[test]
    fn test_unknown_input_is_safe() {
        assert!(compatible_donors("XX").is_empty());
        assert!(compatible_recipients("").is_empty());
        assert!(!can_donate("XX", "A+"));
        assert!(!can_donate("A+", "XX"));
    }

    #[test]
    fn test_summary_for_universal_recipient() {
        let info = compatibility_info("AB+");
        assert!(info.is_universal_recipient);
        assert!(info.has_universal_donor);
        assert_eq!(info.donor_count, 8);
        assert_eq!(info.description, "Can receive blood from all blood types");
    }

    #[test]
    fn test_summary_for_universal_donor() {
        let info = compatibility_info("O-");
        assert!(!info.is_universal_recipient);
        assert!(info.has_universal_donor);
        assert_eq!(info.donor_count, 1);
        assert_eq!(info.description, "Can only receive blood from O-");
    }

    #[test]
    fn test_summary_for_generic_type() {
        let info = compatibility_info("A+");
        assert_eq!(info.donor_count, 4);
        assert_eq!(info.description, "Can receive blood from 4 blood types");
    }

    #[test]
    fn test_summary_for_unknown_type() {
        let info = compatibility_info("not a blood type");
        assert!(info.compatible_donors.is_empty());
        assert_eq!(info.donor_count, 0);
        assert!(!info.is_universal_recipient);
        assert!(!info.has_universal_donor);
        assert_eq!(info.description, "No compatibility data available");
    }

    #[test]
    fn test_report_covers_all_types() {
        let report = CompatibilityReport::build();
        assert_eq!(report.records.len(), 8);
        for record in &report.records {
            assert!(record.receives_from.contains(&record.blood_type));
            assert!(record.donates_to.contains(&record.blood_type));
        }
    }
}
