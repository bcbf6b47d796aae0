//! Pure field validation: each rule is evaluated independently and failing
//! fields map to short human-readable messages.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::draft::{Field, FieldErrors, ReimbursementDraft};

/// Smallest amount the treasury reimburses, in whole Rupiah.
pub const MIN_AMOUNT_RUPIAH: u64 = 1000;

/// Storage format of the expense date field.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

fn whatsapp_number_is_valid(number: &str) -> bool {
    static WHATSAPP_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = WHATSAPP_REGEX.get_or_init(|| {
        // Indonesian mobile numbers: "08" followed by 8 to 11 more digits.
        Regex::new(r"^08\d{8,11}$").unwrap()
    });
    regex.is_match(number)
}

/// A stored amount counts as missing when it is empty or zero-valued.
/// Zero deliberately classifies as "required" rather than "below minimum";
/// see DESIGN.md.
fn amount_is_missing(raw: &str) -> bool {
    raw.bytes().all(|b| b == b'0')
}

fn amount_below_minimum(raw: &str) -> bool {
    let significant = raw.trim_start_matches('0');
    match significant.parse::<u64>() {
        Ok(value) => value < MIN_AMOUNT_RUPIAH,
        // Digit strings too long for u64 are far above the minimum.
        Err(_) => false,
    }
}

/// Numeric value of a stored digit string, saturating on overflow.
pub fn parse_amount(raw: &str) -> u64 {
    let significant = raw.trim_start_matches('0');
    if significant.is_empty() {
        return 0;
    }
    significant.parse().unwrap_or(u64::MAX)
}

/// Validates the whole draft. Rules never short-circuit across fields: the
/// returned map holds exactly one entry per failing field and nothing else.
pub fn validate(draft: &ReimbursementDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if draft.full_name.trim().is_empty() {
        errors.insert(Field::FullName, "Full name is required");
    }

    if draft.whatsapp_number.trim().is_empty() {
        errors.insert(Field::WhatsappNumber, "WhatsApp number is required");
    } else if !whatsapp_number_is_valid(&draft.whatsapp_number) {
        errors.insert(
            Field::WhatsappNumber,
            "WhatsApp number format is invalid (example: 08123456789)",
        );
    }

    if draft.purpose.trim().is_empty() {
        errors.insert(Field::Purpose, "Expense purpose is required");
    }

    if amount_is_missing(&draft.amount_raw) {
        errors.insert(Field::Amount, "Reimbursement amount is required");
    } else if amount_below_minimum(&draft.amount_raw) {
        errors.insert(Field::Amount, "Minimum reimbursement amount is Rp 1.000");
    }

    if draft.proof.is_none() {
        errors.insert(Field::Proof, "Proof of expense must be uploaded");
    }

    if draft.expense_date.trim().is_empty() {
        errors.insert(Field::ExpenseDate, "Expense date is required");
    } else if NaiveDate::parse_from_str(draft.expense_date.trim(), DATE_FORMAT).is_err() {
        errors.insert(
            Field::ExpenseDate,
            "Expense date must use the YYYY-MM-DD format",
        );
    }

    errors
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::proof::ProofFile;

    fn filled_draft() -> ReimbursementDraft {
        ReimbursementDraft {
            full_name: "Siti Rahma".to_string(),
            whatsapp_number: "08123456789".to_string(),
            purpose: "Stationery for the alumni reunion".to_string(),
            amount_raw: "150000".to_string(),
            expense_date: "2026-08-07".to_string(),
            proof: Some(ProofFile {
                path: PathBuf::from("/tmp/receipt.png"),
                filename: "receipt.png".to_string(),
                mime_type: "image/png".to_string(),
                size_bytes: 204_800,
            }),
        }
    }

    #[test]
    fn accepts_a_fully_filled_draft() {
        assert!(validate(&filled_draft()).is_empty());
    }

    #[test]
    fn revalidation_of_a_valid_draft_stays_clean() {
        let draft = filled_draft();
        assert!(validate(&draft).is_empty());
        assert!(validate(&draft).is_empty());
    }

    #[test]
    fn each_missing_field_is_reported_independently() {
        let mut draft = filled_draft();
        draft.full_name = "   ".to_string();
        draft.purpose.clear();
        let errors = validate(&draft);
        assert_eq!(errors.len(), 2);
        assert!(errors.get(Field::FullName).is_some());
        assert!(errors.get(Field::Purpose).is_some());
        assert!(errors.get(Field::Amount).is_none());
    }

    #[test]
    fn blank_name_yields_exactly_one_entry() {
        let mut draft = filled_draft();
        draft.full_name.clear();
        let errors = validate(&draft);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::FullName), Some("Full name is required"));
    }

    #[test]
    fn whatsapp_number_boundaries() {
        let mut draft = filled_draft();

        draft.whatsapp_number = "08123456789".to_string();
        assert!(validate(&draft).get(Field::WhatsappNumber).is_none());

        // 13 digits total is the longest accepted form.
        draft.whatsapp_number = "0812345678901".to_string();
        assert!(validate(&draft).get(Field::WhatsappNumber).is_none());

        draft.whatsapp_number = "0812345".to_string();
        assert!(validate(&draft).get(Field::WhatsappNumber).is_some());

        draft.whatsapp_number = "+6281234567".to_string();
        assert!(validate(&draft).get(Field::WhatsappNumber).is_some());

        draft.whatsapp_number = "08123456789012".to_string();
        assert!(validate(&draft).get(Field::WhatsappNumber).is_some());

        draft.whatsapp_number = String::new();
        assert_eq!(
            validate(&draft).get(Field::WhatsappNumber),
            Some("WhatsApp number is required")
        );
    }

    #[test]
    fn amount_boundaries() {
        let mut draft = filled_draft();

        draft.amount_raw = "999".to_string();
        assert_eq!(
            validate(&draft).get(Field::Amount),
            Some("Minimum reimbursement amount is Rp 1.000")
        );

        draft.amount_raw = "1000".to_string();
        assert!(validate(&draft).get(Field::Amount).is_none());

        draft.amount_raw = String::new();
        assert_eq!(
            validate(&draft).get(Field::Amount),
            Some("Reimbursement amount is required")
        );
    }

    #[test]
    fn zero_amount_classifies_as_missing_not_below_minimum() {
        let mut draft = filled_draft();
        for raw in ["0", "000"] {
            draft.amount_raw = raw.to_string();
            assert_eq!(
                validate(&draft).get(Field::Amount),
                Some("Reimbursement amount is required"),
                "raw amount {raw:?}"
            );
        }
    }

    #[test]
    fn oversized_digit_strings_pass_the_minimum_check() {
        let mut draft = filled_draft();
        draft.amount_raw = "9".repeat(30);
        assert!(validate(&draft).get(Field::Amount).is_none());
        assert_eq!(parse_amount(&draft.amount_raw), u64::MAX);
    }

    #[test]
    fn missing_proof_is_required() {
        let mut draft = filled_draft();
        draft.proof = None;
        assert_eq!(
            validate(&draft).get(Field::Proof),
            Some("Proof of expense must be uploaded")
        );
    }

    #[test]
    fn date_must_be_present_and_well_formed() {
        let mut draft = filled_draft();

        draft.expense_date = String::new();
        assert_eq!(
            validate(&draft).get(Field::ExpenseDate),
            Some("Expense date is required")
        );

        draft.expense_date = "07-08-2026".to_string();
        assert_eq!(
            validate(&draft).get(Field::ExpenseDate),
            Some("Expense date must use the YYYY-MM-DD format")
        );

        draft.expense_date = "2026-02-30".to_string();
        assert!(validate(&draft).get(Field::ExpenseDate).is_some());

        draft.expense_date = "2026-08-07".to_string();
        assert!(validate(&draft).get(Field::ExpenseDate).is_none());
    }

    #[test]
    fn parse_amount_ignores_leading_zeros() {
        assert_eq!(parse_amount("0001500"), 1500);
        assert_eq!(parse_amount("0"), 0);
        assert_eq!(parse_amount(""), 0);
    }
}
