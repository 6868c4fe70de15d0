//! Validation rules for lead lists and DID pools.
//!
//! Every check runs and every failure is reported; callers get the full
//! error list in one pass, not the first miss. An empty list means the
//! input is accepted.

use crate::records::RecordSet;

/// Columns a lead list must carry, in report order.
pub const REQUIRED_LEAD_COLUMNS: [&str; 7] = [
    "first_name",
    "last_name",
    "phone",
    "address",
    "city",
    "state",
    "zip",
];

/// Columns a DID pool must carry.
pub const REQUIRED_DID_COLUMNS: [&str; 1] = ["did"];

/// Validate a lead list. One error per missing required column; a single
/// aggregate error if any phone value is not exactly 11 digits.
pub fn validate_leads(records: &RecordSet) -> Vec<String> {
    let mut errors = Vec::new();
    for col in REQUIRED_LEAD_COLUMNS {
        if !records.has_column(col) {
            errors.push(format!("Missing lead column: {col}"));
        }
    }
    if let Some(phones) = records.column_values("phone") {
        if !phones.iter().all(|p| is_eleven_digits(p)) {
            errors.push("All lead phone numbers must be 11 digits (e.g., 15551234567).".to_string());
        }
    }
    errors
}

/// Validate a DID pool. Same shape as [`validate_leads`]: missing-column
/// errors plus one aggregate format error.
pub fn validate_dids(records: &RecordSet) -> Vec<String> {
    let mut errors = Vec::new();
    for col in REQUIRED_DID_COLUMNS {
        if !records.has_column(col) {
            errors.push(format!("Missing DID column: {col}"));
        }
    }
    if let Some(dids) = records.column_values("did") {
        if !dids.iter().all(|d| is_eleven_digits(d)) {
            errors.push("All DIDs must be 11 digits (e.g., 15557654321).".to_string());
        }
    }
    errors
}

fn is_eleven_digits(value: &str) -> bool {
    value.len() == 11 && value.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead_set(header: &str, rows: &[&str]) -> RecordSet {
        let mut text = String::from(header);
        text.push('\n');
        for row in rows {
            text.push_str(row);
            text.push('\n');
        }
        RecordSet::from_delimited(&text, ',')
    }

    fn valid_lead_header() -> &'static str {
        "first_name,last_name,phone,address,city,state,zip"
    }

    #[test]
    fn test_valid_leads_pass() {
        let records = lead_set(
            valid_lead_header(),
            &["Ava,Stone,15551230001,1 Main St,Austin,TX,78701"],
        );
        assert!(validate_leads(&records).is_empty());
    }

    #[test]
    fn test_one_error_per_missing_column() {
        let records = lead_set("first_name,phone", &["Ava,15551230001"]);
        let errors = validate_leads(&records);
        assert_eq!(errors.len(), 5);
        assert!(errors.contains(&"Missing lead column: last_name".to_string()));
        assert!(errors.contains(&"Missing lead column: address".to_string()));
        assert!(errors.contains(&"Missing lead column: city".to_string()));
        assert!(errors.contains(&"Missing lead column: state".to_string()));
        assert!(errors.contains(&"Missing lead column: zip".to_string()));
    }

    #[test]
    fn test_headers_match_after_normalization() {
        let records = lead_set(
            " First Name ,LAST NAME,Phone,Address,City,State,Zip",
            &["Ava,Stone,15551230001,1 Main St,Austin,TX,78701"],
        );
        assert!(validate_leads(&records).is_empty());
    }

    #[test]
    fn test_bad_phones_collapse_to_one_error() {
        let records = lead_set(
            valid_lead_header(),
            &[
                "Ava,Stone,555,1 Main St,Austin,TX,78701",
                "Bo,Reed,notaphone,2 Main St,Austin,TX,78701",
                "Cy,Hale,15551230003,3 Main St,Austin,TX,78701",
            ],
        );
        let errors = validate_leads(&records);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0],
            "All lead phone numbers must be 11 digits (e.g., 15551234567)."
        );
    }

    #[test]
    fn test_missing_columns_and_bad_phones_both_reported() {
        let records = lead_set("phone", &["12"]);
        let errors = validate_leads(&records);
        // 6 missing columns plus the aggregate phone error
        assert_eq!(errors.len(), 7);
        assert!(errors
            .iter()
            .any(|e| e == "All lead phone numbers must be 11 digits (e.g., 15551234567)."));
    }

    #[test]
    fn test_missing_phone_column_skips_format_check() {
        let records = lead_set("first_name,last_name,address,city,state,zip", &[]);
        let errors = validate_leads(&records);
        assert_eq!(errors, vec!["Missing lead column: phone".to_string()]);
    }

    #[test]
    fn test_valid_dids_pass() {
        let records = RecordSet::from_lines("did", "15557654321\n15557654322\n");
        assert!(validate_dids(&records).is_empty());
    }

    #[test]
    fn test_did_errors() {
        let records = RecordSet::from_lines("did", "15557654321\n555\n");
        assert_eq!(
            validate_dids(&records),
            vec!["All DIDs must be 11 digits (e.g., 15557654321).".to_string()]
        );

        let missing = RecordSet::from_delimited("number\n15557654321\n", ',');
        assert_eq!(
            validate_dids(&missing),
            vec!["Missing DID column: did".to_string()]
        );
    }

    #[test]
    fn test_eleven_digit_check_rejects_non_ascii_and_signs() {
        assert!(is_eleven_digits("15551234567"));
        assert!(!is_eleven_digits("+5551234567"));
        assert!(!is_eleven_digits("1555123456"));
        assert!(!is_eleven_digits("155512345678"));
        assert!(!is_eleven_digits("1555123456a"));
    }
}
