//! Typed extraction from record sets that already passed validation.

use outdial_core::types::Lead;

use crate::records::RecordSet;
use crate::validate::REQUIRED_LEAD_COLUMNS;

/// Build typed leads from a validated lead list, in row order. Returns an
/// empty vec if any required column is absent; run `validate_leads` first
/// to get the real error list.
pub fn extract_leads(records: &RecordSet) -> Vec<Lead> {
    // indices in REQUIRED_LEAD_COLUMNS order
    let indices: Option<Vec<usize>> = REQUIRED_LEAD_COLUMNS
        .iter()
        .map(|col| records.column_index(col))
        .collect();
    let indices = match indices {
        Some(indices) => indices,
        None => return Vec::new(),
    };

    records
        .rows()
        .iter()
        .map(|row| {
            let cell = |i: usize| row.get(indices[i]).cloned().unwrap_or_default();
            Lead {
                first_name: cell(0),
                last_name: cell(1),
                phone: cell(2),
                address: cell(3),
                city: cell(4),
                state: cell(5),
                zip: cell(6),
            }
        })
        .collect()
}

/// Collect the DID pool from a validated DID set, in row order.
pub fn extract_dids(records: &RecordSet) -> Vec<String> {
    records
        .column_values("did")
        .map(|values| values.into_iter().map(str::to_string).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_leads_in_row_order() {
        let records = RecordSet::from_delimited(
            "First Name,Last Name,Phone,Address,City,State,Zip\n\
             Ava,Stone,15551230001,1 Main St,Austin,TX,78701\n\
             Bo,Reed,15551230002,2 Elm St,Waco,TX,76701\n",
            ',',
        );
        let leads = extract_leads(&records);
        assert_eq!(leads.len(), 2);
        assert_eq!(leads[0].first_name, "Ava");
        assert_eq!(leads[0].phone, "15551230001");
        assert_eq!(leads[1].city, "Waco");
        assert_eq!(leads[1].zip, "76701");
    }

    #[test]
    fn test_extract_leads_without_required_columns_is_empty() {
        let records = RecordSet::from_delimited("first_name,phone\nAva,15551230001\n", ',');
        assert!(extract_leads(&records).is_empty());
    }

    #[test]
    fn test_extract_leads_fills_short_rows() {
        let records = RecordSet::from_delimited(
            "first_name,last_name,phone,address,city,state,zip\nAva,Stone,15551230001\n",
            ',',
        );
        let leads = extract_leads(&records);
        assert_eq!(leads[0].phone, "15551230001");
        assert_eq!(leads[0].zip, "");
    }

    #[test]
    fn test_extract_dids() {
        let records = RecordSet::from_lines("did", "15557654321\n15557654322\n");
        assert_eq!(extract_dids(&records), vec!["15557654321", "15557654322"]);

        let missing = RecordSet::from_delimited("number\n15557654321\n", ',');
        assert!(extract_dids(&missing).is_empty());
    }
}
