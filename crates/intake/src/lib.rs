//! Lead and DID intake: tabular record sets, the validation rules that
//! gate queue building, and typed extraction for accepted input.

pub mod extract;
pub mod records;
pub mod validate;

pub use extract::{extract_dids, extract_leads};
pub use records::RecordSet;
pub use validate::{validate_dids, validate_leads};
