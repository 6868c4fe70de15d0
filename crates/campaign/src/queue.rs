//! Round-robin queue builder: pairs each lead with an outbound DID.

use outdial_core::types::{Lead, QueueEntry};
use outdial_core::{DialerError, DialerResult};

/// Build the dial queue for a campaign. Lead `i` is assigned DID
/// `i % dids.len()`, spreading lines evenly in list order. Entry order
/// matches lead order; display and dispatch both rely on it.
///
/// An empty DID pool is rejected before any index arithmetic runs.
pub fn build_queue(
    leads: &[Lead],
    dids: &[String],
    max_attempts: u32,
) -> DialerResult<Vec<QueueEntry>> {
    if dids.is_empty() {
        return Err(DialerError::EmptyPool);
    }
    debug_assert!(max_attempts >= 1);

    Ok(leads
        .iter()
        .enumerate()
        .map(|(i, lead)| QueueEntry::new(lead.phone.clone(), dids[i % dids.len()].clone(), max_attempts))
        .collect())
}
