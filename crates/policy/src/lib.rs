//! Dialing policy: the rules that decide whether a queue entry may be
//! called right now. Covers attempt ceilings, retry spacing, allowed days,
//! quiet hours, and the campaign-scoped concurrency/pacing gate.

pub mod eligibility;
pub mod gate;
pub mod policy;
pub mod quiet_hours;
pub mod retry;

pub use eligibility::is_dispatchable;
pub use gate::DispatchGate;
pub use policy::DialPolicy;
pub use quiet_hours::QuietHours;
pub use retry::RetryTiers;
