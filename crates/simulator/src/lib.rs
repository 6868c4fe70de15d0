//! Simulated dial worker: drives campaigns through the engine without
//! telephony, on a seeded RNG and a simulated clock.

pub mod worker;

pub use worker::{FakeDialWorker, SimulationReport};
