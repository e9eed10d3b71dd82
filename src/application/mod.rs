//! Application layer - use cases wired over the ports.
//!
//! `MembershipStore` owns persisted membership state; `GenerationOrchestrator`
//! drives a single generation request through gating, validation, and the
//! outward service call.

mod membership_store;
mod orchestrator;

pub use membership_store::MembershipStore;
pub use orchestrator::GenerationOrchestrator;
