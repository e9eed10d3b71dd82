//! Membership domain: licensing state machine and access gating.

mod errors;
pub mod policy;
mod record;
mod status;

pub use errors::MembershipError;
pub use policy::GatingAction;
pub use record::{MembershipRecord, MembershipSnapshot};
pub use status::MembershipStatus;
