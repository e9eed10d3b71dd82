//! Storage adapters implementing the `MembershipStorage` port.

mod file_membership_storage;
mod in_memory_membership_storage;

pub use file_membership_storage::FileMembershipStorage;
pub use in_memory_membership_storage::InMemoryMembershipStorage;
