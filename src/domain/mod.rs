//! Domain layer: pure types and decision logic, no I/O.

pub mod foundation;
pub mod generation;
pub mod membership;
