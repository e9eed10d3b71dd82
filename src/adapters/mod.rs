//! Adapters - concrete implementations of the ports.
//!
//! Each submodule implements one port against a real or test backend:
//!
//! - `ai`: Gemini over HTTP, plus a mock for tests
//! - `clock`: wall clock and a settable test clock
//! - `storage`: YAML file persistence and an in-memory variant

pub mod ai;
pub mod clock;
pub mod storage;
