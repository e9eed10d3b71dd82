//! Generation domain: requests, options, and outcomes.

mod outcome;
mod request;

pub use outcome::{GeneratedLesson, GenerationFailure};
pub use request::{GenerationOptions, GenerationRequest, Grade, Subject};
