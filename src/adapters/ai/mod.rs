//! AI generation adapters implementing the `LessonGenerator` port.

mod gemini_generator;
mod mock_generator;

pub use gemini_generator::{GeminiConfig, GeminiGenerator};
pub use mock_generator::{MockError, MockLessonGenerator};
