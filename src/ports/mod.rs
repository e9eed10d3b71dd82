//! Ports: trait seams between the core and the outside world.

mod clock;
mod lesson_generator;
mod membership_storage;

pub use clock::Clock;
pub use lesson_generator::{GeneratorError, LessonGenerator};
pub use membership_storage::{MembershipStorage, StorageError};
