//! LessonForge - Curriculum-Aligned Lesson Plan Generation
//!
//! This crate gates AI lesson-plan generation behind a trial/premium
//! membership, with lazily derived expiry and file-based persistence.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
