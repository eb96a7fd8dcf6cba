//! Domain types and pure logic for the micro-learning lesson service.
//!
//! Nothing in this crate performs I/O: it defines the lesson model, the
//! onboarding answer set, prompt construction for the generation provider,
//! and decoding of generated lesson documents.

pub mod error;
pub mod lesson;
pub mod lesson_parser;
pub mod onboarding;
pub mod prompt;
pub mod types;
