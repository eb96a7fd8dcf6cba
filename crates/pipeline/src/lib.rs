//! Lesson generation, progression and delivery workflows.
//!
//! Ties together prompt construction, the generation provider, lesson
//! decoding, the lesson store and the mailer. Every call is stateless: it
//! reloads what it needs from the store and receives its store pool,
//! generator and mailer as injected handles.

pub mod daily;
pub mod progression;

pub use daily::{DailyLessonSender, DeliveryReceipt};
pub use progression::{validate_email, LessonRequest, LessonWorkflow, ProgressionError};
