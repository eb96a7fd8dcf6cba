//! Decoding of generated lesson text.
//!
//! Model output is untrusted: it may be wrapped in prose or a Markdown
//! fence, may not be JSON at all, or may decode but violate the lesson
//! shape. [`parse_lesson`] never panics; every failure comes back as an
//! [`InvalidLesson`] carrying the original text.

use serde::Serialize;

use crate::lesson::{GeneratedLesson, QUIZ_OPTION_COUNT, THEORIES_PER_LESSON};

/// Error message used when the completion does not decode as a lesson.
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON format";

/// A completion that could not be turned into a lesson.
///
/// Serializes as `{ "error": ..., "rawContent": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(rename_all = "camelCase")]
#[error("{error}")]
pub struct InvalidLesson {
    pub error: String,
    pub raw_content: String,
}

impl InvalidLesson {
    fn new(error: impl Into<String>, raw_content: &str) -> Self {
        Self {
            error: error.into(),
            raw_content: raw_content.to_string(),
        }
    }
}

/// Decode a completion into a [`GeneratedLesson`] and check its shape.
pub fn parse_lesson(raw: &str) -> Result<GeneratedLesson, InvalidLesson> {
    let candidate = json_object_span(raw).unwrap_or(raw);

    let lesson: GeneratedLesson = serde_json::from_str(candidate)
        .map_err(|_| InvalidLesson::new(INVALID_JSON_MESSAGE, raw))?;

    check_shape(&lesson).map_err(|msg| InvalidLesson::new(msg, raw))?;

    Ok(lesson)
}

/// The slice from the first `{` to the last `}`, if both exist in order.
fn json_object_span(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (start < end).then(|| &raw[start..=end])
}

fn check_shape(lesson: &GeneratedLesson) -> Result<(), String> {
    if lesson.topic.trim().is_empty() {
        return Err("Lesson topic must not be empty".to_string());
    }
    if lesson.theories.len() != THEORIES_PER_LESSON {
        return Err(format!(
            "Lesson must contain exactly {THEORIES_PER_LESSON} theories (got {})",
            lesson.theories.len()
        ));
    }
    let options = lesson.quiz.options.len();
    if options != QUIZ_OPTION_COUNT {
        return Err(format!(
            "Quiz must contain exactly {QUIZ_OPTION_COUNT} options (got {options})"
        ));
    }
    if lesson.quiz.correct_answer as usize >= options {
        return Err(format!(
            "Quiz correct answer index {} is out of range",
            lesson.quiz.correct_answer
        ));
    }
    Ok(())
}
