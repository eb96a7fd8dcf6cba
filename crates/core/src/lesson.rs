//! Lesson model: theory items, the single quiz, and the persisted lesson.
//!
//! Field names on the wire follow the contract the web client already
//! speaks (`lessonID`, `userId`, camelCase elsewhere).

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Number of theory items every lesson carries.
pub const THEORIES_PER_LESSON: usize = 3;

/// Number of answer options on a lesson quiz.
pub const QUIZ_OPTION_COUNT: usize = 3;

/// Reading time a lesson is generated for.
pub const DEFAULT_DURATION_MINUTES: u32 = 5;

/// Upper bound on a lesson's stated duration.
pub const MAX_DURATION_MINUTES: u32 = 5;

/// Attempts allowed on a quiz when the model does not say otherwise.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Prefix of every minted lesson id.
pub const LESSON_ID_PREFIX: &str = "LESSON#";

/// Learner levels accepted by the generation prompts.
pub const VALID_LEVELS: &[&str] = &["Beginner", "Intermediate", "Advanced"];

/// Level assumed when neither the caller nor the model supplies one.
pub const DEFAULT_LEVEL: &str = "Beginner";

/// Maximum length of an owner or lesson identifier.
pub const MAX_ID_LENGTH: usize = 128;

// ---------------------------------------------------------------------------
// Lesson parts
// ---------------------------------------------------------------------------

/// One short explanatory section of a lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theory {
    pub title: String,
    pub content: String,
}

/// The single multiple-choice question attached to a lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    #[serde(default)]
    pub is_visible: bool,
    #[serde(default)]
    pub attempts_made: u32,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    pub question: String,
    pub options: Vec<String>,
    /// Zero-based index into `options`.
    pub correct_answer: u32,
    #[serde(default)]
    pub difficulty: String,
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

impl Quiz {
    /// Reset the client-facing state: hidden, no attempts made.
    pub fn reset(mut self) -> Self {
        self.is_visible = false;
        self.attempts_made = 0;
        if self.max_attempts == 0 {
            self.max_attempts = DEFAULT_MAX_ATTEMPTS;
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Generated document
// ---------------------------------------------------------------------------

/// A lesson document as decoded from model output.
///
/// Identity and bookkeeping fields are optional because the model is not
/// trusted to produce them; [`GeneratedLesson::into_lesson`] replaces them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedLesson {
    pub lesson_id: Option<String>,
    pub user_id: Option<String>,
    pub topic: String,
    #[serde(default)]
    pub sub_topics: Vec<String>,
    pub theories: Vec<Theory>,
    pub quiz: Quiz,
    pub duration_minutes: Option<u32>,
    pub level: Option<String>,
    #[serde(default)]
    pub feedback: String,
    pub created_at: Option<String>,
}

impl GeneratedLesson {
    /// Turn a generated document into a fresh, unfinished lesson owned by
    /// `owner_id` under `lesson_id`.
    ///
    /// `level` overrides whatever level the model picked.
    pub fn into_lesson(
        self,
        owner_id: &str,
        lesson_id: String,
        level: Option<&str>,
        now: Timestamp,
    ) -> Lesson {
        let level = level
            .map(str::to_string)
            .or(self.level)
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LEVEL.to_string());

        Lesson {
            lesson_id,
            owner_id: owner_id.to_string(),
            topic: self.topic,
            sub_topics: self.sub_topics,
            theories: self.theories,
            quiz: self.quiz.reset(),
            duration_minutes: self
                .duration_minutes
                .unwrap_or(DEFAULT_DURATION_MINUTES)
                .clamp(1, MAX_DURATION_MINUTES),
            level,
            feedback: self.feedback,
            created_at: now,
            done: false,
            finished_at: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Persisted lesson
// ---------------------------------------------------------------------------

/// A stored lesson, keyed by `(owner_id, lesson_id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    #[serde(rename = "lessonID")]
    pub lesson_id: String,
    #[serde(rename = "userId")]
    pub owner_id: String,
    pub topic: String,
    pub sub_topics: Vec<String>,
    pub theories: Vec<Theory>,
    pub quiz: Quiz,
    pub duration_minutes: u32,
    pub level: String,
    pub feedback: String,
    pub created_at: Timestamp,
    /// Completion flag. Only ever moves from `false` to `true`.
    pub done: bool,
    pub finished_at: Option<Timestamp>,
}

/// Mint a new lesson identifier. Never reuses an existing id.
pub fn mint_lesson_id() -> String {
    format!("{LESSON_ID_PREFIX}{}", uuid::Uuid::new_v4().simple())
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate an identifier field: non-blank and within [`MAX_ID_LENGTH`].
pub fn validate_id(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    if value.len() > MAX_ID_LENGTH {
        return Err(CoreError::Validation(format!(
            "{field} exceeds maximum length of {MAX_ID_LENGTH} characters (got {})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate a learner level against [`VALID_LEVELS`].
pub fn validate_level(level: &str) -> Result<(), CoreError> {
    if VALID_LEVELS.contains(&level) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid level '{level}'. Must be one of: {VALID_LEVELS:?}"
        )))
    }
}
