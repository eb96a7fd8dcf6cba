//! Lesson rows.

use microlearn_core::lesson::{Lesson, Quiz, Theory, DEFAULT_DURATION_MINUTES};
use microlearn_core::types::Timestamp;
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `lessons` table.
///
/// `sub_topics`, `theories` and `quiz` are JSON text columns decoded into
/// their typed forms; a malformed column fails the read instead of being
/// passed through.
#[derive(Debug, Clone, FromRow)]
pub struct LessonRow {
    pub owner_id: String,
    pub lesson_id: String,
    pub topic: String,
    pub sub_topics: Json<Vec<String>>,
    pub theories: Json<Vec<Theory>>,
    pub quiz: Json<Quiz>,
    pub duration_minutes: i64,
    pub level: String,
    pub feedback: String,
    pub created_at: Timestamp,
    pub done: bool,
    pub finished_at: Option<Timestamp>,
}

impl From<LessonRow> for Lesson {
    fn from(row: LessonRow) -> Self {
        Self {
            lesson_id: row.lesson_id,
            owner_id: row.owner_id,
            topic: row.topic,
            sub_topics: row.sub_topics.0,
            theories: row.theories.0,
            quiz: row.quiz.0,
            duration_minutes: u32::try_from(row.duration_minutes)
                .unwrap_or(DEFAULT_DURATION_MINUTES),
            level: row.level,
            feedback: row.feedback,
            created_at: row.created_at,
            done: row.done,
            finished_at: row.finished_at,
        }
    }
}
