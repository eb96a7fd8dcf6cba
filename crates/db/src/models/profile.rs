//! Learner profile rows.

use microlearn_core::types::Timestamp;
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `learner_profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearnerProfile {
    #[serde(rename = "userId")]
    pub owner_id: String,
    /// Rolling free-text description of experience, gaps and goals.
    pub summary_text: String,
    pub current_level: String,
    /// Individual skill gaps from onboarding; the first one drives the daily lesson.
    pub skill_gaps: Json<Vec<String>>,
    /// Where the daily lesson is sent. Optional until the learner provides one.
    pub email: Option<String>,
    pub completed_lessons: i64,
    pub last_lesson_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Fields written when a learner is onboarded.
#[derive(Debug, Clone)]
pub struct CreateLearnerProfile {
    pub owner_id: String,
    pub summary_text: String,
    pub current_level: String,
    pub skill_gaps: Vec<String>,
}
