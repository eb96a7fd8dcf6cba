//! Response bodies for the lesson endpoints.
//!
//! The field names are the ones the web client already reads, so these do
//! not use the `{ "data": ... }` envelope.

use microlearn_core::lesson::Lesson;
use microlearn_db::models::profile::LearnerProfile;
use serde::Serialize;

/// `{ "lesson": ... }`
#[derive(Debug, Serialize)]
pub struct LessonResponse {
    pub lesson: Lesson,
}

/// `{ "message": ..., "lesson": ... }`
#[derive(Debug, Serialize)]
pub struct OnboardingResponse {
    pub message: &'static str,
    pub lesson: Lesson,
}

/// `{ "lessons": [...] }`
#[derive(Debug, Serialize)]
pub struct LessonsResponse {
    pub lessons: Vec<Lesson>,
}

/// `{ "message": ..., "newLesson": ... }`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinishLessonResponse {
    pub message: &'static str,
    pub new_lesson: Lesson,
}

/// `{ "questions": [...] }`
#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub questions: &'static [&'static str],
}

/// `{ "profile": ..., "lessonCount": n }`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub profile: LearnerProfile,
    /// Lessons stored for the learner, finished or not.
    pub lesson_count: i64,
}

/// `{ "message": ..., "topic": ..., "email": ... }`
#[derive(Debug, Serialize)]
pub struct DeliveryResponse {
    pub message: &'static str,
    pub topic: String,
    pub email: String,
}
