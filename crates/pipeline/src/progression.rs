//! Lesson progression: first lesson from onboarding, and "finish this
//! lesson, generate the next one".
//!
//! A lesson has two states, active (`done = false`) and completed. A
//! successor is always stored under a freshly minted id; completed lessons
//! are never reopened.

use std::sync::Arc;

use chrono::Utc;
use microlearn_core::error::CoreError;
use microlearn_core::lesson::{mint_lesson_id, validate_id, validate_level, GeneratedLesson, Lesson};
use microlearn_core::lesson_parser::{parse_lesson, InvalidLesson};
use microlearn_core::onboarding::OnboardingAnswers;
use microlearn_core::prompt::{build_prompt, CompletedLesson, PromptContext};
use microlearn_core::types::Timestamp;
use microlearn_db::models::profile::CreateLearnerProfile;
use microlearn_db::repositories::{LessonRepo, ProfileRepo};
use microlearn_db::DbPool;
use microlearn_delivery::DeliveryError;
use microlearn_generation::{GenerationError, TextGenerator};

/// Errors from the progression workflow.
#[derive(Debug, thiserror::Error)]
pub enum ProgressionError {
    /// Validation or missing-record errors.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The lesson store failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The generation provider failed or answered without a completion.
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// The provider answered, but not with a usable lesson.
    #[error("Generated lesson rejected: {0}")]
    GenerationFailed(InvalidLesson),

    /// The daily lesson was generated but could not be emailed.
    #[error("Failed to send email: {0}")]
    Delivery(#[from] DeliveryError),
}

/// Learner attributes for a one-off lesson.
#[derive(Debug, Clone)]
pub struct LessonRequest {
    pub owner_id: String,
    pub current_level: String,
    pub skill_gaps: Vec<String>,
    pub interests: Vec<String>,
    pub goals: String,
}

/// Runs lesson generation against an injected store and generator.
#[derive(Clone)]
pub struct LessonWorkflow {
    pool: DbPool,
    generator: Arc<dyn TextGenerator>,
}

impl LessonWorkflow {
    pub fn new(pool: DbPool, generator: Arc<dyn TextGenerator>) -> Self {
        Self { pool, generator }
    }

    /// Generate, store and return the first lesson for a learner who has
    /// just answered the onboarding chat.
    ///
    /// The lesson's level is the caller's `current_level`. On success the
    /// learner profile is created (or its summary replaced) from the answers.
    pub async fn generate_first_lesson(
        &self,
        owner_id: &str,
        answers: &[String],
        current_level: &str,
    ) -> Result<Lesson, ProgressionError> {
        validate_id("userId", owner_id)?;
        validate_level(current_level)?;
        let answers = OnboardingAnswers::from_slice(answers)?;

        let prompt = build_prompt(&PromptContext::ColdStart {
            owner_id,
            answers: &answers,
            current_level,
        });
        let generated = self.generate(&prompt).await?;

        let now = Utc::now();
        let lesson = generated.into_lesson(owner_id, mint_lesson_id(), Some(current_level), now);
        LessonRepo::put(&self.pool, &lesson).await?;
        let profile = CreateLearnerProfile {
            owner_id: owner_id.to_string(),
            summary_text: answers.summary(),
            current_level: current_level.to_string(),
            skill_gaps: answers.skill_gap_list(),
        };
        ProfileRepo::upsert(&self.pool, &profile, now).await?;

        tracing::info!(
            owner_id,
            lesson_id = %lesson.lesson_id,
            topic = %lesson.topic,
            "First lesson generated",
        );
        Ok(lesson)
    }

    /// Mark `lesson_id` complete, then generate and store its successor.
    ///
    /// If generation fails after the lesson was marked complete, the lesson
    /// stays complete and no successor exists; the caller sees the error.
    pub async fn finish_and_advance(
        &self,
        owner_id: &str,
        lesson_id: &str,
    ) -> Result<Lesson, ProgressionError> {
        validate_id("userId", owner_id)?;
        validate_id("lessonID", lesson_id)?;

        let profile = ProfileRepo::find(&self.pool, owner_id)
            .await?
            .ok_or_else(|| not_found("Learner profile", owner_id))?;

        let completed = LessonRepo::find(&self.pool, owner_id, lesson_id)
            .await?
            .ok_or_else(|| not_found("Lesson", lesson_id))?;

        let finished_at = Utc::now();
        if !LessonRepo::mark_complete(&self.pool, owner_id, lesson_id, finished_at).await? {
            return Err(not_found("Lesson", lesson_id).into());
        }
        tracing::info!(owner_id, lesson_id, "Lesson marked complete");

        let next_lesson_id = mint_lesson_id();
        let prompt = build_prompt(&PromptContext::Continuation {
            owner_id,
            summary: &profile.summary_text,
            completed: CompletedLesson::from(&completed),
            next_lesson_id: &next_lesson_id,
            created_at: finished_at,
        });

        let mut generated = self.generate(&prompt).await?;
        if generated.level.is_none() {
            generated.level = Some(completed.level.clone());
        }

        let next = generated.into_lesson(owner_id, next_lesson_id, None, Utc::now());
        LessonRepo::put(&self.pool, &next).await?;
        tracing::info!(
            owner_id,
            completed_lesson_id = lesson_id,
            next_lesson_id = %next.lesson_id,
            topic = %next.topic,
            "Next lesson generated",
        );

        record_progress(&self.pool, owner_id, finished_at).await;

        Ok(next)
    }

    /// Generate a one-off lesson from explicit learner attributes.
    ///
    /// Nothing is stored; the returned lesson carries a minted id only so
    /// it has the same shape as stored lessons.
    pub async fn preview_lesson(&self, request: &LessonRequest) -> Result<Lesson, ProgressionError> {
        validate_id("userId", &request.owner_id)?;
        validate_level(&request.current_level)?;
        if request.goals.trim().is_empty() {
            return Err(CoreError::Validation("goals is required".to_string()).into());
        }

        let prompt = build_prompt(&PromptContext::AdHoc {
            owner_id: &request.owner_id,
            current_level: &request.current_level,
            skill_gaps: &request.skill_gaps,
            interests: &request.interests,
            goals: &request.goals,
        });
        let generated = self.generate(&prompt).await?;

        Ok(generated.into_lesson(
            &request.owner_id,
            mint_lesson_id(),
            Some(&request.current_level),
            Utc::now(),
        ))
    }

    /// Store the address the daily lesson is sent to.
    pub async fn set_email(&self, owner_id: &str, email: &str) -> Result<(), ProgressionError> {
        validate_id("userId", owner_id)?;
        validate_email(email)?;

        if !ProfileRepo::set_email(&self.pool, owner_id, email.trim(), Utc::now()).await? {
            return Err(not_found("Learner profile", owner_id).into());
        }
        tracing::info!(owner_id, "Learner email updated");
        Ok(())
    }

    /// Unfinished lessons for `owner_id`, oldest first.
    pub async fn unfinished_lessons(&self, owner_id: &str) -> Result<Vec<Lesson>, ProgressionError> {
        validate_id("userId", owner_id)?;
        Ok(LessonRepo::list_unfinished(&self.pool, owner_id).await?)
    }

    // ---- private helpers ----

    /// One provider round trip plus decoding.
    async fn generate(&self, prompt: &str) -> Result<GeneratedLesson, ProgressionError> {
        let raw = self.generator.generate(prompt).await?;
        parse_lesson(&raw).map_err(|invalid| {
            tracing::warn!(
                error = %invalid.error,
                raw_chars = invalid.raw_content.len(),
                "Generated lesson rejected",
            );
            ProgressionError::GenerationFailed(invalid)
        })
    }
}

/// Record a finished or delivered lesson on the learner profile. Failure
/// is logged and does not undo what already happened.
pub(crate) async fn record_progress(pool: &DbPool, owner_id: &str, at: Timestamp) {
    match ProfileRepo::record_completion(pool, owner_id, at).await {
        Ok(Some(profile)) => tracing::debug!(
            owner_id,
            completed_lessons = profile.completed_lessons,
            "Learner progress updated",
        ),
        Ok(None) => tracing::warn!(owner_id, "Learner profile vanished before progress update"),
        Err(e) => tracing::warn!(owner_id, error = %e, "Failed to update learner progress"),
    }
}

/// Reject an address the mail system could not deliver to.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    microlearn_delivery::validate_address(email)
        .map_err(|_| CoreError::Validation(format!("Invalid email address '{}'", email.trim())))
}

pub(crate) fn not_found(entity: &'static str, id: &str) -> CoreError {
    CoreError::NotFound {
        entity,
        id: id.to_string(),
    }
}
