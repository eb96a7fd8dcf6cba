//! Repository for the `learner_profiles` table.

use microlearn_core::types::Timestamp;
use sqlx::types::Json;

use crate::models::profile::{CreateLearnerProfile, LearnerProfile};
use crate::DbPool;

/// Column list for `learner_profiles` queries.
const COLUMNS: &str = "\
    owner_id, summary_text, current_level, skill_gaps, email, \
    completed_lessons, last_lesson_at, created_at, updated_at";

/// Provides reads and writes for learner profiles.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Point read by owner id.
    pub async fn find(pool: &DbPool, owner_id: &str) -> Result<Option<LearnerProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM learner_profiles WHERE owner_id = ?1");
        sqlx::query_as::<_, LearnerProfile>(&query)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// Create a profile, or replace the summary, level and skill gaps of an
    /// existing one.
    ///
    /// Progress counters and the email address survive a repeated onboarding.
    pub async fn upsert(
        pool: &DbPool,
        input: &CreateLearnerProfile,
        now: Timestamp,
    ) -> Result<LearnerProfile, sqlx::Error> {
        let query = format!(
            "INSERT INTO learner_profiles \
                 (owner_id, summary_text, current_level, skill_gaps, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?5) \
             ON CONFLICT (owner_id) DO UPDATE SET \
                 summary_text = excluded.summary_text, \
                 current_level = excluded.current_level, \
                 skill_gaps = excluded.skill_gaps, \
                 updated_at = excluded.updated_at \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LearnerProfile>(&query)
            .bind(&input.owner_id)
            .bind(&input.summary_text)
            .bind(&input.current_level)
            .bind(Json(&input.skill_gaps))
            .bind(now)
            .fetch_one(pool)
            .await
    }

    /// Set the address the daily lesson is sent to. Returns `false` if the
    /// profile does not exist.
    pub async fn set_email(
        pool: &DbPool,
        owner_id: &str,
        email: &str,
        now: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE learner_profiles SET email = ?2, updated_at = ?3 WHERE owner_id = ?1",
        )
        .bind(owner_id)
        .bind(email)
        .bind(now)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Record one finished or delivered lesson: bump the counter and the
    /// last-lesson time.
    ///
    /// The summary text is left as it is. Returns `None` if the profile does
    /// not exist.
    pub async fn record_completion(
        pool: &DbPool,
        owner_id: &str,
        finished_at: Timestamp,
    ) -> Result<Option<LearnerProfile>, sqlx::Error> {
        let query = format!(
            "UPDATE learner_profiles SET \
                 completed_lessons = completed_lessons + 1, \
                 last_lesson_at = ?2, \
                 updated_at = ?2 \
             WHERE owner_id = ?1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LearnerProfile>(&query)
            .bind(owner_id)
            .bind(finished_at)
            .fetch_optional(pool)
            .await
    }
}
