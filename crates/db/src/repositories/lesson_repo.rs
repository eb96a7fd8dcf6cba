//! Repository for the `lessons` table.
//!
//! Lessons are addressed by the composite key `(owner_id, lesson_id)`.
//! Writes are last-writer-wins; there is no optimistic concurrency.

use microlearn_core::lesson::Lesson;
use microlearn_core::types::Timestamp;
use sqlx::types::Json;

use crate::models::lesson::LessonRow;
use crate::DbPool;

/// Column list for `lessons` queries.
const COLUMNS: &str = "\
    owner_id, lesson_id, topic, sub_topics, theories, quiz, \
    duration_minutes, level, feedback, created_at, done, finished_at";

/// Provides reads and writes for lesson records.
pub struct LessonRepo;

impl LessonRepo {
    /// Write a lesson, replacing any existing record with the same key.
    pub async fn put(pool: &DbPool, lesson: &Lesson) -> Result<(), sqlx::Error> {
        let query = format!(
            "INSERT OR REPLACE INTO lessons ({COLUMNS}) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)"
        );
        sqlx::query(&query)
            .bind(&lesson.owner_id)
            .bind(&lesson.lesson_id)
            .bind(&lesson.topic)
            .bind(Json(&lesson.sub_topics))
            .bind(Json(&lesson.theories))
            .bind(Json(&lesson.quiz))
            .bind(i64::from(lesson.duration_minutes))
            .bind(&lesson.level)
            .bind(&lesson.feedback)
            .bind(lesson.created_at)
            .bind(lesson.done)
            .bind(lesson.finished_at)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Point read by composite key.
    pub async fn find(
        pool: &DbPool,
        owner_id: &str,
        lesson_id: &str,
    ) -> Result<Option<Lesson>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lessons WHERE owner_id = ?1 AND lesson_id = ?2");
        let row = sqlx::query_as::<_, LessonRow>(&query)
            .bind(owner_id)
            .bind(lesson_id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Lesson::from))
    }

    /// All lessons of `owner_id` whose completion flag is still false,
    /// oldest first. Served by `idx_lessons_owner_done`.
    pub async fn list_unfinished(pool: &DbPool, owner_id: &str) -> Result<Vec<Lesson>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM lessons \
             WHERE owner_id = ?1 AND done = 0 \
             ORDER BY created_at, lesson_id"
        );
        let rows = sqlx::query_as::<_, LessonRow>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Lesson::from).collect())
    }

    /// Set the completion flag and completion time.
    ///
    /// Conditionless: a lesson that is already done stays done and gets the
    /// new timestamp. Returns `false` if no such lesson exists.
    pub async fn mark_complete(
        pool: &DbPool,
        owner_id: &str,
        lesson_id: &str,
        finished_at: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE lessons SET done = 1, finished_at = ?3 \
             WHERE owner_id = ?1 AND lesson_id = ?2",
        )
        .bind(owner_id)
        .bind(lesson_id)
        .bind(finished_at)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of lessons stored for `owner_id`, finished or not.
    pub async fn count_for_owner(pool: &DbPool, owner_id: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM lessons WHERE owner_id = ?1")
            .bind(owner_id)
            .fetch_one(pool)
            .await
    }
}
