//! Integration tests for the lesson and profile repositories.
//!
//! Each test runs against a throwaway SQLite database with all migrations
//! applied.

use chrono::{Duration, TimeZone, Utc};
use microlearn_core::lesson::{Lesson, Quiz, Theory};
use microlearn_core::types::Timestamp;
use microlearn_db::models::profile::CreateLearnerProfile;
use microlearn_db::repositories::{LessonRepo, ProfileRepo};
use sqlx::SqlitePool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn t0() -> Timestamp {
    Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()
}

fn new_profile(owner_id: &str, summary: &str, level: &str) -> CreateLearnerProfile {
    CreateLearnerProfile {
        owner_id: owner_id.to_string(),
        summary_text: summary.to_string(),
        current_level: level.to_string(),
        skill_gaps: vec!["IAM policies".into(), "key rotation".into()],
    }
}

fn new_lesson(owner_id: &str, lesson_id: &str, created_at: Timestamp) -> Lesson {
    Lesson {
        lesson_id: lesson_id.to_string(),
        owner_id: owner_id.to_string(),
        topic: "IAM policies".to_string(),
        sub_topics: vec!["Identity policies".into(), "Resource policies".into()],
        theories: vec![
            Theory {
                title: "Policies".into(),
                content: "Policies are JSON documents.".into(),
            },
            Theory {
                title: "Evaluation".into(),
                content: "An explicit deny always wins.".into(),
            },
            Theory {
                title: "Least privilege".into(),
                content: "Grant only what is needed.".into(),
            },
        ],
        quiz: Quiz {
            is_visible: false,
            attempts_made: 0,
            max_attempts: 3,
            question: "What wins in policy evaluation?".into(),
            options: vec!["Allow".into(), "Explicit deny".into(), "Implicit deny".into()],
            correct_answer: 1,
            difficulty: "Easy".into(),
        },
        duration_minutes: 5,
        level: "Beginner".to_string(),
        feedback: String::new(),
        created_at,
        done: false,
        finished_at: None,
    }
}

// ---------------------------------------------------------------------------
// Lessons
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn put_then_find_round_trips_nested_fields(pool: SqlitePool) {
    let lesson = new_lesson("U1", "L1", t0());
    LessonRepo::put(&pool, &lesson).await.unwrap();

    let found = LessonRepo::find(&pool, "U1", "L1")
        .await
        .unwrap()
        .expect("lesson should exist");

    assert_eq!(found.theories, lesson.theories);
    assert_eq!(found.quiz, lesson.quiz);
    assert_eq!(found.sub_topics, lesson.sub_topics);
    assert_eq!(found, lesson);
}

#[sqlx::test(migrations = "./migrations")]
async fn find_missing_lesson_returns_none(pool: SqlitePool) {
    LessonRepo::put(&pool, &new_lesson("U1", "L1", t0()))
        .await
        .unwrap();

    assert!(LessonRepo::find(&pool, "U1", "L2").await.unwrap().is_none());
    // Same lesson id under another owner is a different key.
    assert!(LessonRepo::find(&pool, "U2", "L1").await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn put_overwrites_existing_key(pool: SqlitePool) {
    let mut lesson = new_lesson("U1", "L1", t0());
    LessonRepo::put(&pool, &lesson).await.unwrap();

    lesson.topic = "KMS keys".to_string();
    LessonRepo::put(&pool, &lesson).await.unwrap();

    let found = LessonRepo::find(&pool, "U1", "L1").await.unwrap().unwrap();
    assert_eq!(found.topic, "KMS keys");
    assert_eq!(LessonRepo::count_for_owner(&pool, "U1").await.unwrap(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn list_unfinished_excludes_done_and_other_owners(pool: SqlitePool) {
    LessonRepo::put(&pool, &new_lesson("U1", "L1", t0()))
        .await
        .unwrap();
    LessonRepo::put(&pool, &new_lesson("U1", "L2", t0() + Duration::minutes(1)))
        .await
        .unwrap();
    LessonRepo::put(&pool, &new_lesson("U2", "L3", t0()))
        .await
        .unwrap();

    LessonRepo::mark_complete(&pool, "U1", "L1", t0() + Duration::minutes(5))
        .await
        .unwrap();

    let unfinished = LessonRepo::list_unfinished(&pool, "U1").await.unwrap();
    assert_eq!(unfinished.len(), 1);
    assert_eq!(unfinished[0].lesson_id, "L2");
    assert!(unfinished.iter().all(|l| !l.done && l.owner_id == "U1"));
}

#[sqlx::test(migrations = "./migrations")]
async fn list_unfinished_is_oldest_first(pool: SqlitePool) {
    LessonRepo::put(&pool, &new_lesson("U1", "later", t0() + Duration::hours(1)))
        .await
        .unwrap();
    LessonRepo::put(&pool, &new_lesson("U1", "earlier", t0()))
        .await
        .unwrap();

    let ids: Vec<String> = LessonRepo::list_unfinished(&pool, "U1")
        .await
        .unwrap()
        .into_iter()
        .map(|l| l.lesson_id)
        .collect();
    assert_eq!(ids, vec!["earlier".to_string(), "later".to_string()]);
}

#[sqlx::test(migrations = "./migrations")]
async fn mark_complete_is_idempotent_on_flag(pool: SqlitePool) {
    LessonRepo::put(&pool, &new_lesson("U1", "L1", t0()))
        .await
        .unwrap();

    let first = t0() + Duration::minutes(5);
    let second = t0() + Duration::minutes(9);

    assert!(LessonRepo::mark_complete(&pool, "U1", "L1", first).await.unwrap());
    let after_first = LessonRepo::find(&pool, "U1", "L1").await.unwrap().unwrap();
    assert!(after_first.done);
    assert_eq!(after_first.finished_at, Some(first));

    assert!(LessonRepo::mark_complete(&pool, "U1", "L1", second).await.unwrap());
    let after_second = LessonRepo::find(&pool, "U1", "L1").await.unwrap().unwrap();
    assert!(after_second.done);
    assert_eq!(after_second.finished_at, Some(second));
}

#[sqlx::test(migrations = "./migrations")]
async fn mark_complete_missing_lesson_returns_false(pool: SqlitePool) {
    let matched = LessonRepo::mark_complete(&pool, "U1", "nope", t0())
        .await
        .unwrap();
    assert!(!matched);
    assert_eq!(LessonRepo::count_for_owner(&pool, "U1").await.unwrap(), 0);
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn upsert_creates_then_updates_profile(pool: SqlitePool) {
    let created = ProfileRepo::upsert(&pool, &new_profile("U1", "backend dev", "Beginner"), t0())
        .await
        .unwrap();
    assert_eq!(created.summary_text, "backend dev");
    assert_eq!(created.completed_lessons, 0);
    assert_eq!(created.created_at, t0());
    assert_eq!(created.skill_gaps.0, vec!["IAM policies", "key rotation"]);
    assert_eq!(created.email, None);

    let later = t0() + Duration::days(1);
    let updated = ProfileRepo::upsert(&pool, &new_profile("U1", "cloud engineer", "Intermediate"), later)
        .await
        .unwrap();
    assert_eq!(updated.summary_text, "cloud engineer");
    assert_eq!(updated.current_level, "Intermediate");
    assert_eq!(updated.created_at, t0());
    assert_eq!(updated.updated_at, later);
}

#[sqlx::test(migrations = "./migrations")]
async fn find_profile(pool: SqlitePool) {
    assert!(ProfileRepo::find(&pool, "U1").await.unwrap().is_none());

    ProfileRepo::upsert(&pool, &new_profile("U1", "backend dev", "Beginner"), t0())
        .await
        .unwrap();

    let profile = ProfileRepo::find(&pool, "U1").await.unwrap().unwrap();
    assert_eq!(profile.owner_id, "U1");
    assert_eq!(profile.summary_text, "backend dev");
}

#[sqlx::test(migrations = "./migrations")]
async fn record_completion_bumps_progress_and_keeps_summary(pool: SqlitePool) {
    ProfileRepo::upsert(&pool, &new_profile("U1", "backend dev", "Beginner"), t0())
        .await
        .unwrap();

    let finished = t0() + Duration::minutes(10);
    ProfileRepo::record_completion(&pool, "U1", finished)
        .await
        .unwrap();
    let profile = ProfileRepo::record_completion(&pool, "U1", finished)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(profile.completed_lessons, 2);
    assert_eq!(profile.last_lesson_at, Some(finished));
    assert_eq!(profile.summary_text, "backend dev");
}

#[sqlx::test(migrations = "./migrations")]
async fn record_completion_for_missing_profile_returns_none(pool: SqlitePool) {
    let result = ProfileRepo::record_completion(&pool, "ghost", t0())
        .await
        .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn email_is_set_and_survives_reonboarding(pool: SqlitePool) {
    assert!(!ProfileRepo::set_email(&pool, "U1", "u1@example.com", t0())
        .await
        .unwrap());

    ProfileRepo::upsert(&pool, &new_profile("U1", "backend dev", "Beginner"), t0())
        .await
        .unwrap();
    assert!(ProfileRepo::set_email(&pool, "U1", "u1@example.com", t0())
        .await
        .unwrap());

    let again = ProfileRepo::upsert(&pool, &new_profile("U1", "cloud engineer", "Beginner"), t0())
        .await
        .unwrap();
    assert_eq!(again.email.as_deref(), Some("u1@example.com"));
}
