//! Daily micro-lesson delivery: a short plain-text lesson on the learner's
//! first skill gap, sent by email.
//!
//! Progress is recorded only after the mail system accepted the message.

use std::sync::Arc;

use chrono::Utc;
use microlearn_core::error::CoreError;
use microlearn_core::lesson::validate_id;
use microlearn_core::prompt::{build_daily_prompt, daily_topic};
use microlearn_db::repositories::ProfileRepo;
use microlearn_db::DbPool;
use microlearn_delivery::{DailyLessonEmail, LessonMailer};
use microlearn_generation::{GenerationError, TextGenerator};

use crate::progression::{not_found, record_progress, ProgressionError};

/// What was sent, and to whom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub topic: String,
    pub email: String,
}

/// Generates and emails daily lessons.
///
/// `generator` is expected to be configured for short output; the daily
/// lesson is prose, not the structured lesson JSON.
#[derive(Clone)]
pub struct DailyLessonSender {
    pool: DbPool,
    generator: Arc<dyn TextGenerator>,
    mailer: Arc<dyn LessonMailer>,
}

impl DailyLessonSender {
    pub fn new(
        pool: DbPool,
        generator: Arc<dyn TextGenerator>,
        mailer: Arc<dyn LessonMailer>,
    ) -> Self {
        Self {
            pool,
            generator,
            mailer,
        }
    }

    /// Generate today's lesson for `owner_id` and email it.
    ///
    /// Fails with `NotFound` for an unknown learner and `Validation` when
    /// the profile has no email address. Nothing is recorded unless the
    /// email was handed off successfully.
    pub async fn deliver(&self, owner_id: &str) -> Result<DeliveryReceipt, ProgressionError> {
        validate_id("userId", owner_id)?;

        let profile = ProfileRepo::find(&self.pool, owner_id)
            .await?
            .ok_or_else(|| not_found("Learner profile", owner_id))?;

        let email = profile
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| CoreError::Validation("Learner email missing".to_string()))?;

        let topic = daily_topic(&profile.skill_gaps.0);
        let content = self.generator.generate(&build_daily_prompt(topic)).await?;
        let content = content.trim();
        if content.is_empty() {
            return Err(GenerationError::MalformedResponse(
                "daily lesson text is empty".to_string(),
            )
            .into());
        }

        let sent_at = Utc::now();
        let message = DailyLessonEmail {
            topic,
            content,
            sent_on: sent_at.date_naive(),
        }
        .to_outgoing(email);

        if let Err(e) = self.mailer.send(&message).await {
            tracing::error!(owner_id, error = %e, "Daily lesson email failed");
            return Err(e.into());
        }
        tracing::info!(owner_id, topic, "Daily lesson delivered");

        record_progress(&self.pool, owner_id, sent_at).await;

        Ok(DeliveryReceipt {
            topic: topic.to_string(),
            email: email.to_string(),
        })
    }
}
