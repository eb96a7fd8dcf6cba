use std::sync::Arc;

use microlearn_delivery::LessonMailer;
use microlearn_generation::TextGenerator;
use microlearn_pipeline::{DailyLessonSender, LessonWorkflow};

use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool is already `Clone`, the rest is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: microlearn_db::DbPool,
    /// Text generation provider for structured lessons.
    pub generator: Arc<dyn TextGenerator>,
    /// Text generation provider capped for the short daily lesson.
    pub daily_generator: Arc<dyn TextGenerator>,
    /// Outbound email; `None` when SMTP is not configured.
    pub mailer: Option<Arc<dyn LessonMailer>>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// A lesson workflow over this state's pool and generator.
    pub fn workflow(&self) -> LessonWorkflow {
        LessonWorkflow::new(self.pool.clone(), Arc::clone(&self.generator))
    }

    /// A daily lesson sender, if a mailer is configured.
    pub fn daily_sender(&self) -> AppResult<DailyLessonSender> {
        let mailer = self.mailer.clone().ok_or(AppError::DeliveryUnavailable)?;
        Ok(DailyLessonSender::new(
            self.pool.clone(),
            Arc::clone(&self.daily_generator),
            mailer,
        ))
    }
}
