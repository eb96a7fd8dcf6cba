//! Outbound delivery of daily lessons.
//!
//! [`LessonMailer`] is the seam the daily-lesson workflow sends through;
//! [`SmtpMailer`] is the production implementation over `lettre`.

pub mod email;
pub mod message;

use async_trait::async_trait;

pub use email::{EmailConfig, SmtpMailer};
pub use message::{DailyLessonEmail, OutgoingEmail};

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

/// Something that hands one finished email to a mail system.
#[async_trait]
pub trait LessonMailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), DeliveryError>;
}

/// Check that `address` is a deliverable mailbox address.
pub fn validate_address(address: &str) -> Result<(), DeliveryError> {
    address.trim().parse::<lettre::Address>()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn plain_address_is_accepted() {
        assert!(validate_address("learner@example.com").is_ok());
    }

    #[test]
    fn malformed_address_is_rejected() {
        assert_matches!(validate_address("not-an-email"), Err(DeliveryError::Address(_)));
        assert_matches!(validate_address("a@"), Err(DeliveryError::Address(_)));
    }

    #[test]
    fn build_error_display() {
        let err = DeliveryError::Build("missing body".to_string());
        assert_eq!(err.to_string(), "Email build error: missing body");
    }
}
