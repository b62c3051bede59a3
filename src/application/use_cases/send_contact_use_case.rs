//! Contact form submission use case implementation.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::services::ToastQueue;
use crate::domain::entities::ContactForm;
use crate::domain::errors::ContactError;
use crate::domain::ports::ContactPort;

const SENT_MESSAGE: &str = "Message sent successfully! I'll get back to you soon.";
const INVALID_MESSAGE: &str = "Please fix the errors in the form";

/// Validates and delivers a contact form, reporting the outcome as a toast.
#[derive(Clone)]
pub struct SendContactUseCase {
    contact: Arc<dyn ContactPort>,
    toasts: ToastQueue,
    direct_email: Option<String>,
}

impl SendContactUseCase {
    /// Creates new contact use case. `direct_email` is suggested to the
    /// visitor when delivery fails.
    #[must_use]
    pub const fn new(
        contact: Arc<dyn ContactPort>,
        toasts: ToastQueue,
        direct_email: Option<String>,
    ) -> Self {
        Self {
            contact,
            toasts,
            direct_email,
        }
    }

    /// Submits `form`.
    ///
    /// Invalid forms are never sent. Every outcome shows exactly one toast.
    ///
    /// # Errors
    /// Returns `ContactError::Invalid` with the field errors, or the delivery
    /// error.
    pub async fn execute(&self, form: &ContactForm) -> Result<(), ContactError> {
        if let Err(errors) = form.validate() {
            warn!(problems = errors.len(), "Contact form rejected");
            self.toasts.error(INVALID_MESSAGE);
            return Err(ContactError::Invalid { errors });
        }

        match self.contact.send(form).await {
            Ok(()) => {
                info!("Contact form delivered");
                self.toasts.success(SENT_MESSAGE);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to deliver contact form");
                self.toasts.error(self.failure_message(&e));
                Err(e)
            }
        }
    }

    /// Visitor facing text for a delivery failure.
    #[must_use]
    pub fn failure_message(&self, error: &ContactError) -> String {
        let (summary, suggest_direct) = match error {
            ContactError::Invalid { .. } => return INVALID_MESSAGE.to_string(),
            ContactError::Network { .. } => {
                ("Network error. Please check your connection and try again.", false)
            }
            ContactError::NotConfigured => ("Email service is not configured.", true),
            ContactError::Rejected { status: 412, .. } => {
                ("Email service temporarily unavailable.", true)
            }
            ContactError::Rejected { message, .. }
                if message.contains("insufficient authentication scopes")
                    || message.contains("Gmail_API") =>
            {
                ("Email service needs reconfiguration.", true)
            }
            ContactError::Rejected { .. } | ContactError::Unexpected { .. } => {
                ("Failed to send email.", true)
            }
        };

        match (&self.direct_email, suggest_direct) {
            (Some(email), true) => format!("{summary} Please contact me directly at {email}"),
            _ => summary.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ToastKind;
    use crate::domain::errors::FieldError;
    use crate::domain::ports::mocks::MockContactPort;
    use test_case::test_case;

    fn valid_form() -> ContactForm {
        ContactForm::new("Ada", "ada@example.com", "Loved the projects page!")
    }

    fn use_case(port: MockContactPort) -> (SendContactUseCase, Arc<MockContactPort>, ToastQueue) {
        let port = Arc::new(port);
        let toasts = ToastQueue::default();
        let use_case = SendContactUseCase::new(
            port.clone(),
            toasts.clone(),
            Some("owner@example.com".to_string()),
        );
        (use_case, port, toasts)
    }

    #[tokio::test]
    async fn test_valid_form_is_sent_with_success_toast() {
        let (use_case, port, toasts) = use_case(MockContactPort::default());

        use_case.execute(&valid_form()).await.unwrap();

        assert_eq!(port.sent_count(), 1);
        let shown = toasts.toasts();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].kind, ToastKind::Success);
        assert_eq!(shown[0].message, SENT_MESSAGE);
    }

    #[tokio::test]
    async fn test_invalid_form_is_not_sent() {
        let (use_case, port, toasts) = use_case(MockContactPort::default());
        let form = ContactForm::new("Ada", "ada@", "short");

        let err = use_case.execute(&form).await.unwrap_err();

        assert_eq!(
            err.field_errors(),
            &[FieldError::InvalidEmail, FieldError::MessageTooShort { min: 10 }]
        );
        assert_eq!(port.sent_count(), 0);
        let shown = toasts.toasts();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].kind, ToastKind::Error);
        assert_eq!(shown[0].message, INVALID_MESSAGE);
    }

    #[tokio::test]
    async fn test_delivery_failure_shows_error_toast() {
        let (use_case, _port, toasts) = use_case(MockContactPort::failing(ContactError::NotConfigured));

        let err = use_case.execute(&valid_form()).await.unwrap_err();

        assert_eq!(err, ContactError::NotConfigured);
        let shown = toasts.toasts();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].kind, ToastKind::Error);
        assert_eq!(
            shown[0].message,
            "Email service is not configured. Please contact me directly at owner@example.com"
        );
    }

    #[test_case(ContactError::network("connection reset"), "Network error. Please check your connection and try again." ; "network")]
    #[test_case(ContactError::rejected(412, "Gmail_API: precondition"), "Email service temporarily unavailable. Please contact me directly at owner@example.com" ; "precondition_failed")]
    #[test_case(ContactError::rejected(400, "insufficient authentication scopes"), "Email service needs reconfiguration. Please contact me directly at owner@example.com" ; "scopes")]
    #[test_case(ContactError::rejected(500, "boom"), "Failed to send email. Please contact me directly at owner@example.com" ; "server_error")]
    fn test_failure_messages(error: ContactError, expected: &str) {
        let (use_case, _, _) = use_case(MockContactPort::default());
        assert_eq!(use_case.failure_message(&error), expected);
    }

    #[test]
    fn test_failure_message_without_direct_email() {
        let use_case = SendContactUseCase::new(
            Arc::new(MockContactPort::default()),
            ToastQueue::default(),
            None,
        );
        assert_eq!(
            use_case.failure_message(&ContactError::NotConfigured),
            "Email service is not configured."
        );
    }
}
