//! Port definition for delivering contact form messages.

use async_trait::async_trait;

use crate::domain::entities::ContactForm;
use crate::domain::errors::ContactError;

/// Delivers a validated contact form to the site owner.
#[async_trait]
pub trait ContactPort: Send + Sync {
    /// Sends `form`. Resolves once the email service accepted it.
    async fn send(&self, form: &ContactForm) -> Result<(), ContactError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use parking_lot::Mutex;

    /// Mock email service recording every form it accepts.
    #[derive(Default)]
    pub struct MockContactPort {
        pub sent: Mutex<Vec<ContactForm>>,
        pub failure: Option<ContactError>,
    }

    impl MockContactPort {
        pub fn failing(error: ContactError) -> Self {
            Self {
                failure: Some(error),
                ..Self::default()
            }
        }

        pub fn sent_count(&self) -> usize {
            self.sent.lock().len()
        }
    }

    #[async_trait]
    impl ContactPort for MockContactPort {
        async fn send(&self, form: &ContactForm) -> Result<(), ContactError> {
            if let Some(error) = &self.failure {
                return Err(error.clone());
            }
            self.sent.lock().push(form.clone());
            Ok(())
        }
    }
}
