//! Email service HTTP client.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};

use super::dto::{SendEmailRequest, TemplateParams};
use crate::domain::entities::ContactForm;
use crate::domain::errors::ContactError;
use crate::domain::ports::ContactPort;
use crate::infrastructure::config::ContactConfig;

/// Sends contact messages through an EmailJS compatible REST endpoint.
#[derive(Debug, Clone)]
pub struct EmailClient {
    client: Client,
    config: ContactConfig,
}

impl EmailClient {
    /// Creates a client for the configured email service.
    ///
    /// An unconfigured service is accepted here and reported on `send`.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(config: &ContactConfig) -> Result<Self, ContactError> {
        let client = Client::builder()
            .user_agent(format!("{}/{}", crate::NAME, crate::VERSION))
            .timeout(config.timeout())
            .build()
            .map_err(|e| ContactError::unexpected(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn request<'a>(&'a self, form: &'a ContactForm) -> SendEmailRequest<'a> {
        SendEmailRequest {
            service_id: &self.config.service_id,
            template_id: &self.config.template_id,
            user_id: &self.config.public_key,
            template_params: TemplateParams {
                from_name: form.name.trim(),
                from_email: form.email.trim(),
                message: form.message.trim(),
                to_name: self.config.recipient_name.as_deref(),
            },
        }
    }
}

#[async_trait]
impl ContactPort for EmailClient {
    async fn send(&self, form: &ContactForm) -> Result<(), ContactError> {
        if !self.config.is_configured() {
            warn!("Email service credentials are missing");
            return Err(ContactError::NotConfigured);
        }

        debug!(endpoint = %self.config.endpoint, "Sending contact message");
        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&self.request(form))
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to reach email service");
                if e.is_timeout() {
                    ContactError::network("request timed out")
                } else if e.is_connect() {
                    ContactError::network("failed to connect to email service")
                } else {
                    ContactError::network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.trim().is_empty() {
                format!("HTTP {status}")
            } else {
                body.trim().to_string()
            };
            warn!(status = status.as_u16(), message = %message, "Email service rejected message");
            return Err(ContactError::rejected(status.as_u16(), message));
        }

        info!("Contact message sent");
        Ok(())
    }
}
