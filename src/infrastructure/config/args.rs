use super::app_config::LogLevel;
use crate::domain::entities::ContactForm;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "folio",
    version,
    about = "Preloads portfolio assets and reports what loaded",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", env = "FOLIO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH", env = "FOLIO_LOG_PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, env = "FOLIO_LOG_LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Origin relative asset paths are resolved against.
    #[arg(long, value_name = "URL", env = "FOLIO_BASE_URL")]
    pub base_url: Option<String>,

    /// Base URL of the content API.
    #[arg(long, value_name = "URL", env = "FOLIO_API_BASE_URL")]
    pub api_base_url: Option<String>,

    /// Default toast lifetime in milliseconds.
    #[arg(long, value_name = "MS")]
    pub toast_duration_ms: Option<u64>,

    /// Image fetch timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Route to navigate to after startup. May be repeated.
    #[arg(short, long = "route", value_name = "PATH")]
    pub routes: Vec<String>,

    /// Also load achievements, projects and the resume link.
    #[arg(long)]
    pub content: bool,

    /// Email service id for the contact form.
    #[arg(long, value_name = "ID", env = "FOLIO_EMAIL_SERVICE_ID")]
    pub email_service_id: Option<String>,

    /// Email template id for the contact form.
    #[arg(long, value_name = "ID", env = "FOLIO_EMAIL_TEMPLATE_ID")]
    pub email_template_id: Option<String>,

    /// Email service public key.
    #[arg(long, value_name = "KEY", env = "FOLIO_EMAIL_PUBLIC_KEY", hide_env_values = true)]
    pub email_public_key: Option<String>,

    /// Sends a contact message as this sender. Needs `--contact-email` and
    /// `--contact-message`.
    #[arg(
        long,
        value_name = "NAME",
        requires = "contact_email",
        requires = "contact_message"
    )]
    pub contact_name: Option<String>,

    /// Reply address for the contact message.
    #[arg(long, value_name = "EMAIL", requires = "contact_name")]
    pub contact_email: Option<String>,

    /// Contact message body.
    #[arg(long, value_name = "TEXT", requires = "contact_name")]
    pub contact_message: Option<String>,
}

impl CliArgs {
    /// Contact form assembled from the `--contact-*` flags.
    #[must_use]
    pub fn contact_form(&self) -> Option<ContactForm> {
        Some(ContactForm::new(
            self.contact_name.clone()?,
            self.contact_email.clone()?,
            self.contact_message.clone()?,
        ))
    }
}
