//! Email service wire structures.

use serde::Serialize;

/// Body of a send request.
#[derive(Debug, Serialize)]
pub struct SendEmailRequest<'a> {
    pub service_id: &'a str,
    pub template_id: &'a str,
    pub user_id: &'a str,
    pub template_params: TemplateParams<'a>,
}

/// Values substituted into the email template.
#[derive(Debug, Serialize)]
pub struct TemplateParams<'a> {
    pub from_name: &'a str,
    pub from_email: &'a str,
    pub message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_name: Option<&'a str>,
}
