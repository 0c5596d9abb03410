//! Budget alert delivery through the Brevo transactional email API.
//!
//! The dispatcher never returns an error: every provider failure is folded
//! into a [`DispatchOutcome`] and logged, so callers can fire and forget.

use serde::Serialize;

use crate::config::EmailConfig;
use crate::constants::{ALERT_SENDER_NAME, ALERT_SUBJECT};

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct EmailAddress {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Request body of the provider's send endpoint.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AlertEmail {
    pub sender: EmailAddress,
    pub to: Vec<EmailAddress>,
    pub subject: String,
    pub text_content: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// No credential configured, nothing was sent.
    Skipped,
    Sent { message: String },
    Failed { error: String },
}

impl DispatchOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, DispatchOutcome::Sent { .. })
    }
}

pub fn compose_alert(total_spent: f64, limit: f64, config: &EmailConfig) -> AlertEmail {
    let text_content = format!(
        "Dear Administrator,\n\n\
         Your company's total spending has exceeded the budget limit of ${limit:.2}.\n\
         The current total spending is ${total_spent:.2}.\n\n\
         Action required: Please review the expense dashboard immediately.\n"
    );

    AlertEmail {
        sender: EmailAddress {
            email: config.sender.clone(),
            name: Some(ALERT_SENDER_NAME.to_string()),
        },
        to: vec![EmailAddress {
            email: config.recipient.clone(),
            name: None,
        }],
        subject: ALERT_SUBJECT.to_string(),
        text_content,
    }
}

#[derive(Debug, Clone)]
pub struct EmailDispatcher {
    config: EmailConfig,
    http: reqwest::Client,
}

impl EmailDispatcher {
    pub fn new(config: EmailConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    pub async fn send_budget_alert(&self, total_spent: f64, limit: f64) -> DispatchOutcome {
        let Some(api_key) = self.config.api_key.as_deref() else {
            tracing::warn!("budget alert skipped: EMAIL_API_KEY is not set");
            return DispatchOutcome::Skipped;
        };

        let email = compose_alert(total_spent, limit, &self.config);

        let res = match self
            .http
            .post(&self.config.api_url)
            .header("api-key", api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&email)
            .send()
            .await
        {
            Ok(res) => res,
            Err(err) => {
                tracing::error!("error sending budget alert email: {err}");
                return DispatchOutcome::Failed {
                    error: "Email service failed to send".to_string(),
                };
            }
        };

        let status = res.status();
        if status.is_success() {
            tracing::info!(recipient = %self.config.recipient, "budget alert email sent");
            return DispatchOutcome::Sent {
                message: format!("Email sent to {}", self.config.recipient),
            };
        }

        let body = res
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        tracing::error!(%status, "error sending budget alert email: {body}");
        DispatchOutcome::Failed {
            error: "Email service failed to send".to_string(),
        }
    }
}
