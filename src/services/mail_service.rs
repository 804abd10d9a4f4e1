use reqwest::Client;
use serde_json::json;
use tracing::{error, info};

/// Verification-email dispatch through an HTTP mail webhook. Delivery is
/// best-effort: failures are logged and never fail the calling request, so a
/// user row can exist without a deliverable verification email.
#[derive(Clone)]
pub struct MailService {
    client: Client,
    webhook_url: Option<String>,
    from: String,
    origin: String,
}

impl MailService {
    pub fn new(client: Client, webhook_url: Option<String>, from: String, origin: String) -> Self {
        Self {
            client,
            webhook_url,
            from,
            origin,
        }
    }

    pub async fn send_verification_email(&self, name: &str, email: &str, token: &str) {
        let verify_url = format!(
            "{}/user/verify-email?token={}&email={}",
            self.origin, token, email
        );
        let html = format!(
            "<h4>Hello {}</h4>\
             <p>Please confirm your email by clicking the following link:</p>\
             <a href=\"{}\">Verify Email</a>\
             <p>If you did not create this account, please ignore this email.</p>",
            name, verify_url
        );

        let Some(url) = &self.webhook_url else {
            info!(to = email, "mail webhook not configured, skipping verification email");
            return;
        };

        let payload = json!({
            "from": self.from,
            "to": email,
            "subject": "Email Verification",
            "html": html,
        });

        match self.client.post(url).json(&payload).send().await {
            Ok(resp) if resp.status().is_success() => {
                info!(to = email, "verification email dispatched");
            }
            Ok(resp) => {
                error!(to = email, status = %resp.status(), "mail webhook rejected message");
            }
            Err(err) => {
                error!(to = email, error = %err, "failed to dispatch verification email");
            }
        }
    }
}
