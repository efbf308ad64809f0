//! The browser side of the beta signup: gather the contact fields, get a
//! fresh reCAPTCHA token, post everything to `/api/beta-signup` and turn the
//! envelope that comes back into a message for the visitor.
use crate::domain::BETA_SIGNUP_ACTION;
use crate::utils::ResponseEnvelope;
use reqwest::Client;
use reqwest::multipart::Form;
use secrecy::{ExposeSecret, Secret};
use std::future::Future;

pub const WIDGET_NOT_READY_MESSAGE: &str = "reCAPTCHA not ready. Please try again.";
pub const EMPTY_TOKEN_MESSAGE: &str = "Failed to generate reCAPTCHA token";
pub const UNKNOWN_FAILURE_MESSAGE: &str = "Something went wrong";
pub const FALLBACK_MESSAGE: &str = "An error occurred. Please try again later.";

/// Anything able to hand out a one-time verification token for an action.
pub trait TokenProvider {
    fn execute(&self, action: &str) -> impl Future<Output = Result<String, anyhow::Error>> + Send;
}

/// Hands out a token that was obtained elsewhere, e.g. pasted by an operator.
pub struct StaticTokenProvider(Secret<String>);

impl StaticTokenProvider {
    pub fn new(token: Secret<String>) -> Self {
        Self(token)
    }
}

impl TokenProvider for StaticTokenProvider {
    async fn execute(&self, _action: &str) -> Result<String, anyhow::Error> {
        Ok(self.0.expose_secret().clone())
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct SignupForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl SignupForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormMessage {
    Success(String),
    Error(String),
}

impl FormMessage {
    pub fn text(&self) -> &str {
        match self {
            FormMessage::Success(text) => text,
            FormMessage::Error(text) => text,
        }
    }
}

pub struct SignupFormClient<P> {
    pub endpoint: String,
    pub http_client: Client,
    pub token_provider: Option<P>,
}

impl<P: TokenProvider> SignupFormClient<P> {
    /// `token_provider` is `None` while the widget is still loading.
    pub fn new(base_url: String, token_provider: Option<P>) -> Self {
        Self {
            endpoint: format!("{}/api/beta-signup", base_url),
            http_client: Client::new(),
            token_provider,
        }
    }

    /// Submits `form` and resets it if, and only if, the signup went through.
    #[tracing::instrument(name = "Submitting the beta signup form", skip_all)]
    pub async fn submit(&self, form: &mut SignupForm) -> FormMessage {
        let Some(token_provider) = &self.token_provider else {
            return FormMessage::Error(WIDGET_NOT_READY_MESSAGE.to_string());
        };

        let token = match token_provider.execute(BETA_SIGNUP_ACTION).await {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(error.cause_chain = ?e, "Failed to obtain a reCAPTCHA token.");
                return FormMessage::Error(FALLBACK_MESSAGE.to_string());
            }
        };
        if token.is_empty() {
            return FormMessage::Error(EMPTY_TOKEN_MESSAGE.to_string());
        }

        let message = match self.post(form, token).await {
            Ok((status, envelope)) if status.is_success() => {
                FormMessage::Success(envelope.message)
            }
            Ok((_, envelope)) if envelope.message.is_empty() => {
                FormMessage::Error(UNKNOWN_FAILURE_MESSAGE.to_string())
            }
            Ok((_, envelope)) => FormMessage::Error(envelope.message),
            Err(e) => {
                tracing::warn!(error.cause_chain = ?e, "Failed to submit the signup form.");
                FormMessage::Error(FALLBACK_MESSAGE.to_string())
            }
        };

        if let FormMessage::Success(_) = message {
            form.reset();
        }
        message
    }

    async fn post(
        &self,
        form: &SignupForm,
        token: String,
    ) -> Result<(reqwest::StatusCode, ResponseEnvelope), reqwest::Error> {
        let multipart = Form::new()
            .text("firstName", form.first_name.clone())
            .text("lastName", form.last_name.clone())
            .text("email", form.email.clone())
            .text("recaptchaToken", token);

        let response = self
            .http_client
            .post(&self.endpoint)
            .multipart(multipart)
            .send()
            .await?;
        let status = response.status();
        let envelope: ResponseEnvelope = response.json().await?;

        Ok((status, envelope))
    }
}
