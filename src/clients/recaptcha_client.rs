use crate::domain::VerificationToken;
use anyhow::Context;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

pub struct RecaptchaClient {
    pub base_url: String,
    pub secret_key: Secret<String>,
    pub http_client: Client,
}

impl RecaptchaClient {
    pub fn new(base_url: String, secret_key: Secret<String>, timeout: std::time::Duration) -> Self {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build the reCAPTCHA HTTP client.");

        Self {
            base_url,
            secret_key,
            http_client,
        }
    }

    /// Whether the verification service vouches for `token`.
    ///
    /// An unreachable service or an unreadable answer counts as a rejection;
    /// the cause only ends up in the logs.
    #[tracing::instrument(name = "Verifying reCAPTCHA token", skip_all)]
    pub async fn verify(&self, token: &VerificationToken) -> bool {
        match self.site_verify(token).await {
            Ok(response) => {
                if !response.success {
                    tracing::warn!(
                        error_codes = ?response.error_codes,
                        "The reCAPTCHA token was rejected."
                    );
                }
                response.success
            }
            Err(e) => {
                tracing::warn!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Failed to verify the reCAPTCHA token."
                );
                false
            }
        }
    }

    pub async fn site_verify(
        &self,
        token: &VerificationToken,
    ) -> Result<SiteVerifyResponse, anyhow::Error> {
        let url = format!("{}/siteverify", self.base_url);
        let request_body = SiteVerifyRequest {
            secret: self.secret_key.expose_secret(),
            response: token.expose(),
        };

        let response: SiteVerifyResponse = self
            .http_client
            .post(&url)
            .form(&request_body)
            .send()
            .await
            .context("Failed to reach the reCAPTCHA verification service.")?
            .json()
            .await
            .context("Failed to read the reCAPTCHA verification response.")?;

        Ok(response)
    }
}

#[derive(Serialize)]
struct SiteVerifyRequest<'a> {
    secret: &'a str,
    response: &'a str,
}

// https://developers.google.com/recaptcha/docs/verify#api-response
#[derive(Deserialize, Debug)]
pub struct SiteVerifyResponse {
    pub success: bool,
    #[serde(default, rename = "error-codes")]
    pub error_codes: Vec<String>,
}
