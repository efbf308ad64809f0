use crate::domain::Lead;
use reqwest::Client;
use reqwest::header::ACCEPT;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;

pub struct MarketingClient {
    pub base_url: String,
    pub api_key: Secret<String>,
    pub campaign: String,
    pub http_client: Client,
}

impl MarketingClient {
    pub fn new(
        base_url: String,
        api_key: Secret<String>,
        campaign: String,
        timeout: std::time::Duration,
    ) -> Self {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build the marketing API HTTP client.");

        Self {
            base_url,
            api_key,
            campaign,
            http_client,
        }
    }

    /// Records `lead` under the configured campaign.
    ///
    /// Anything but a 2xx from the intake service is an error.
    #[tracing::instrument(name = "Submitting lead to the marketing API", skip_all, fields(campaign = %self.campaign))]
    pub async fn submit_lead(&self, lead: &Lead) -> Result<(), reqwest::Error> {
        let url = format!("{}/marketing", self.base_url);
        let request_body = SubmitLeadRequest {
            campaign: &self.campaign,
            email: lead.email.as_deref(),
            first_name: lead.first_name.as_deref(),
            last_name: lead.last_name.as_deref(),
        };

        self.http_client
            .post(&url)
            .header("X-API-Key", self.api_key.expose_secret())
            .header(ACCEPT, "application/json")
            .json(&request_body)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}

#[derive(Serialize)]
struct SubmitLeadRequest<'a> {
    campaign: &'a str,
    email: Option<&'a str>,
    first_name: Option<&'a str>,
    last_name: Option<&'a str>,
}
