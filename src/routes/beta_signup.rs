use crate::clients::marketing_client::MarketingClient;
use crate::clients::recaptcha_client::RecaptchaClient;
use crate::domain::{Lead, SignupSubmission};
use crate::utils::{ResponseEnvelope, error_chain_fmt};
use actix_multipart::form::MultipartForm;
use actix_multipart::form::text::Text;
use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError, post, web};
use anyhow::Context;

pub const SIGNUP_SUCCEEDED_MESSAGE: &str =
    "Thank you for joining our beta! We'll be in touch soon.";
pub const SIGNUP_FAILED_MESSAGE: &str =
    "Sorry, there was an error processing your request. Please try again later.";

#[derive(MultipartForm)]
pub struct BetaSignupFormData {
    email: Option<Text<String>>,
    #[multipart(rename = "firstName")]
    first_name: Option<Text<String>>,
    #[multipart(rename = "lastName")]
    last_name: Option<Text<String>>,
    #[multipart(rename = "recaptchaToken")]
    recaptcha_token: Option<Text<String>>,
}

impl From<BetaSignupFormData> for SignupSubmission {
    fn from(form: BetaSignupFormData) -> Self {
        let lead = Lead {
            email: form.email.map(Text::into_inner),
            first_name: form.first_name.map(Text::into_inner),
            last_name: form.last_name.map(Text::into_inner),
        };

        SignupSubmission::new(lead, form.recaptcha_token.map(Text::into_inner))
    }
}

#[derive(thiserror::Error)]
pub enum BetaSignupError {
    #[error("No reCAPTCHA token provided")]
    MissingToken,
    #[error("reCAPTCHA validation failed")]
    VerificationFailed,
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for BetaSignupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for BetaSignupError {
    fn status_code(&self) -> StatusCode {
        match self {
            BetaSignupError::MissingToken => StatusCode::BAD_REQUEST,
            BetaSignupError::VerificationFailed => StatusCode::BAD_REQUEST,
            BetaSignupError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // The cause of a 500 stays in the logs.
    fn error_response(&self) -> HttpResponse {
        let envelope = match self {
            BetaSignupError::UnexpectedError(_) => {
                ResponseEnvelope::failure(SIGNUP_FAILED_MESSAGE)
            }
            _ => ResponseEnvelope::failure(&self.to_string()),
        };

        HttpResponse::build(self.status_code())
            .content_type(ContentType::json())
            .json(envelope)
    }
}

#[post("/api/beta-signup")]
#[tracing::instrument(
    name = "Signing up for the beta",
    skip_all,
    fields(lead_email = tracing::field::Empty)
)]
pub async fn post(
    form: Result<MultipartForm<BetaSignupFormData>, actix_web::Error>,
    recaptcha_client: web::Data<RecaptchaClient>,
    marketing_client: web::Data<MarketingClient>,
) -> Result<HttpResponse, BetaSignupError> {
    let form = form
        .map_err(|e| anyhow::anyhow!("{}", e))
        .context("Failed to read the signup form.")?;
    let submission = SignupSubmission::from(form.into_inner());
    if let Some(email) = &submission.lead.email {
        tracing::Span::current().record("lead_email", tracing::field::display(email));
    }
    let token = submission
        .verification_token
        .ok_or(BetaSignupError::MissingToken)?;

    if !recaptcha_client.verify(&token).await {
        return Err(BetaSignupError::VerificationFailed);
    }

    marketing_client
        .submit_lead(&submission.lead)
        .await
        .context("Failed to submit the lead to the marketing API.")?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .json(ResponseEnvelope::success(SIGNUP_SUCCEEDED_MESSAGE)))
}
