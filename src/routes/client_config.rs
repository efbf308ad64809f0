use crate::domain::BETA_SIGNUP_ACTION;
use crate::startup::RecaptchaSiteKey;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, get, web};
use serde::{Deserialize, Serialize};

/// What the signup form needs to ask the widget for a token.
#[derive(Serialize, Deserialize, Debug)]
pub struct ClientConfig {
    pub recaptcha_site_key: String,
    pub recaptcha_action: String,
}

#[get("/api/client-config")]
pub async fn get(site_key: web::Data<RecaptchaSiteKey>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::json())
        .json(ClientConfig {
            recaptcha_site_key: site_key.0.clone(),
            recaptcha_action: BETA_SIGNUP_ACTION.to_string(),
        })
}
