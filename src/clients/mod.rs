pub mod marketing_client;
pub mod recaptcha_client;
