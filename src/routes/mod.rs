pub mod beta_signup;
pub mod client_config;
pub mod health_check;
