pub mod clients;
pub mod configuration;
pub mod domain;
pub mod routes;
pub mod signup_form;
pub mod startup;
pub mod telemetry;
pub mod utils;
