use crate::helpers::{TestApp, TestLead, spawn_app_with};
use beta_signup::utils::ResponseEnvelope;
use reqwest::Method;

const CLIENT_ORIGIN: &str = "http://localhost:3000";

async fn spawn_app() -> TestApp {
    spawn_app_with(|c| c.hosts.client = CLIENT_ORIGIN.to_string()).await
}

#[tokio::test]
async fn preflight_from_the_client_origin_is_allowed() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app.preflight_beta_signup(CLIENT_ORIGIN).await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap()
            .to_str()
            .unwrap(),
        CLIENT_ORIGIN
    );
}

#[tokio::test]
async fn preflight_from_an_unknown_origin_is_rejected() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app.preflight_beta_signup("http://evil.example").await;

    // Assert
    assert_eq!(400, response.status().as_u16());
    assert!(
        response
            .headers()
            .get("access-control-allow-origin")
            .is_none()
    );
}

#[tokio::test]
async fn beta_signup_from_the_client_origin_returns_the_envelope() {
    // Arrange
    let app = spawn_app().await;
    app.mock_recaptcha(true, 1).await;
    app.mock_marketing(201, 1).await;

    // Act
    let response = app
        .api_client
        .request(Method::POST, format!("{}/api/beta-signup", &app.address))
        .header("Origin", CLIENT_ORIGIN)
        .multipart(TestLead::generate().form_with_token("valid-tok"))
        .send()
        .await
        .expect("Failed to execute request.");

    // Assert
    assert_eq!(200, response.status().as_u16());
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap()
            .to_str()
            .unwrap(),
        CLIENT_ORIGIN
    );
    let envelope: ResponseEnvelope = response.json().await.unwrap();
    assert_eq!(
        envelope,
        ResponseEnvelope {
            success: true,
            message: "Thank you for joining our beta! We'll be in touch soon.".to_string(),
        }
    );
}
