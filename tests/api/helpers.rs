use beta_signup::configuration::{Settings, get_configuration};
use beta_signup::startup::Application;
use beta_signup::telemetry::{get_subscriber, init_subscriber};
use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use reqwest::multipart::Form;
use std::sync::LazyLock;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// Ensure that the `tracing` stack is only initialised once
static TRACING: LazyLock<()> = LazyLock::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    };
});

pub struct TestApp {
    pub address: String,
    pub recaptcha_server: MockServer,
    pub marketing_server: MockServer,
    pub api_client: reqwest::Client,
}

/// Contact details as the signup form would submit them.
pub struct TestLead {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl TestLead {
    pub fn generate() -> Self {
        Self {
            email: SafeEmail().fake(),
            first_name: FirstName().fake(),
            last_name: LastName().fake(),
        }
    }

    pub fn form(&self) -> Form {
        Form::new()
            .text("email", self.email.clone())
            .text("firstName", self.first_name.clone())
            .text("lastName", self.last_name.clone())
    }

    pub fn form_with_token(&self, token: &str) -> Form {
        self.form().text("recaptchaToken", token.to_string())
    }
}

impl TestApp {
    pub async fn post_beta_signup(&self, form: Form) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/api/beta-signup", &self.address))
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_client_config(&self) -> reqwest::Response {
        self.api_client
            .get(&format!("{}/api/client-config", &self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// A browser's CORS preflight ahead of a multipart signup.
    pub async fn preflight_beta_signup(&self, origin: &str) -> reqwest::Response {
        self.api_client
            .request(
                reqwest::Method::OPTIONS,
                &format!("{}/api/beta-signup", &self.address),
            )
            .header("Origin", origin)
            .header("Access-Control-Request-Method", "POST")
            .header("Access-Control-Request-Headers", "content-type")
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_health_check(&self) -> reqwest::Response {
        self.api_client
            .get(&format!("{}/health_check", &self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// The verification service answers every token with `success`.
    pub async fn mock_recaptcha(&self, success: bool, expected_calls: u64) {
        Mock::given(path("/siteverify"))
            .and(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"success": success})),
            )
            .named("reCAPTCHA siteverify")
            .expect(expected_calls)
            .mount(&self.recaptcha_server)
            .await;
    }

    /// The intake service answers every lead with `status`.
    pub async fn mock_marketing(&self, status: u16, expected_calls: u64) {
        Mock::given(path("/marketing"))
            .and(method("POST"))
            .respond_with(ResponseTemplate::new(status))
            .named("Marketing intake")
            .expect(expected_calls)
            .mount(&self.marketing_server)
            .await;
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

/// Like `spawn_app`, with a last chance to tweak the configuration.
pub async fn spawn_app_with(customise: impl FnOnce(&mut Settings)) -> TestApp {
    LazyLock::force(&TRACING);

    // Launch mock servers to stand in for reCAPTCHA and the marketing API
    let recaptcha_server = MockServer::start().await;
    let marketing_server = MockServer::start().await;

    // Randomise configuration to ensure test isolation
    let configuration = {
        let mut c = get_configuration().expect("Failed to read configuration.");
        // Use a random OS port
        c.application.port = 0;
        c.recaptcha.base_url = recaptcha_server.uri();
        c.recaptcha.timeout_milliseconds = 2000;
        c.marketing_api.base_url = marketing_server.uri();
        c.marketing_api.timeout_milliseconds = 2000;
        customise(&mut c);
        c
    };

    // Launch the application as a background task
    let application = Application::build(configuration)
        .await
        .expect("Failed to build application.");
    let application_port = application.port();
    let _ = tokio::spawn(application.run_until_stopped());

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        address: format!("http://localhost:{}", application_port),
        recaptcha_server,
        marketing_server,
        api_client: client,
    }
}
