use crate::clients::marketing_client::MarketingClient;
use crate::clients::recaptcha_client::RecaptchaClient;
use crate::configuration::Settings;
use crate::routes::{beta_signup, client_config, health_check};
use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let recaptcha_client = configuration.recaptcha.client();
        let marketing_client = configuration.marketing_api.client();
        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();
        let host_origin_url = format!("http://{}:{}", configuration.application.host, port);
        let server = run(
            listener,
            recaptcha_client,
            marketing_client,
            configuration.recaptcha.site_key,
            host_origin_url,
            configuration.hosts.client,
        )
        .await?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

async fn run(
    listener: TcpListener,
    recaptcha_client: RecaptchaClient,
    marketing_client: MarketingClient,
    recaptcha_site_key: String,
    host_origin_url: String,
    client_url: String,
) -> Result<Server, anyhow::Error> {
    let recaptcha_client = Data::new(recaptcha_client);
    let marketing_client = Data::new(marketing_client);
    let recaptcha_site_key = Data::new(RecaptchaSiteKey(recaptcha_site_key));

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(client_url.as_str())
            .allowed_origin(host_origin_url.as_str())
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(&[
                actix_web::http::header::ACCEPT,
                actix_web::http::header::CONTENT_TYPE,
            ])
            .block_on_origin_mismatch(true)
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(TracingLogger::default())
            .service(health_check::get)
            .service(client_config::get)
            .service(beta_signup::post)
            .app_data(recaptcha_client.clone())
            .app_data(marketing_client.clone())
            .app_data(recaptcha_site_key.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}

/// Public half of the reCAPTCHA key pair, handed out to the signup form.
pub struct RecaptchaSiteKey(pub String);
