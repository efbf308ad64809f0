use anyhow::Result;
use beta_signup::configuration::get_configuration;
use beta_signup::signup_form::{FormMessage, SignupForm, SignupFormClient, StaticTokenProvider};
use secrecy::Secret;
use std::io::{self, Write};

fn prompt(label: &str) -> String {
    print!("{}", label);
    io::stdout().flush().unwrap();

    let mut value = String::new();
    io::stdin()
        .read_line(&mut value)
        .expect("Failed to read line");
    value.trim().to_string()
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let configuration = get_configuration().expect("Failed to read configuration.");

    let mut form = SignupForm {
        first_name: prompt("Enter first name: "),
        last_name: prompt("Enter last name: "),
        email: prompt("Enter email: "),
    };
    let token =
        rpassword::prompt_password("Enter reCAPTCHA token: ").expect("Failed to read line.");
    let token_provider = StaticTokenProvider::new(Secret::new(token.trim().to_string()));

    let form_client =
        SignupFormClient::new(configuration.application.base_url, Some(token_provider));
    match form_client.submit(&mut form).await {
        FormMessage::Success(text) => println!("{}", text),
        FormMessage::Error(text) => eprintln!("Signup failed: {}", text),
    }

    Ok(())
}
