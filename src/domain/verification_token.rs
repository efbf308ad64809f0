use secrecy::{ExposeSecret, Secret};

/// Action name the widget tags beta signup tokens with.
pub const BETA_SIGNUP_ACTION: &str = "beta_signup";

/// One-time proof issued by the reCAPTCHA widget.
#[derive(Debug)]
pub struct VerificationToken(Secret<String>);

impl VerificationToken {
    /// An empty token is indistinguishable from a missing one.
    pub fn parse(s: String) -> Result<VerificationToken, String> {
        if s.is_empty() {
            Err("The reCAPTCHA token is empty.".to_string())
        } else {
            Ok(Self(Secret::new(s)))
        }
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}
