use crate::domain::{Lead, VerificationToken};

pub struct SignupSubmission {
    pub lead: Lead,
    pub verification_token: Option<VerificationToken>,
}

impl SignupSubmission {
    pub fn new(lead: Lead, verification_token: Option<String>) -> Self {
        Self {
            lead,
            verification_token: verification_token.and_then(|t| VerificationToken::parse(t).ok()),
        }
    }
}
