mod lead;
mod signup_submission;
mod verification_token;

pub use lead::Lead;
pub use signup_submission::SignupSubmission;
pub use verification_token::{BETA_SIGNUP_ACTION, VerificationToken};
