use serde::{Deserialize, Serialize};

/// The `{success, message}` body returned by every signup response.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct ResponseEnvelope {
    pub success: bool,
    pub message: String,
}

impl ResponseEnvelope {
    pub fn success(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }

    pub fn failure(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
        }
    }
}

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;

    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }

    Ok(())
}
