// Credential guard: rejects unusable credentials before any network access

use crate::errors::ExecutionError;
use crate::models::Credential;

/// Placeholder shipped in sample secrets files
pub const DEFAULT_PLACEHOLDER: &str =
    "Your coinmarketcap API key (get a free one: https://coinmarketcap.com/api/)";

/// Fail fast when the credential is empty or still a placeholder
#[tracing::instrument(skip_all)]
pub fn check_credential<S: AsRef<str>>(
    credential: &Credential,
    placeholders: &[S],
) -> Result<(), ExecutionError> {
    if credential.is_blank() {
        tracing::warn!("API credential is empty");
        return Err(ExecutionError::MissingCredential);
    }

    let secret = credential.expose();
    if placeholders.iter().any(|p| p.as_ref() == secret) {
        tracing::warn!("API credential is still set to a placeholder value");
        return Err(ExecutionError::MissingCredential);
    }

    Ok(())
}
