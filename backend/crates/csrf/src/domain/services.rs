//! Domain Services
//!
//! Token derivation: `salt || HMAC-SHA256(secret, DOMAIN || session || salt)`,
//! base64url encoded. The salt travels inside the token, so verification
//! only needs the session identifier and the secret.

use platform::crypto::{
    SecretKey, from_base64_url, hmac_sha256, random_array, to_base64_url, verify_hmac_sha256,
};

use crate::domain::value_objects::{CsrfToken, MAC_LEN, SALT_LEN, SessionId, TOKEN_LEN};
use crate::error::{CsrfError, CsrfResult};

/// Domain separation tag mixed into every MAC
const TOKEN_DOMAIN: &[u8] = b"csrf-token:v1";

/// Generate a fresh token bound to `session_id`
pub fn generate_token(session_id: &SessionId, secret: &SecretKey) -> CsrfResult<CsrfToken> {
    let salt = random_array::<SALT_LEN>();
    derive_token(session_id, secret, &salt)
}

/// Deterministic derivation for a given salt
pub fn derive_token(
    session_id: &SessionId,
    secret: &SecretKey,
    salt: &[u8; SALT_LEN],
) -> CsrfResult<CsrfToken> {
    if secret.is_empty() {
        return Err(CsrfError::TokenGeneration("secret is empty".to_string()));
    }

    let mac = hmac_sha256(
        secret.expose(),
        &[TOKEN_DOMAIN, session_id.as_bytes().as_slice(), salt.as_slice()],
    )?;

    let mut raw = Vec::with_capacity(TOKEN_LEN);
    raw.extend_from_slice(salt);
    raw.extend_from_slice(&mac);

    Ok(CsrfToken::from_encoded(to_base64_url(&raw)))
}

/// Verify that `token` was minted for `session_id` under `secret`
pub fn verify_token(
    token: &CsrfToken,
    session_id: &SessionId,
    secret: &SecretKey,
) -> CsrfResult<()> {
    if secret.is_empty() {
        return Err(CsrfError::TokenGeneration("secret is empty".to_string()));
    }

    let raw = from_base64_url(token.as_str()).map_err(|_| CsrfError::InvalidToken)?;
    if raw.len() != TOKEN_LEN {
        return Err(CsrfError::InvalidToken);
    }

    let (salt, mac) = raw.split_at(SALT_LEN);
    debug_assert_eq!(mac.len(), MAC_LEN);

    let valid = verify_hmac_sha256(
        secret.expose(),
        &[TOKEN_DOMAIN, session_id.as_bytes().as_slice(), salt],
        mac,
    )?;

    if valid {
        Ok(())
    } else {
        Err(CsrfError::InvalidToken)
    }
}

pub fn is_valid_token(token: &CsrfToken, session_id: &SessionId, secret: &SecretKey) -> bool {
    verify_token(token, session_id, secret).is_ok()
}
