//! Bearer Credential
//!
//! Stateless signed credential: base64url(claims JSON) + "." +
//! base64url(HMAC-SHA256 over the encoded claims). No server-side
//! session storage.

use hmac::{Hmac, Mac};
use platform::crypto::{from_base64url, to_base64url};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::value_object::{user_id::UserId, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

type HmacSha256 = Hmac<Sha256>;

/// Signed claims carried by the credential
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    user_id: Uuid,
    handle: String,
    display_name: String,
    role: String,
    exp_ms: i64,
}

/// Verified caller identity extracted from a credential
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: UserId,
    pub handle: String,
    pub display_name: String,
    pub role: UserRole,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Mint a signed credential for the given user
pub fn mint(user: &User, config: &AuthConfig) -> AuthResult<String> {
    let claims = Claims {
        user_id: *user.user_id.as_uuid(),
        handle: user.handle.as_str().to_string(),
        display_name: user.display_name.original().to_string(),
        role: user.user_role.code().to_string(),
        exp_ms: chrono::Utc::now().timestamp_millis() + config.token_ttl_ms(),
    };

    let payload = serde_json::to_vec(&claims)
        .map_err(|e| AuthError::Internal(format!("Failed to encode claims: {e}")))?;
    let payload_b64 = to_base64url(&payload);

    let mut mac = HmacSha256::new_from_slice(&config.token_secret)
        .map_err(|e| AuthError::Internal(format!("Invalid HMAC key: {e}")))?;
    mac.update(payload_b64.as_bytes());
    let signature = mac.finalize().into_bytes();

    Ok(format!(
        "{}.{}",
        payload_b64,
        to_base64url(signature.as_slice())
    ))
}

/// Verify a credential and extract the caller identity
pub fn verify(token: &str, config: &AuthConfig) -> Result<Identity, AuthError> {
    let (payload_b64, signature_b64) = token
        .split_once('.')
        .ok_or(AuthError::CredentialMalformed)?;

    let mut mac = HmacSha256::new_from_slice(&config.token_secret)
        .map_err(|e| AuthError::Internal(format!("Invalid HMAC key: {e}")))?;
    mac.update(payload_b64.as_bytes());

    let signature = from_base64url(signature_b64).map_err(|_| AuthError::CredentialMalformed)?;

    mac.verify_slice(&signature)
        .map_err(|_| AuthError::CredentialMalformed)?;

    let payload = from_base64url(payload_b64).map_err(|_| AuthError::CredentialMalformed)?;

    let claims: Claims =
        serde_json::from_slice(&payload).map_err(|_| AuthError::CredentialMalformed)?;

    if claims.exp_ms <= chrono::Utc::now().timestamp_millis() {
        return Err(AuthError::CredentialExpired);
    }

    Ok(Identity {
        user_id: UserId::from_uuid(claims.user_id),
        handle: claims.handle,
        display_name: claims.display_name,
        role: UserRole::from_code(&claims.role),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{
        display_name::DisplayName,
        user_handle::UserHandle,
        user_password::{RawPassword, UserPassword},
    };

    fn test_user() -> User {
        let raw = RawPassword::new("TestPassword123!".to_string()).unwrap();
        User::new(
            UserHandle::new("alice").unwrap(),
            DisplayName::new("Alice").unwrap(),
            UserPassword::from_raw(&raw, None).unwrap(),
        )
    }

    #[test]
    fn test_mint_and_verify_roundtrip() {
        let config = AuthConfig::with_random_secret();
        let user = test_user();

        let token = mint(&user, &config).unwrap();
        let identity = verify(&token, &config).unwrap();

        assert_eq!(identity.user_id, user.user_id);
        assert_eq!(identity.handle, "alice");
        assert_eq!(identity.display_name, "Alice");
        assert!(!identity.is_admin());
    }

    #[test]
    fn test_verify_rejects_tampered_payload() {
        let config = AuthConfig::with_random_secret();
        let token = mint(&test_user(), &config).unwrap();

        let (_, sig) = token.split_once('.').unwrap();
        let forged = format!("{}.{}", to_base64url(b"{\"hacked\":true}"), sig);

        assert!(matches!(
            verify(&forged, &config),
            Err(AuthError::CredentialMalformed)
        ));
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let config_a = AuthConfig::with_random_secret();
        let config_b = AuthConfig::with_random_secret();

        let token = mint(&test_user(), &config_a).unwrap();
        assert!(verify(&token, &config_b).is_err());
    }

    #[test]
    fn test_verify_rejects_expired() {
        let config = AuthConfig {
            token_ttl: std::time::Duration::ZERO,
            ..AuthConfig::with_random_secret()
        };

        let token = mint(&test_user(), &config).unwrap();
        assert!(matches!(
            verify(&token, &config),
            Err(AuthError::CredentialExpired)
        ));
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let config = AuthConfig::with_random_secret();
        assert!(verify("not-a-token", &config).is_err());
        assert!(verify("a.b.c", &config).is_err());
        assert!(verify("", &config).is_err());
    }
}
