//! Bearer tokens and the admin account.
//!
//! A token is `payload.signature`, both hex. The payload is
//! `<user id>:<role>:<expiry unix secs>` and the signature is HMAC-SHA256 of
//! the payload under the server secret.

use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::entities::{Role, User, UserId};
use crate::errors::{AppError, AppResult};

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Claims {
    pub sub: UserId,
    pub role: Role,
    pub exp: i64,
}

impl Claims {
    pub fn is_admin(&self) -> bool { self.role == Role::Admin }
}

#[derive(Clone)]
pub struct TokenSigner {
    secret: Vec<u8>,
    ttl: Duration,
}

impl ::core::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        f.debug_struct("TokenSigner").field("ttl", &self.ttl).finish_non_exhaustive()
    }
}

impl TokenSigner {
    pub fn new(secret: impl AsRef<[u8]>, ttl_secs: i64) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
            ttl: Duration::seconds(ttl_secs),
        }
    }

    fn mac(&self) -> AppResult<HmacSha256> {
        HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("cannot key token mac: {}", e)))
    }

    pub fn issue(&self, user: &User, now: DateTime<Utc>) -> AppResult<String> {
        let exp = (now + self.ttl).timestamp();
        let role = match user.role {
            Role::Admin => "admin",
            Role::User => "user",
        };
        let payload = format!("{}:{}:{}", user.id, role, exp);

        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        let sig = mac.finalize().into_bytes();

        Ok(format!("{}.{}", hex::encode(payload), hex::encode(sig)))
    }

    /// Checks the signature before the expiry, so a tampered token is
    /// always reported as invalid.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> AppResult<Claims> {
        let (payload_hex, sig_hex) = token.split_once('.').ok_or(AppError::InvalidToken)?;
        let payload = hex::decode(payload_hex).map_err(|_| AppError::InvalidToken)?;
        let sig = hex::decode(sig_hex).map_err(|_| AppError::InvalidToken)?;

        let mut mac = self.mac()?;
        mac.update(&payload);
        mac.verify_slice(&sig).map_err(|_| AppError::InvalidToken)?;

        let payload = String::from_utf8(payload).map_err(|_| AppError::InvalidToken)?;
        let mut parts = payload.split(':');
        let (sub, role, exp) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(sub), Some(role), Some(exp), None) => (sub, role, exp),
            _ => return Err(AppError::InvalidToken),
        };

        let claims = Claims {
            sub: sub.parse().map_err(|_| AppError::InvalidToken)?,
            role: match role {
                "admin" => Role::Admin,
                "user" => Role::User,
                _ => return Err(AppError::InvalidToken),
            },
            exp: exp.parse().map_err(|_| AppError::InvalidToken)?,
        };

        match claims.exp > now.timestamp() {
            true => Ok(claims),
            false => Err(AppError::TokenExpired),
        }
    }
}

pub fn digest_password(password: &str) -> String { hex::encode(Sha256::digest(password.as_bytes())) }

/// The one account that can sign in.
#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub user: User,
    pub password_sha256: String,
}

impl AdminAccount {
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        password_sha256: impl Into<String>,
    ) -> Self {
        Self {
            user: User {
                id,
                name: name.into(),
                email: email.into().trim().to_lowercase(),
                role: Role::Admin,
            },
            password_sha256: password_sha256.into().to_lowercase(),
        }
    }

    /// An empty digest disables sign-in.
    pub fn check(&self, email: &str, password: &str) -> bool {
        !self.password_sha256.is_empty()
            && self.user.email == email.trim().to_lowercase()
            && constant_time_eq(self.password_sha256.as_bytes(), digest_password(password).as_bytes())
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> AdminAccount {
        AdminAccount::new(
            UserId(uuid::Uuid::from_u128(7)),
            "Admin",
            "Admin@Example.com",
            digest_password("hunter22"),
        )
    }

    #[test]
    fn issued_token_verifies() {
        let signer = TokenSigner::new("secret", 60);
        let now = Utc::now();
        let token = signer.issue(&admin().user, now).unwrap();

        let claims = signer.verify(&token, now).unwrap();
        assert_eq!(claims.sub, admin().user.id);
        assert!(claims.is_admin());
    }

    #[test]
    fn expired_token_reports_expiry() {
        let signer = TokenSigner::new("secret", 60);
        let now = Utc::now();
        let token = signer.issue(&admin().user, now).unwrap();

        let later = now + Duration::seconds(61);
        assert!(matches!(signer.verify(&token, later), Err(AppError::TokenExpired)));
    }

    #[test]
    fn foreign_or_garbled_tokens_are_invalid() {
        let now = Utc::now();
        let token = TokenSigner::new("other", 60).issue(&admin().user, now).unwrap();
        let signer = TokenSigner::new("secret", 60);

        assert!(matches!(signer.verify(&token, now), Err(AppError::InvalidToken)));
        assert!(matches!(signer.verify("garbage", now), Err(AppError::InvalidToken)));
        assert!(matches!(signer.verify("zz.zz", now), Err(AppError::InvalidToken)));
    }

    #[test]
    fn admin_check_normalises_email() {
        let a = admin();
        assert!(a.check(" admin@example.COM ", "hunter22"));
        assert!(!a.check("admin@example.com", "wrong"));
    }

    #[test]
    fn empty_digest_disables_login() {
        let a = AdminAccount::new(UserId::generate(), "A", "a@b.co", "");
        assert!(!a.check("a@b.co", ""));
    }
}
