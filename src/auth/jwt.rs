//! 会话令牌验证
//! 令牌由托管认证服务以 HS256 签发，这里只做验证

use crate::{config::SecurityConfig, error::AppError, models::Principal};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 会话访问令牌中的声明
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    /// 主体（认证用户 ID）
    pub sub: String,

    #[serde(default)]
    pub email: Option<String>,

    /// 会话的数据库角色，如 "authenticated"
    #[serde(default)]
    pub role: Option<String>,

    pub aud: String,

    pub exp: i64,

    #[serde(default)]
    pub iat: Option<i64>,
}

pub struct SessionTokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl SessionTokenVerifier {
    pub fn from_config(config: &SecurityConfig) -> Result<Self, AppError> {
        let secret = config.jwt_secret.expose_secret();

        // HS256 密钥至少 32 字节
        if secret.len() < 32 {
            return Err(AppError::Config("JWT secret too short (min 32 chars)".to_string()));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[config.jwt_audience.as_str()]);

        Ok(Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    /// 验证会话令牌并返回声明
    pub fn verify(&self, token: &str) -> Result<SessionClaims, AppError> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "Session token rejected");
                AppError::Unauthorized
            })?;

        Ok(data.claims)
    }

    /// 验证会话令牌并映射为主体
    pub fn principal(&self, token: &str) -> Result<Principal, AppError> {
        let claims = self.verify(token)?;
        let id = Uuid::parse_str(&claims.sub).map_err(|_| AppError::Unauthorized)?;

        Ok(Principal {
            id,
            email: claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};
    use secrecy::Secret;

    const SECRET: &str = "test-secret-key-for-testing-only-min-32-chars";

    fn security() -> SecurityConfig {
        SecurityConfig {
            jwt_secret: Secret::new(SECRET.to_string()),
            jwt_audience: "authenticated".to_string(),
            session_cookie: "sb-access-token".to_string(),
        }
    }

    fn token(sub: &str, aud: &str, exp_offset: Duration, secret: &str) -> String {
        let claims = SessionClaims {
            sub: sub.to_string(),
            email: Some("admin@pharmex.eg".to_string()),
            role: Some("authenticated".to_string()),
            aud: aud.to_string(),
            exp: (Utc::now() + exp_offset).timestamp(),
            iat: Some(Utc::now().timestamp()),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_valid_token_yields_principal() {
        let verifier = SessionTokenVerifier::from_config(&security()).unwrap();
        let user_id = Uuid::new_v4();

        let principal = verifier
            .principal(&token(&user_id.to_string(), "authenticated", Duration::hours(1), SECRET))
            .unwrap();

        assert_eq!(principal.id, user_id);
        assert_eq!(principal.email.as_deref(), Some("admin@pharmex.eg"));
    }

    #[test]
    fn test_rejected_tokens() {
        let verifier = SessionTokenVerifier::from_config(&security()).unwrap();
        let sub = Uuid::new_v4().to_string();

        let expired = token(&sub, "authenticated", Duration::hours(-2), SECRET);
        assert!(verifier.principal(&expired).is_err());

        let wrong_aud = token(&sub, "anon", Duration::hours(1), SECRET);
        assert!(verifier.principal(&wrong_aud).is_err());

        let wrong_key = token(
            &sub,
            "authenticated",
            Duration::hours(1),
            "another-secret-key-that-is-long-enough!!",
        );
        assert!(verifier.principal(&wrong_key).is_err());

        let not_uuid = token("u1", "authenticated", Duration::hours(1), SECRET);
        assert!(verifier.principal(&not_uuid).is_err());

        assert!(verifier.principal("garbage").is_err());
    }

    #[test]
    fn test_short_secret_rejected() {
        let mut config = security();
        config.jwt_secret = Secret::new("short".to_string());
        assert!(SessionTokenVerifier::from_config(&config).is_err());
    }
}
