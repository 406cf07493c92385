// src/domains/auth/services/jwt_service.rs
use crate::shared::errors::AuthError;
use crate::domains::auth::models::jwt::Claims;
use crate::domains::auth::models::user::Role;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sha2::{Sha256, Digest};
use rand::Rng;
use rand::distributions::Alphanumeric;

/// Access Token 수명 (시간)
/// Access token lifetime (hours)
const ACCESS_TOKEN_HOURS: i64 = 1;

/// Refresh Token 수명 (일)
/// Refresh token lifetime (days)
const REFRESH_TOKEN_DAYS: i64 = 7;

/// JWT 서비스
/// JWT Service for token generation and verification
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    /// JWT Service 생성
    /// Create JWT Service
    pub fn new(secret: String) -> Self {
        let encoding_key = EncodingKey::from_secret(secret.as_ref());
        let decoding_key = DecodingKey::from_secret(secret.as_ref());

        Self {
            encoding_key,
            decoding_key,
        }
    }

    /// Access Token 발급 (짧은 수명, role 포함)
    /// Generate Access Token (short lifetime, carries the role)
    pub fn generate_access_token(
        &self,
        user_id: u64,
        email: String,
        role: Role,
    ) -> Result<String, AuthError> {
        let claims = Claims::new(user_id, email, role, ACCESS_TOKEN_HOURS);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to generate access token: {}", e)))
    }

    /// Refresh Token 생성 (랜덤 문자열, DB에 저장할 것)
    /// Generate Refresh Token (random string, to be stored in DB)
    pub fn generate_refresh_token(&self) -> String {
        // 64자 랜덤 문자열 생성
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(64)
            .map(char::from)
            .collect();

        token
    }

    /// Refresh Token 해싱 (DB 저장용)
    /// Hash Refresh Token (for database storage)
    pub fn hash_refresh_token(&self, token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Refresh Token 만료 시점 계산
    /// Compute refresh token expiry
    pub fn refresh_token_expiry(&self) -> DateTime<Utc> {
        Utc::now() + Duration::days(REFRESH_TOKEN_DAYS)
    }

    /// Access Token 검증
    /// Verify Access Token
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, AuthError> {
        let validation = Validation::default();

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AuthError::InvalidToken // 만료된 토큰
                    }
                    _ => AuthError::InvalidToken,
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_verifies_and_keeps_claims() {
        let service = JwtService::new("test-secret".to_string());
        let token = service
            .generate_access_token(42, "admin@example.com".to_string(), Role::Admin)
            .unwrap();

        let claims = service.verify_access_token(&token).unwrap();
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.email, "admin@example.com");
        assert_eq!(claims.role, Role::Admin);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let issuer = JwtService::new("secret-a".to_string());
        let verifier = JwtService::new("secret-b".to_string());

        let token = issuer
            .generate_access_token(1, "user@example.com".to_string(), Role::Customer)
            .unwrap();

        assert!(verifier.verify_access_token(&token).is_err());
    }

    #[test]
    fn refresh_token_hash_is_stable_and_token_is_random() {
        let service = JwtService::new("test-secret".to_string());

        let t1 = service.generate_refresh_token();
        let t2 = service.generate_refresh_token();
        assert_eq!(t1.len(), 64);
        assert_ne!(t1, t2);

        assert_eq!(service.hash_refresh_token(&t1), service.hash_refresh_token(&t1));
        assert_ne!(service.hash_refresh_token(&t1), service.hash_refresh_token(&t2));
    }
}
