use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackTokenClaims {
    /// Id of the `Registration` the token was issued for
    pub sub: i64,
    /// Expiration in epoch seconds
    pub exp: i64,
    pub iss: String,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Unable to sign the feedback token: {0}")]
    Signing(jsonwebtoken::errors::Error),
    #[error("The feedback token is invalid: {0}")]
    Invalid(jsonwebtoken::errors::Error),
}

/// Time-boxed signed token embedded in the feedback link so that a
/// participant can give feedback without logging in
pub struct FeedbackToken;

impl FeedbackToken {
    pub fn issue(
        subject_id: i64,
        secret: &str,
        expires_at: i64,
        issuer: &str,
    ) -> Result<String, TokenError> {
        let claims = FeedbackTokenClaims {
            sub: subject_id,
            exp: expires_at,
            iss: issuer.into(),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(TokenError::Signing)
    }

    pub fn verify(token: &str, secret: &str, issuer: &str) -> Result<FeedbackTokenClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer]);
        decode::<FeedbackTokenClaims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(TokenError::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Sat Jan 01 2100 00:00:00 GMT
    const FAR_FUTURE: i64 = 4_102_444_800;

    #[test]
    fn issues_and_verifies_token() {
        let token = FeedbackToken::issue(42, "secret", FAR_FUTURE, "localhost").unwrap();
        let claims = FeedbackToken::verify(&token, "secret", "localhost").unwrap();
        assert_eq!(
            claims,
            FeedbackTokenClaims {
                sub: 42,
                exp: FAR_FUTURE,
                iss: "localhost".into()
            }
        );
    }

    #[test]
    fn rejects_invalid_tokens() {
        let token = FeedbackToken::issue(42, "secret", FAR_FUTURE, "localhost").unwrap();
        assert!(FeedbackToken::verify(&token, "other-secret", "localhost").is_err());
        assert!(FeedbackToken::verify(&token, "secret", "sac.example.org").is_err());
        assert!(FeedbackToken::verify("not-a-token", "secret", "localhost").is_err());

        let expired = FeedbackToken::issue(42, "secret", 1_000, "localhost").unwrap();
        assert!(FeedbackToken::verify(&expired, "secret", "localhost").is_err());
    }
}
