use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Deserializer, Serialize};

pub fn hash_password(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    hash(password.as_bytes(), cost)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password.as_bytes(), hash)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// User id as a decimal string. Integer subjects are read into the same form.
    #[serde(deserialize_with = "subject_from_str_or_int")]
    pub sub: String,
    pub exp: i64,
    #[serde(default)]
    pub iat: i64,
}

impl Claims {
    /// The subject as a user id. `None` unless `sub` is a positive integer.
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse::<i64>().ok().filter(|id| *id > 0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Subject {
    Text(String),
    Integer(i64),
}

fn subject_from_str_or_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Subject::deserialize(deserializer)? {
        Subject::Text(sub) => sub,
        Subject::Integer(id) => id.to_string(),
    })
}

pub fn generate_token(
    user_id: i64,
    key: &EncodingKey,
    ttl: Duration,
) -> Result<(String, i64), jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let expiration = (now + ttl).timestamp();

    let claims = Claims {
        sub: user_id.to_string(),
        exp: expiration,
        iat: now.timestamp(),
    };

    let token = encode(&Header::new(Algorithm::HS256), &claims, key)?;

    Ok((token, expiration))
}

/// HS256 only, `exp` required, no leeway on expiry. `Claims` itself requires `sub`,
/// since the library's own presence check only counts string subjects.
pub fn token_validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp"]);
    validation
}

pub fn verify_token(
    token: &str,
    key: &DecodingKey,
    validation: &Validation,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(token, key, validation)?;

    Ok(token_data.claims)
}

pub mod error_codes {
    pub const VALIDATION_ERROR: i32 = 1000;
    pub const CONFLICT: i32 = 1001;
    pub const AUTH_FAILED: i32 = 1002;
    pub const NOT_FOUND: i32 = 1004;
    pub const INTERNAL_ERROR: i32 = 5000;
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"utils-test-secret";

    #[test]
    fn password_hash_is_salted_and_verifies() {
        let first = hash_password("secret1", 4).unwrap();
        let second = hash_password("secret1", 4).unwrap();
        assert_ne!(first, second);
        assert_ne!(first, "secret1");
        assert!(verify_password("secret1", &first).unwrap());
        assert!(!verify_password("secret2", &first).unwrap());
    }

    #[test]
    fn token_carries_subject_and_expiry() {
        let (token, exp) =
            generate_token(42, &EncodingKey::from_secret(SECRET), Duration::hours(24)).unwrap();
        let claims = verify_token(&token, &DecodingKey::from_secret(SECRET), &token_validation())
            .unwrap();
        assert_eq!(claims.user_id(), Some(42));
        assert_eq!(claims.exp, exp);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn subject_must_be_positive_integer() {
        let mut claims = Claims {
            sub: "7".into(),
            exp: 0,
            iat: 0,
        };
        assert_eq!(claims.user_id(), Some(7));
        claims.sub = "alice".into();
        assert_eq!(claims.user_id(), None);
        claims.sub = "1.5".into();
        assert_eq!(claims.user_id(), None);
        claims.sub = "-3".into();
        assert_eq!(claims.user_id(), None);
    }

    #[test]
    fn integer_subject_decodes_like_a_string_one() {
        let key = DecodingKey::from_secret(SECRET);
        let exp = Utc::now().timestamp() + 3600;
        let sign = |claims: serde_json::Value| {
            encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(SECRET))
                .unwrap()
        };

        let numeric = verify_token(
            &sign(serde_json::json!({ "sub": 42, "exp": exp, "iat": 0 })),
            &key,
            &token_validation(),
        )
        .unwrap();
        assert_eq!(numeric.sub, "42");
        assert_eq!(numeric.user_id(), Some(42));

        let without_iat =
            verify_token(&sign(serde_json::json!({ "sub": 7, "exp": exp })), &key, &token_validation())
                .unwrap();
        assert_eq!(without_iat.user_id(), Some(7));

        for sub in [serde_json::json!(1.5), serde_json::json!(true), serde_json::Value::Null] {
            let token = sign(serde_json::json!({ "sub": sub, "exp": exp, "iat": 0 }));
            assert!(verify_token(&token, &key, &token_validation()).is_err());
        }
        let missing = sign(serde_json::json!({ "exp": exp, "iat": 0 }));
        assert!(verify_token(&missing, &key, &token_validation()).is_err());
    }
}
