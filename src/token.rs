use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Process-wide signing key pair, derived from the configured secret at
/// startup and immutable afterwards.
#[derive(Clone)]
pub struct Keys {
	encoding: EncodingKey,
	decoding: DecodingKey,
}

impl Keys {
	pub fn new(secret: &[u8]) -> Self {
		Self {
			encoding: EncodingKey::from_secret(secret),
			decoding: DecodingKey::from_secret(secret),
		}
	}
}

/// The claims embedded in a bearer token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
	/// The user the token was issued to.
	pub sub: Uuid,
	/// Issuance time (unix seconds).
	pub iat: i64,
	/// Expiry time (unix seconds).
	pub exp: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
	#[error("malformed token")]
	Malformed,
	#[error("token expired")]
	Expired,
	#[error("invalid token signature")]
	InvalidSignature,
}

/// Signs a token for `user_id`, valid for `ttl` from now.
pub fn issue(
	keys: &Keys,
	user_id: Uuid,
	ttl: chrono::Duration,
) -> Result<String, jsonwebtoken::errors::Error> {
	let now = chrono::Utc::now();
	let claims = Claims {
		sub: user_id,
		iat: now.timestamp(),
		exp: (now + ttl).timestamp(),
	};

	encode(&Header::default(), &claims, &keys.encoding)
}

/// Verifies a token's signature and expiry. Purely cryptographic; no store
/// access.
pub fn verify(keys: &Keys, token: &str) -> Result<Claims, VerifyError> {
	decode::<Claims>(token, &keys.decoding, &Validation::default())
		.map(|data| data.claims)
		.map_err(|error| match error.kind() {
			ErrorKind::ExpiredSignature => VerifyError::Expired,
			ErrorKind::InvalidSignature => VerifyError::InvalidSignature,
			_ => VerifyError::Malformed,
		})
}
