use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A single user.
///
/// The email and password hash are never serialized to the client.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct User {
	/// The unique identifier of the user.
	#[sqlx(try_from = "String")]
	pub id: Uuid,
	/// The user's primary email address, used for logging in.
	#[serde(skip_serializing)]
	pub email: String,
	/// The hashed password, in PHC string format.
	#[serde(skip_serializing)]
	pub password: String,
	/// The creation time of the user.
	pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SignupInput {
	#[validate(email)]
	pub email: String,
	#[validate(length(min = 6, max = 128))]
	pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginInput {
	#[validate(email)]
	pub email: String,
	#[validate(length(min = 1, max = 128))]
	pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
	pub id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
	pub token: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
	pub email: String,
}
