use argon2::{password_hash::SaltString, PasswordHash, PasswordHasher, PasswordVerifier};
use axum::{extract::State, http::StatusCode};
use chrono::Utc;
use rand::rngs::OsRng;
use uuid::Uuid;

use crate::{
	extract::{AuthUser, Json},
	token, AppState, Database, Error,
};

use super::{model, Error as AuthError};

/// Register account
/// Registers a new account, returning its identifier.
pub async fn signup(
	State(state): State<AppState>,
	Json(input): Json<model::SignupInput>,
) -> Result<(StatusCode, Json<model::SignupResponse>), Error> {
	let salt = SaltString::generate(&mut OsRng);
	let hash = state
		.hasher
		.hash_password(input.password.as_bytes(), &salt)
		.map_err(AuthError::PasswordHash)?
		.to_string();

	let id = Uuid::new_v4();

	sqlx::query("INSERT INTO users (id, email, password, created_at) VALUES (?1, ?2, ?3, ?4)")
		.bind(id.to_string())
		.bind(&input.email)
		.bind(&hash)
		.bind(Utc::now())
		.execute(&state.database)
		.await
		.map_err(|error| match error {
			sqlx::Error::Database(ref database) if database.is_unique_violation() => {
				AuthError::EmailTaken.into()
			}
			error => Error::from(error),
		})?;

	Ok((StatusCode::CREATED, Json(model::SignupResponse { id })))
}

/// Log in
/// Logs in to an account, returning a bearer token.
pub async fn login(
	State(state): State<AppState>,
	Json(input): Json<model::LoginInput>,
) -> Result<Json<model::LoginResponse>, Error> {
	let user = sqlx::query_as::<_, model::User>("SELECT * FROM users WHERE email = ?1")
		.bind(&input.email)
		.fetch_optional(&state.database)
		.await?;

	// Unknown email and wrong password must be indistinguishable to the caller.
	let Some(user) = user else {
		return Err(AuthError::InvalidCredentials.into());
	};

	let hash = PasswordHash::new(&user.password).map_err(AuthError::PasswordHash)?;

	if state
		.hasher
		.verify_password(input.password.as_bytes(), &hash)
		.is_err()
	{
		return Err(AuthError::InvalidCredentials.into());
	}

	let token =
		token::issue(&state.keys, user.id, state.config.token_ttl).map_err(AuthError::Jwt)?;

	Ok(Json(model::LoginResponse { token }))
}

/// Get user
/// Returns the authenticated user's email address.
pub async fn user(
	State(database): State<Database>,
	auth: AuthUser,
) -> Result<Json<model::UserResponse>, Error> {
	let user = sqlx::query_as::<_, model::User>("SELECT * FROM users WHERE id = ?1")
		.bind(auth.user_id.to_string())
		.fetch_optional(&database)
		.await?;

	let Some(user) = user else {
		return Err(AuthError::UnknownUser.into());
	};

	Ok(Json(model::UserResponse { email: user.email }))
}
