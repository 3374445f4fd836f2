use axum::{
	http::StatusCode,
	routing::{get, post},
	Router,
};

use crate::AppState;

pub mod model;
pub mod route;

/// An error that can occur during authentication.
///
/// Note that the messages are presented to the client, so they should not contain
/// sensitive information.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("invalid email or password")]
	InvalidCredentials,
	#[error("email already registered")]
	EmailTaken,
	#[error("missing bearer token")]
	NoBearerToken,
	#[error("unknown user")]
	UnknownUser,
	#[error(transparent)]
	Token(#[from] crate::token::VerifyError),
	#[error("password hash error")]
	PasswordHash(argon2::password_hash::Error),
	#[error("token signing error")]
	Jwt(#[from] jsonwebtoken::errors::Error),
}

impl Error {
	pub fn status(&self) -> StatusCode {
		match self {
			Self::InvalidCredentials => StatusCode::BAD_REQUEST,
			Self::EmailTaken => StatusCode::CONFLICT,
			Self::NoBearerToken | Self::UnknownUser | Self::Token(..) => StatusCode::UNAUTHORIZED,
			Self::PasswordHash(..) | Self::Jwt(..) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

pub fn routes() -> Router<AppState> {
	use route::*;

	Router::new()
		.route("/signup", post(signup))
		.route("/login", post(login))
		.route("/user", get(user))
}
