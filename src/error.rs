use axum::{
	body::Body,
	extract::{multipart::MultipartError, rejection},
	http::{Response, StatusCode},
	response::IntoResponse,
	Json,
};
use serde::Serialize;

use crate::route::{auth, post};

/// Error type for the application.
///
/// The Display trait is not sent to the client, so it can show
/// sensitive information.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("validation error: {0}")]
	Validation(#[from] validator::ValidationErrors),
	#[error("json error: {0}")]
	Json(#[from] rejection::JsonRejection),
	#[error("query error: {0}")]
	Query(#[from] rejection::QueryRejection),
	#[error("multipart error: {0}")]
	Multipart(#[from] MultipartError),
	#[error("auth error: {0}")]
	Auth(#[from] auth::Error),
	#[error("post error: {0}")]
	Post(#[from] post::Error),
	#[error("database error: {0}")]
	Database(#[from] sqlx::Error),
	#[error("io error: {0}")]
	Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
	pub success: bool,
	pub errors: Vec<String>,
}

fn respond(status: StatusCode, errors: Vec<String>) -> Response<Body> {
	(
		status,
		Json(ErrorResponse {
			success: false,
			errors,
		}),
	)
		.into_response()
}

impl IntoResponse for Error {
	fn into_response(self) -> Response<Body> {
		match self {
			Error::Validation(errors) => respond(
				StatusCode::BAD_REQUEST,
				errors
					.field_errors()
					.into_iter()
					.map(move |(field, errors)| {
						errors
							.iter()
							.map(move |error| format!("{field}: {error}"))
					})
					.flatten()
					.collect(),
			),
			Error::Json(error) => respond(StatusCode::BAD_REQUEST, vec![error.to_string()]),
			Error::Query(error) => respond(StatusCode::BAD_REQUEST, vec![error.to_string()]),
			Error::Multipart(error) => respond(StatusCode::BAD_REQUEST, vec![error.to_string()]),
			Error::Auth(error) => respond(error.status(), vec![error.to_string()]),
			Error::Post(error) => respond(error.status(), vec![error.to_string()]),
			Error::Database(error) => {
				tracing::error!(%error, "database failure");
				respond(StatusCode::INTERNAL_SERVER_ERROR, Vec::new())
			}
			Error::Io(error) => {
				tracing::error!(%error, "io failure");
				respond(StatusCode::INTERNAL_SERVER_ERROR, Vec::new())
			}
		}
	}
}
