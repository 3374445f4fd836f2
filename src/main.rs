#![warn(clippy::pedantic)]

mod config;
mod db;
mod error;
mod extract;
mod route;
mod token;
mod upload;


use std::sync::Arc;

use argon2::Argon2;
use axum::{extract::DefaultBodyLimit, http::HeaderValue, Router};
use tower_http::{
	cors::{Any, CorsLayer},
	services::ServeDir,
	trace::TraceLayer,
};

pub use error::Error;

pub type Database = sqlx::Pool<sqlx::Sqlite>;
pub type AppState = State;

/// The shared application state.
///
/// This should contain all shared dependencies that handlers need to access,
/// such as a database connection pool, a hash configuration (if it's expensive to create),
/// or the token signing keys.
#[derive(Clone, axum::extract::FromRef)]
pub struct State {
	pub database: Database,
	pub hasher: Argon2<'static>,
	pub keys: token::Keys,
	pub config: Arc<config::Config>,
}

pub fn router(state: State) -> Router {
	let cors = match state.config.allowed_origin.as_deref() {
		Some(origin) => CorsLayer::new()
			.allow_origin(
				origin
					.parse::<HeaderValue>()
					.expect("ALLOWED_ORIGIN must be a valid origin"),
			)
			.allow_methods(Any)
			.allow_headers(Any),
		None => CorsLayer::permissive(),
	};

	Router::new()
		.nest("/auth", route::auth::routes())
		.nest("/posts", route::post::routes())
		.nest_service("/uploads", ServeDir::new(state.config.upload_dir.clone()))
		.layer(DefaultBodyLimit::max(upload::MAX_IMAGE_BYTES + 64 * 1024))
		.layer(cors)
		.layer(TraceLayer::new_for_http())
		.with_state(state)
}

#[tokio::main]
async fn main() {
	tracing_subscriber::fmt::init();
	dotenvy::dotenv().ok();

	let config = config::Config::from_env();
	let port = config.port;

	let database = db::connect(&config.database_url)
		.await
		.expect("failed to connect to database");

	db::migrate(&database)
		.await
		.expect("failed to create schema");

	tokio::fs::create_dir_all(&config.upload_dir)
		.await
		.expect("failed to create upload directory");

	let state = State {
		database,
		hasher: Argon2::default(),
		keys: token::Keys::new(config.jwt_secret.as_bytes()),
		config: Arc::new(config),
	};

	let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
		.await
		.expect("failed to bind to port");

	tracing::info!("listening on port {}", port);

	axum::serve(listener, router(state)).await.unwrap();
}
