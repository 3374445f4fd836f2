use std::path::PathBuf;

/// Runtime configuration, read from the environment once at startup.
///
/// Everything here is immutable for the lifetime of the process. The signing
/// secret has no default; starting without one is a configuration error.
#[derive(Debug, Clone)]
pub struct Config {
	pub database_url: String,
	pub port: u16,
	pub jwt_secret: String,
	pub token_ttl: chrono::Duration,
	pub allowed_origin: Option<String>,
	pub upload_dir: PathBuf,
}

impl Config {
	pub fn from_env() -> Self {
		Self {
			database_url: std::env::var("DATABASE_URL")
				.unwrap_or_else(|_| "sqlite:blog.db".into()),
			port: std::env::var("PORT").map_or_else(
				|_| 3000,
				|port| port.parse().expect("PORT must be a number"),
			),
			jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
			token_ttl: chrono::Duration::seconds(std::env::var("TOKEN_TTL_SECONDS").map_or_else(
				|_| 3600,
				|ttl| ttl.parse().expect("TOKEN_TTL_SECONDS must be a number"),
			)),
			allowed_origin: std::env::var("ALLOWED_ORIGIN").ok(),
			upload_dir: std::env::var("UPLOAD_DIR")
				.map_or_else(|_| "uploads".into(), PathBuf::from),
		}
	}
}
