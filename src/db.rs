use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::Database;

pub async fn connect(url: &str) -> Result<Database, sqlx::Error> {
	let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

	SqlitePoolOptions::new().connect_with(options).await
}

/// Creates the schema if it does not exist yet. Safe to run on every startup.
pub async fn migrate(database: &Database) -> Result<(), sqlx::Error> {
	sqlx::query(
		r"
		CREATE TABLE IF NOT EXISTS users (
			id TEXT PRIMARY KEY NOT NULL,
			email TEXT NOT NULL UNIQUE,
			password TEXT NOT NULL,
			created_at TEXT NOT NULL
		)
		",
	)
	.execute(database)
	.await?;

	sqlx::query(
		r"
		CREATE TABLE IF NOT EXISTS posts (
			id TEXT PRIMARY KEY NOT NULL,
			user_id TEXT NOT NULL REFERENCES users (id) ON DELETE CASCADE,
			title TEXT NOT NULL,
			content TEXT NOT NULL,
			image_url TEXT,
			image_mime TEXT,
			created_at TEXT NOT NULL,
			updated_at TEXT NOT NULL
		)
		",
	)
	.execute(database)
	.await?;

	Ok(())
}
