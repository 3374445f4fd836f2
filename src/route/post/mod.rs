use axum::{http::StatusCode, routing::get, Router};
use uuid::Uuid;

use crate::AppState;

pub mod model;
pub mod route;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("unknown post {0}")]
	UnknownPost(Uuid),
	#[error("post {0} belongs to another user")]
	NotOwner(Uuid),
	#[error("unsupported image type {0}")]
	UnsupportedImageType(String),
	#[error("image exceeds the maximum size")]
	ImageTooLarge,
}

impl Error {
	pub fn status(&self) -> StatusCode {
		match self {
			Self::UnknownPost(..) => StatusCode::NOT_FOUND,
			Self::NotOwner(..) => StatusCode::FORBIDDEN,
			Self::UnsupportedImageType(..) | Self::ImageTooLarge => StatusCode::BAD_REQUEST,
		}
	}
}

pub fn routes() -> Router<AppState> {
	use route::*;

	Router::new()
		.route("/", get(get_posts).post(create_post))
		.route("/userposts", get(get_user_posts))
		.route("/:id", get(get_post).put(update_post).delete(delete_post))
}

#[cfg(test)]
mod test {
	use axum_test::multipart::{MultipartForm, Part};

	use crate::test::*;

	fn post_form(title: &str, content: &str) -> MultipartForm {
		MultipartForm::new()
			.add_text("title", title.to_owned())
			.add_text("content", content.to_owned())
	}

	fn image_part(bytes: &[u8], mime: &str) -> Part {
		Part::bytes(bytes.to_vec())
			.file_name("image.bin")
			.mime_type(mime)
	}

	#[tokio::test]
	async fn test_create_requires_token() {
		let app = app().await;

		let response = app.post("/posts").multipart(post_form("T", "C")).await;

		assert_eq!(response.status_code(), 401);
	}

	#[tokio::test]
	async fn test_create_validates_fields() {
		let app = app().await;
		let token = authenticate(&app, "john@smith.com").await;

		let response = app
			.post("/posts")
			.multipart(post_form("", "C"))
			.bearer(&token)
			.await;

		assert_eq!(response.status_code(), 400);

		let response = app
			.post("/posts")
			.multipart(MultipartForm::new().add_text("title", "T"))
			.bearer(&token)
			.await;

		assert_eq!(response.status_code(), 400);

		// Nothing was persisted by the rejected requests.
		let response = app.get("/posts").await;

		assert_eq!(response.json::<serde_json::Value>()["totalPosts"], 0);
	}

	#[tokio::test]
	async fn test_post_lifecycle() {
		let app = app().await;

		let response = app
			.post("/auth/signup")
			.json(&json!({
				"email": "john@smith.com",
				"password": "hunter2",
			}))
			.await;

		let owner_id = response.json::<serde_json::Value>()["id"]
			.as_str()
			.unwrap()
			.to_owned();

		let owner = authenticate(&app, "john@smith.com").await;
		let intruder = authenticate(&app, "jane@smith.com").await;

		let response = app
			.post("/posts")
			.multipart(post_form("T", "C"))
			.bearer(&owner)
			.await;

		assert_eq!(response.status_code(), 201);

		let post = response.json::<serde_json::Value>();
		let id = post["id"].as_str().unwrap().to_owned();

		assert_eq!(post["title"], "T");
		assert_eq!(post["content"], "C");
		assert_eq!(post["userId"], owner_id.as_str());
		assert_eq!(post["imageUrl"], serde_json::Value::Null);

		// Anyone can read it.
		let response = app.get(&format!("/posts/{id}")).await;

		assert_eq!(response.status_code(), 200);

		// Only the owner can change it.
		let response = app
			.put(&format!("/posts/{id}"))
			.multipart(MultipartForm::new().add_text("title", "T2"))
			.bearer(&intruder)
			.await;

		assert_eq!(response.status_code(), 403);

		let response = app
			.delete(&format!("/posts/{id}"))
			.bearer(&intruder)
			.await;

		assert_eq!(response.status_code(), 403);

		// Partial update keeps unsupplied fields.
		let response = app
			.put(&format!("/posts/{id}"))
			.multipart(MultipartForm::new().add_text("title", "T2"))
			.bearer(&owner)
			.await;

		assert_eq!(response.status_code(), 200);

		let post = response.json::<serde_json::Value>();

		assert_eq!(post["title"], "T2");
		assert_eq!(post["content"], "C");

		let response = app.delete(&format!("/posts/{id}")).bearer(&owner).await;

		assert_eq!(response.status_code(), 200);

		let response = app.get(&format!("/posts/{id}")).await;

		assert_eq!(response.status_code(), 404);
	}

	#[tokio::test]
	async fn test_update_rejects_empty_title() {
		let app = app().await;
		let token = authenticate(&app, "john@smith.com").await;

		let response = app
			.post("/posts")
			.multipart(post_form("T", "C"))
			.bearer(&token)
			.await;

		let id = response.json::<serde_json::Value>()["id"]
			.as_str()
			.unwrap()
			.to_owned();

		let response = app
			.put(&format!("/posts/{id}"))
			.multipart(MultipartForm::new().add_text("title", ""))
			.bearer(&token)
			.await;

		assert_eq!(response.status_code(), 400);
	}

	#[tokio::test]
	async fn test_pagination() {
		let app = app().await;
		let token = authenticate(&app, "john@smith.com").await;

		for n in 0..12 {
			let response = app
				.post("/posts")
				.multipart(post_form(&format!("post {n}"), "content"))
				.bearer(&token)
				.await;

			assert_eq!(response.status_code(), 201);
		}

		let response = app
			.get("/posts")
			.add_query_param("page", 2)
			.add_query_param("limit", 5)
			.await;
		let page = response.json::<serde_json::Value>();

		assert_eq!(page["posts"].as_array().unwrap().len(), 5);
		assert_eq!(page["totalPosts"], 12);
		assert_eq!(page["currentPage"], 2);
		assert_eq!(page["totalPages"], 3);

		let response = app
			.get("/posts")
			.add_query_param("page", 3)
			.add_query_param("limit", 5)
			.await;
		let page = response.json::<serde_json::Value>();

		assert_eq!(page["posts"].as_array().unwrap().len(), 2);

		// The page size defaults to five.
		let response = app.get("/posts").await;
		let page = response.json::<serde_json::Value>();

		assert_eq!(page["posts"].as_array().unwrap().len(), 5);
		assert_eq!(page["currentPage"], 1);
	}

	#[tokio::test]
	async fn test_user_posts_are_filtered() {
		let app = app().await;
		let john = authenticate(&app, "john@smith.com").await;
		let jane = authenticate(&app, "jane@smith.com").await;

		for title in ["one", "two"] {
			app.post("/posts")
				.multipart(post_form(title, "content"))
				.bearer(&john)
				.await;
		}

		app.post("/posts")
			.multipart(post_form("three", "content"))
			.bearer(&jane)
			.await;

		let response = app.get("/posts/userposts").bearer(&john).await;
		let page = response.json::<serde_json::Value>();

		assert_eq!(page["totalPosts"], 2);

		let response = app.get("/posts/userposts").await;

		assert_eq!(response.status_code(), 401);
	}

	#[tokio::test]
	async fn test_get_unknown_post() {
		let app = app().await;

		let response = app
			.get(&format!("/posts/{}", uuid::Uuid::new_v4()))
			.await;

		assert_eq!(response.status_code(), 404);
	}

	#[tokio::test]
	async fn test_image_upload_roundtrip() {
		let app = app().await;
		let token = authenticate(&app, "john@smith.com").await;
		let bytes = b"\x89PNG\r\n\x1a\nnot a real image";

		let response = app
			.post("/posts")
			.multipart(post_form("T", "C").add_part("imageFile", image_part(bytes, "image/png")))
			.bearer(&token)
			.await;

		assert_eq!(response.status_code(), 201);

		let post = response.json::<serde_json::Value>();
		let url = post["imageUrl"].as_str().unwrap().to_owned();

		assert!(url.starts_with("/uploads/"));
		assert_eq!(post["imageMime"], "image/png");

		// The stored file is served back under /uploads.
		let response = app.get(&url).await;

		assert_eq!(response.status_code(), 200);
		assert_eq!(response.as_bytes().as_ref(), &bytes[..]);
	}

	#[tokio::test]
	async fn test_image_policy() {
		let app = app().await;
		let token = authenticate(&app, "john@smith.com").await;

		let response = app
			.post("/posts")
			.multipart(
				post_form("T", "C")
					.add_part("imageFile", image_part(b"%PDF-1.4", "application/pdf")),
			)
			.bearer(&token)
			.await;

		assert_eq!(response.status_code(), 400);

		let oversized = vec![0u8; crate::upload::MAX_IMAGE_BYTES + 1];

		let response = app
			.post("/posts")
			.multipart(
				post_form("T", "C").add_part("imageFile", image_part(&oversized, "image/png")),
			)
			.bearer(&token)
			.await;

		assert_eq!(response.status_code(), 400);

		let response = app.get("/posts").await;

		assert_eq!(response.json::<serde_json::Value>()["totalPosts"], 0);
	}
}
