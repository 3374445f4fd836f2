pub use crate::route::model::Paginate;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

/// A single post, created by a user.
///
/// The image, if any, lives on disk and is referenced by URL; `image_url`
/// and `image_mime` are always set or unset together.
#[derive(Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Post {
	/// The unique identifier of the post.
	#[sqlx(try_from = "String")]
	pub id: Uuid,
	/// The user that created the post. Immutable once set.
	#[sqlx(try_from = "String")]
	pub user_id: Uuid,
	/// The title of the post.
	pub title: String,
	/// The content of the post.
	pub content: String,
	pub image_url: Option<String>,
	pub image_mime: Option<String>,
	/// The creation time of the post.
	pub created_at: DateTime<Utc>,
	/// The time of the last modification.
	pub updated_at: DateTime<Utc>,
}

/// One page of posts plus the counters needed to render a pager.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPage {
	pub posts: Vec<Post>,
	pub total_posts: i64,
	pub current_page: i64,
	pub total_pages: i64,
}

impl PostPage {
	pub fn new(posts: Vec<Post>, total: i64, paginate: &Paginate) -> Self {
		Self {
			posts,
			total_posts: total,
			current_page: paginate.page,
			total_pages: paginate.total_pages(total),
		}
	}
}

#[derive(Debug, Validate)]
pub struct CreatePostInput {
	#[validate(length(min = 1, max = 128))]
	pub title: String,
	#[validate(length(min = 1))]
	pub content: String,
}

#[derive(Debug, Validate)]
pub struct UpdatePostInput {
	#[validate(length(min = 1, max = 128))]
	pub title: Option<String>,
	#[validate(length(min = 1))]
	pub content: Option<String>,
}

/// Fields read from a `multipart/form-data` request body.
#[derive(Debug, Default)]
pub struct PostForm {
	pub title: Option<String>,
	pub content: Option<String>,
	pub image: Option<Image>,
}

#[derive(Debug)]
pub struct Image {
	pub bytes: axum::body::Bytes,
	pub mime: String,
}
