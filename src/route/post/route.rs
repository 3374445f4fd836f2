use axum::{
	extract::{Multipart, Path, State},
	http::StatusCode,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
	extract::{AuthUser, Json, Query},
	upload, AppState, Database, Error,
};

use super::{model, Error as PostError};

/// Reads the post fields out of a `multipart/form-data` body, applying the
/// image policy (allowed types, size cap) to the `imageFile` part.
async fn read_form(mut multipart: Multipart) -> Result<model::PostForm, Error> {
	let mut form = model::PostForm::default();

	while let Some(field) = multipart.next_field().await? {
		let name = field.name().unwrap_or_default().to_owned();

		match name.as_str() {
			"title" => form.title = Some(field.text().await?),
			"content" => form.content = Some(field.text().await?),
			"imageFile" => {
				let mime = field
					.content_type()
					.unwrap_or("application/octet-stream")
					.to_owned();

				if upload::extension(&mime).is_none() {
					return Err(PostError::UnsupportedImageType(mime).into());
				}

				let bytes = field.bytes().await?;

				if bytes.len() > upload::MAX_IMAGE_BYTES {
					return Err(PostError::ImageTooLarge.into());
				}

				form.image = Some(model::Image { bytes, mime });
			}
			_ => {}
		}
	}

	Ok(form)
}

/// Loads a post and confirms the requester owns it. Runs before any
/// mutation; a missing post and a foreign post fail differently.
async fn fetch_owned(
	database: &Database,
	post_id: Uuid,
	user_id: Uuid,
) -> Result<model::Post, Error> {
	let post = sqlx::query_as::<_, model::Post>("SELECT * FROM posts WHERE id = ?1")
		.bind(post_id.to_string())
		.fetch_optional(database)
		.await?;

	let Some(post) = post else {
		return Err(PostError::UnknownPost(post_id).into());
	};

	if post.user_id != user_id {
		return Err(PostError::NotOwner(post_id).into());
	}

	Ok(post)
}

/// Create post
/// Creates a new post owned by the requester.
pub async fn create_post(
	State(state): State<AppState>,
	auth: AuthUser,
	multipart: Multipart,
) -> Result<(StatusCode, Json<model::Post>), Error> {
	let form = read_form(multipart).await?;

	let input = model::CreatePostInput {
		title: form.title.unwrap_or_default(),
		content: form.content.unwrap_or_default(),
	};

	input.validate().map_err(Error::Validation)?;

	let image = match &form.image {
		Some(image) => Some((
			upload::save(&state.config.upload_dir, &image.bytes, &image.mime).await?,
			image.mime.clone(),
		)),
		None => None,
	};
	let (image_url, image_mime) = image.unzip();

	let now = Utc::now();

	let post = sqlx::query_as::<_, model::Post>(
		r"
		INSERT INTO posts (id, user_id, title, content, image_url, image_mime, created_at, updated_at)
		VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
		RETURNING *
		",
	)
	.bind(Uuid::new_v4().to_string())
	.bind(auth.user_id.to_string())
	.bind(&input.title)
	.bind(&input.content)
	.bind(image_url)
	.bind(image_mime)
	.bind(now)
	.bind(now)
	.fetch_one(&state.database)
	.await?;

	Ok((StatusCode::CREATED, Json(post)))
}

/// Get all posts
/// Returns one page of posts, newest first.
pub async fn get_posts(
	State(database): State<Database>,
	Query(paginate): Query<model::Paginate>,
) -> Result<Json<model::PostPage>, Error> {
	let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts")
		.fetch_one(&database)
		.await?;

	let posts = sqlx::query_as::<_, model::Post>(
		r"
		SELECT * FROM posts
		ORDER BY created_at DESC
		LIMIT ?1 OFFSET ?2
		",
	)
	.bind(paginate.limit)
	.bind(paginate.offset())
	.fetch_all(&database)
	.await?;

	Ok(Json(model::PostPage::new(posts, total, &paginate)))
}

/// Get own posts
/// Returns one page of the requester's posts, newest first.
pub async fn get_user_posts(
	State(database): State<Database>,
	auth: AuthUser,
	Query(paginate): Query<model::Paginate>,
) -> Result<Json<model::PostPage>, Error> {
	let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts WHERE user_id = ?1")
		.bind(auth.user_id.to_string())
		.fetch_one(&database)
		.await?;

	let posts = sqlx::query_as::<_, model::Post>(
		r"
		SELECT * FROM posts
		WHERE user_id = ?1
		ORDER BY created_at DESC
		LIMIT ?2 OFFSET ?3
		",
	)
	.bind(auth.user_id.to_string())
	.bind(paginate.limit)
	.bind(paginate.offset())
	.fetch_all(&database)
	.await?;

	Ok(Json(model::PostPage::new(posts, total, &paginate)))
}

/// Get single post
/// Returns a single post by its unique id.
pub async fn get_post(
	State(database): State<Database>,
	Path(post_id): Path<Uuid>,
) -> Result<Json<model::Post>, Error> {
	let post = sqlx::query_as::<_, model::Post>("SELECT * FROM posts WHERE id = ?1")
		.bind(post_id.to_string())
		.fetch_optional(&database)
		.await?;

	Ok(Json(post.ok_or(PostError::UnknownPost(post_id))?))
}

/// Update post
/// Updates an existing post. Only supplied fields overwrite stored values.
pub async fn update_post(
	State(state): State<AppState>,
	auth: AuthUser,
	Path(post_id): Path<Uuid>,
	multipart: Multipart,
) -> Result<Json<model::Post>, Error> {
	let post = fetch_owned(&state.database, post_id, auth.user_id).await?;

	let form = read_form(multipart).await?;

	let input = model::UpdatePostInput {
		title: form.title,
		content: form.content,
	};

	input.validate().map_err(Error::Validation)?;

	let (image_url, image_mime) = match &form.image {
		Some(image) => (
			Some(upload::save(&state.config.upload_dir, &image.bytes, &image.mime).await?),
			Some(image.mime.clone()),
		),
		None => (post.image_url, post.image_mime),
	};

	let post = sqlx::query_as::<_, model::Post>(
		r"
		UPDATE posts
		SET title = ?1, content = ?2, image_url = ?3, image_mime = ?4, updated_at = ?5
		WHERE id = ?6
		RETURNING *
		",
	)
	.bind(input.title.unwrap_or(post.title))
	.bind(input.content.unwrap_or(post.content))
	.bind(image_url)
	.bind(image_mime)
	.bind(Utc::now())
	.bind(post_id.to_string())
	.fetch_optional(&state.database)
	.await?;

	// A concurrent delete between the ownership check and the update loses
	// the row; the caller sees the post as gone.
	Ok(Json(post.ok_or(PostError::UnknownPost(post_id))?))
}

/// Delete post
/// Deletes an existing post. This action is irreversible.
pub async fn delete_post(
	State(database): State<Database>,
	auth: AuthUser,
	Path(post_id): Path<Uuid>,
) -> Result<(), Error> {
	fetch_owned(&database, post_id, auth.user_id).await?;

	let result = sqlx::query("DELETE FROM posts WHERE id = ?1")
		.bind(post_id.to_string())
		.execute(&database)
		.await?;

	if result.rows_affected() == 0 {
		return Err(PostError::UnknownPost(post_id).into());
	}

	Ok(())
}
