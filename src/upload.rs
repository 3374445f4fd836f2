use std::{io, path::Path};

use uuid::Uuid;

/// Largest accepted image payload.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Accepted image mime types and the file extension each is stored with.
const ALLOWED_TYPES: &[(&str, &str)] = &[
	("image/jpeg", "jpg"),
	("image/png", "png"),
	("image/gif", "gif"),
];

pub fn extension(mime: &str) -> Option<&'static str> {
	ALLOWED_TYPES
		.iter()
		.find(|(allowed, _)| *allowed == mime)
		.map(|(_, extension)| *extension)
}

/// Writes an image to the upload directory under a generated name, returning
/// the public URL it is served from. The mime type must already have passed
/// [`extension`].
pub async fn save(dir: &Path, bytes: &[u8], mime: &str) -> io::Result<String> {
	let name = format!("{}.{}", Uuid::new_v4(), extension(mime).unwrap_or("bin"));

	tokio::fs::write(dir.join(&name), bytes).await?;

	Ok(format!("/uploads/{name}"))
}

#[cfg(test)]
mod test {
	#[test]
	fn test_extension() {
		assert_eq!(super::extension("image/png"), Some("png"));
		assert_eq!(super::extension("image/jpeg"), Some("jpg"));
		assert_eq!(super::extension("image/gif"), Some("gif"));
		assert_eq!(super::extension("image/svg+xml"), None);
		assert_eq!(super::extension("application/pdf"), None);
	}
}
