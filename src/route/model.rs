use serde::Deserialize;
use validator::Validate;

/// These can be removed when [`serde`] supports
/// literal defaults: <https://github.com/serde-rs/serde/issues/368>
#[inline]
fn one() -> i64 {
	1
}

#[inline]
fn five() -> i64 {
	5
}

#[derive(Debug, Deserialize, Validate)]
pub struct Paginate {
	/// The page number to return (1-indexed).
	#[validate(range(min = 1))]
	#[serde(default = "one")]
	pub page: i64,
	/// The number of posts to return per page.
	#[validate(range(min = 1, max = 100))]
	#[serde(default = "five")]
	pub limit: i64,
}

impl Paginate {
	pub fn offset(&self) -> i64 {
		(self.page - 1) * self.limit
	}

	/// Number of pages needed to cover `total` rows, rounded up.
	pub fn total_pages(&self, total: i64) -> i64 {
		(total + self.limit - 1) / self.limit
	}
}

#[cfg(test)]
mod test {
	#[test]
	fn test_paginate_offset() {
		let mut paginate = super::Paginate { page: 1, limit: 5 };

		assert_eq!(paginate.offset(), 0);

		paginate.page = 2;

		assert_eq!(paginate.offset(), 5);

		paginate.limit = 10;

		assert_eq!(paginate.offset(), 10);
	}

	#[test]
	fn test_paginate_total_pages() {
		let paginate = super::Paginate { page: 1, limit: 5 };

		assert_eq!(paginate.total_pages(0), 0);
		assert_eq!(paginate.total_pages(5), 1);
		assert_eq!(paginate.total_pages(12), 3);
		assert_eq!(paginate.total_pages(15), 3);
		assert_eq!(paginate.total_pages(16), 4);
	}
}
