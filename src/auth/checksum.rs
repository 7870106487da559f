//! Per-request checksum binding a token to a resource path.

// crates.io
use sha2::{Digest, Sha256};
// self
use crate::{_prelude::*, auth::AuthToken};

/// Lowercase hex SHA-256 digest of `token ++ path`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Checksum(String);
impl Checksum {
	/// Length of the rendered digest in hex characters.
	pub const LEN: usize = 64;

	/// Computes the checksum for `path` under `token`.
	///
	/// Token and path are concatenated as raw bytes with no separator.
	pub fn compute(token: &AuthToken, path: &str) -> Self {
		let mut hasher = Sha256::new();

		hasher.update(token.expose().as_bytes());
		hasher.update(path.as_bytes());

		Self(format!("{:x}", hasher.finalize()))
	}

	/// Returns the hex digest.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for Checksum {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Display for Checksum {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
impl From<Checksum> for String {
	fn from(value: Checksum) -> Self {
		value.0
	}
}
