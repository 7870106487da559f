//! Redacted wrapper for the token issued by the authentication endpoint.

// self
use crate::_prelude::*;

/// Opaque token returned in the authentication response headers.
///
/// The value is never printed by `Debug` or `Display`; use [`AuthToken::expose`] when the
/// raw bytes are needed (checksum computation).
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);
impl AuthToken {
	/// Wraps a token value, rejecting empty strings.
	pub fn new(value: impl Into<String>) -> Option<Self> {
		let value = value.into();

		if value.is_empty() { None } else { Some(Self(value)) }
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for AuthToken {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for AuthToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("AuthToken").field(&"<redacted>").finish()
	}
}
impl Display for AuthToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}
