//! Newline-separated payload parsing and JSON rendering.

// self
use crate::_prelude::*;

/// Ordered records extracted from a resource payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Records(Vec<String>);
impl Records {
	/// Splits `body` on newlines after trimming surrounding whitespace.
	///
	/// The body is decoded lossily as UTF-8. An empty body yields a single empty record.
	pub fn parse(body: &[u8]) -> Self {
		let text = String::from_utf8_lossy(body);

		Self(text.trim().split('\n').map(str::to_owned).collect())
	}

	/// Renders the records as a compact JSON array.
	pub fn to_json(&self) -> Result<String> {
		serde_json::to_string(self).map_err(Error::Render)
	}

	/// Returns the number of records.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns whether there are no records.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterates over the records in payload order.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(String::as_str)
	}
}
impl From<Records> for Vec<String> {
	fn from(value: Records) -> Self {
		value.0
	}
}
