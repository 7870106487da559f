//! Auth-domain values: the issued token and the checksum derived from it.

pub mod checksum;
pub mod token;

pub use checksum::*;
pub use token::*;
