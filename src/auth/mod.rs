//! Resolves the current member from a bearer token.

pub mod claims;
pub(crate) mod extractors;
pub mod keys;

pub use extractors::AuthUser;
