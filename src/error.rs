use thiserror::Error;

/// Errors surfaced by the list and the holders.  
/// Every error goes straight back to the caller, nothing here retries.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
	/// An element was requested from a list with no elements.
	#[error("container is empty")]
	EmptyContainer,

	/// A holder was dereferenced after it gave up (or never had) its value.
	#[error("holder does not own a value")]
	InvalidAccess,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
