//! Auth-domain identifiers, redacted secrets, secret hashes, and user attributes.

pub mod attribute;
pub mod id;
pub mod secret;
pub mod secret_hash;

pub use attribute::*;
pub use id::*;
pub use secret::*;
