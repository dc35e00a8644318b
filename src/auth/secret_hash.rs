//! Secret-hash derivation for app clients configured with a client secret.
//!
//! The hash is `Base64(HMAC-SHA256(key = client_secret, message = username || client_id))`,
//! the `SecretHash` parameter user pools expect on unauthenticated calls.

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use sha2::Sha256;
// self
use crate::{
	_prelude::*,
	auth::{ClientId, ClientSecret, SecretHash, Username},
	error::UnexpectedError,
};

type HmacSha256 = Hmac<Sha256>;

impl SecretHash {
	/// Derives the secret hash for `username` signing up through `client_id`.
	///
	/// An empty `client_secret` is accepted as a (degenerate) key.
	pub fn compute(
		username: &Username,
		client_id: &ClientId,
		client_secret: &ClientSecret,
	) -> Result<Self> {
		let mut mac = <HmacSha256 as Mac>::new_from_slice(client_secret.expose().as_bytes())
			.map_err(|_| UnexpectedError::SecretHash)?;

		mac.update(username.as_bytes());
		mac.update(client_id.as_bytes());

		Ok(Self::from_encoded(STANDARD.encode(mac.finalize().into_bytes())))
	}
}
