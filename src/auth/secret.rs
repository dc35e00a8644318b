//! Redacted wrappers for passwords, client secrets, and derived secret hashes.

// self
use crate::_prelude::*;

macro_rules! def_secret {
	($name:ident, $doc:literal $(, $derive:ident)*) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, Serialize $(, $derive)*)]
		#[serde(transparent)]
		pub struct $name(String);
		impl $name {
			/// Returns the inner value. Callers must avoid logging this string.
			pub fn expose(&self) -> &str {
				&self.0
			}

			/// Returns `true` when the wrapped value is empty.
			pub fn is_empty(&self) -> bool {
				self.0.is_empty()
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				self.expose()
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.debug_tuple(stringify!($name)).field(&"<redacted>").finish()
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str("<redacted>")
			}
		}
	};
}

def_secret! { Password, "User password submitted with a sign-up request.", Deserialize }
def_secret! {
	ClientSecret,
	"App client secret used as the secret-hash key; may be empty.",
	Deserialize
}
// Derived per request and only ever written to the wire.
def_secret! { SecretHash, "Per-request authentication code bound to a username and app client." }

impl Password {
	/// Wraps a password string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}
}

impl ClientSecret {
	/// Wraps a client secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}
}

impl SecretHash {
	pub(crate) fn from_encoded(value: String) -> Self {
		Self(value)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn secret_formatters_redact() {
		let password = Password::new("Secr3t!");
		let secret = ClientSecret::new("shh");

		assert_eq!(format!("{password:?}"), "Password(\"<redacted>\")");
		assert_eq!(format!("{secret}"), "<redacted>");
		assert_eq!(secret.expose(), "shh");
	}

	#[test]
	fn secret_hash_serializes_as_a_bare_string() {
		let hash = SecretHash::from_encoded("MigPuYJ3iN+z4CN0jsKSzXVX55y2vxyWQl4iOBMlBU4=".into());

		assert_eq!(
			serde_json::to_string(&hash).expect("Secret hash should serialize."),
			"\"MigPuYJ3iN+z4CN0jsKSzXVX55y2vxyWQl4iOBMlBU4=\""
		);
	}

	#[test]
	fn client_secret_deserializes_transparently() {
		let secret: ClientSecret =
			serde_json::from_str("\"\"").expect("Empty client secrets should deserialize.");

		assert!(secret.is_empty());
	}
}
