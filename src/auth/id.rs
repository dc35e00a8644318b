//! Identifiers exchanged with the user pool.
//!
//! Each kind carries the character rule the pool applies to it. Usernames accept any
//! printable character, app client ids are word characters plus `+`, and subjects are
//! printable ASCII. None may exceed [`IDENTIFIER_MAX_CHARS`] characters.

// std
use std::ops::Deref;
// self
use crate::_prelude::*;

/// Longest identifier, in characters, the pool accepts.
pub const IDENTIFIER_MAX_CHARS: usize = 128;

struct Rule {
	kind: &'static str,
	allows: fn(char) -> bool,
}
impl Rule {
	fn check(&self, value: &str) -> Result<(), IdentifierError> {
		let kind = self.kind;

		if value.is_empty() {
			return Err(IdentifierError::Empty { kind });
		}
		if let Some(character) = value.chars().find(|c| !(self.allows)(*c)) {
			return Err(IdentifierError::InvalidCharacter { kind, character });
		}
		if value.chars().count() > IDENTIFIER_MAX_CHARS {
			return Err(IdentifierError::TooLong { kind, max: IDENTIFIER_MAX_CHARS });
		}

		Ok(())
	}
}

const USERNAME: Rule = Rule { kind: "Username", allows: is_printable };
const CLIENT: Rule = Rule { kind: "Client", allows: is_word_or_plus };
const SUBJECT: Rule = Rule { kind: "Subject", allows: is_ascii_printable };

fn is_printable(c: char) -> bool {
	!c.is_whitespace() && !c.is_control()
}

fn is_word_or_plus(c: char) -> bool {
	c.is_alphanumeric() || c == '_' || c == '+'
}

fn is_ascii_printable(c: char) -> bool {
	c.is_ascii_graphic()
}

macro_rules! def_id {
	($(#[$meta:meta])* $name:ident, $rule:expr) => {
		$(#[$meta])*
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Validates `value` and wraps it unchanged.
			pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
				Self::try_from(value.as_ref().to_owned())
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				$rule.check(&value)?;

				Ok(Self(value))
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &str {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.debug_tuple(stringify!($name)).field(&self.0).finish()
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
	};
}

def_id! {
	/// Sign-in name the caller registers, kept exactly as supplied.
	Username, USERNAME
}
def_id! {
	/// App client the request is issued through.
	ClientId, CLIENT
}
def_id! {
	/// Subject the provider assigns to a newly registered user.
	UserSub, SUBJECT
}

/// Identifier rejected by its character rule.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum IdentifierError {
	/// Nothing was supplied.
	#[error("{kind} identifier cannot be empty.")]
	Empty {
		/// Identifier kind.
		kind: &'static str,
	},
	/// A character outside the kind's alphabet was found.
	#[error("{kind} identifier contains the disallowed character {character:?}.")]
	InvalidCharacter {
		/// Identifier kind.
		kind: &'static str,
		/// First offending character.
		character: char,
	},
	/// Longer than the pool allows.
	#[error("{kind} identifier exceeds {max} characters.")]
	TooLong {
		/// Identifier kind.
		kind: &'static str,
		/// Maximum permitted character count.
		max: usize,
	},
}
