//! User attribute keys and the sign-up options that carry them.

// self
use crate::{_prelude::*, error::ValidationError, provider::ProviderAttribute};

const CUSTOM_PREFIX: &str = "custom:";

macro_rules! def_standard_keys {
	($($variant:ident => $key:literal),+ $(,)?) => {
		/// Key of a user attribute registered alongside the account.
		///
		/// Standard OpenID Connect claims get their own variants; every other key is kept
		/// verbatim in [`UserAttributeKey::Custom`].
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub enum UserAttributeKey {
			$(
				#[doc = concat!("`", $key, "`")]
				$variant,
			)+
			/// Any key that is not a standard claim, usually prefixed with `custom:`.
			Custom(CustomAttributeName),
		}
		impl UserAttributeKey {
			/// Returns the key string the provider expects.
			pub fn as_str(&self) -> &str {
				match self {
					$(Self::$variant => $key,)+
					Self::Custom(name) => name.as_str(),
				}
			}

			fn standard(raw: &str) -> Option<Self> {
				match raw {
					$($key => Some(Self::$variant),)+
					_ => None,
				}
			}
		}
	};
}

def_standard_keys! {
	Address => "address",
	Birthdate => "birthdate",
	Email => "email",
	FamilyName => "family_name",
	Gender => "gender",
	GivenName => "given_name",
	Locale => "locale",
	MiddleName => "middle_name",
	Name => "name",
	Nickname => "nickname",
	PhoneNumber => "phone_number",
	Picture => "picture",
	PreferredUsername => "preferred_username",
	Profile => "profile",
	UpdatedAt => "updated_at",
	Website => "website",
	Zoneinfo => "zoneinfo",
}

impl UserAttributeKey {
	/// Builds a `custom:<name>` key.
	pub fn custom(name: impl AsRef<str>) -> Result<Self, ValidationError> {
		let name = name.as_ref();
		let name = name.strip_prefix(CUSTOM_PREFIX).unwrap_or(name);

		Self::parse(&format!("{CUSTOM_PREFIX}{name}"))
	}

	/// Parses a raw key, mapping standard claim names onto their variants.
	pub fn parse(raw: &str) -> Result<Self, ValidationError> {
		if let Some(key) = Self::standard(raw) {
			return Ok(key);
		}

		let invalid = raw.is_empty()
			|| raw.chars().any(char::is_whitespace)
			|| raw.strip_prefix(CUSTOM_PREFIX).is_some_and(str::is_empty);

		if invalid {
			return Err(ValidationError::InvalidAttributeKey { key: raw.to_owned() });
		}

		Ok(Self::Custom(CustomAttributeName(raw.to_owned())))
	}
}
impl Debug for UserAttributeKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "UserAttributeKey({})", self.as_str())
	}
}
impl Display for UserAttributeKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for UserAttributeKey {
	type Err = ValidationError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}
impl TryFrom<String> for UserAttributeKey {
	type Error = ValidationError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::parse(&value)
	}
}
impl From<UserAttributeKey> for String {
	fn from(value: UserAttributeKey) -> Self {
		match value {
			UserAttributeKey::Custom(name) => name.0,
			key => key.as_str().to_owned(),
		}
	}
}

/// Validated name of a non-standard attribute.
///
/// Only [`UserAttributeKey::parse`] and [`UserAttributeKey::custom`] build one, so a custom
/// name is never empty and never spells a standard claim.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CustomAttributeName(String);
impl CustomAttributeName {
	/// Returns the full key, including any `custom:` prefix.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

/// Caller-supplied options for a sign-up request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpOptions {
	/// Attributes registered with the new account; keys are unique.
	#[serde(default)]
	pub user_attributes: BTreeMap<UserAttributeKey, String>,
}
impl SignUpOptions {
	/// Creates options from an attribute iterator; later duplicates replace earlier ones.
	pub fn new<V>(attributes: impl IntoIterator<Item = (UserAttributeKey, V)>) -> Self
	where
		V: Into<String>,
	{
		Self {
			user_attributes: attributes.into_iter().map(|(k, v)| (k, v.into())).collect(),
		}
	}

	/// Adds or replaces a single attribute.
	pub fn with_user_attribute(mut self, key: UserAttributeKey, value: impl Into<String>) -> Self {
		self.user_attributes.insert(key, value.into());

		self
	}

	/// Converts the attributes into the provider's `{ Name, Value }` representation.
	pub fn to_provider_attributes(&self) -> Result<Vec<ProviderAttribute>, ValidationError> {
		self.user_attributes
			.iter()
			.map(|(key, value)| {
				if value.is_empty() {
					return Err(ValidationError::EmptyAttributeValue { key: key.to_string() });
				}

				Ok(ProviderAttribute { name: key.to_string(), value: value.clone() })
			})
			.collect()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn standard_keys_parse_onto_variants() {
		assert_eq!(UserAttributeKey::parse("email"), Ok(UserAttributeKey::Email));
		assert_eq!(UserAttributeKey::PhoneNumber.as_str(), "phone_number");

		let tier = UserAttributeKey::parse("custom:tier").expect("Custom key should be valid.");

		assert!(matches!(
			&tier,
			UserAttributeKey::Custom(name) if name.as_str() == "custom:tier"
		));
	}

	#[test]
	fn custom_keys_are_prefixed_once() {
		let key = UserAttributeKey::custom("tier").expect("Custom key should be valid.");
		let prefixed =
			UserAttributeKey::custom("custom:tier").expect("Custom key should be valid.");

		assert_eq!(key, prefixed);
		assert_eq!(key.to_string(), "custom:tier");
		assert!(UserAttributeKey::custom("").is_err());
		assert!(UserAttributeKey::parse("").is_err());
		assert!(UserAttributeKey::parse("has space").is_err());
	}

	#[test]
	fn options_convert_into_provider_attributes() {
		let options = SignUpOptions::new([
			(UserAttributeKey::Email, "alice@example.com"),
			(UserAttributeKey::PhoneNumber, "+15555550100"),
		]);
		let attributes =
			options.to_provider_attributes().expect("Attributes fixture should convert.");

		assert_eq!(attributes.len(), 2);
		assert!(attributes.contains(&ProviderAttribute {
			name: "email".into(),
			value: "alice@example.com".into()
		}));
		assert!(attributes.contains(&ProviderAttribute {
			name: "phone_number".into(),
			value: "+15555550100".into()
		}));
	}

	#[test]
	fn standard_spellings_never_become_custom_keys() {
		let reparsed = UserAttributeKey::parse("email").expect("Standard key should parse.");
		let deserialized: UserAttributeKey =
			serde_json::from_str("\"email\"").expect("Standard key should deserialize.");
		let options = SignUpOptions::new([
			(UserAttributeKey::Email, "a@example.com"),
			(reparsed, "b@example.com"),
			(deserialized, "c@example.com"),
		]);
		let attributes =
			options.to_provider_attributes().expect("Attributes fixture should convert.");

		assert_eq!(attributes.len(), 1);
		assert_eq!(attributes[0].name, "email");
		assert_eq!(attributes[0].value, "c@example.com");

		let custom = UserAttributeKey::custom("email").expect("Custom key should be valid.");

		assert_eq!(custom.as_str(), "custom:email");
		assert_ne!(custom, UserAttributeKey::Email);
	}

	#[test]
	fn empty_attribute_values_are_rejected() {
		let options = SignUpOptions::default().with_user_attribute(UserAttributeKey::Email, "");

		assert_eq!(
			options.to_provider_attributes(),
			Err(ValidationError::EmptyAttributeValue { key: "email".into() })
		);
	}

	#[test]
	fn options_deserialize_from_attribute_map() {
		let options: SignUpOptions = serde_json::from_str(
			"{\"user_attributes\":{\"email\":\"a@example.com\",\"custom:tier\":\"gold\"}}",
		)
		.expect("Options should deserialize.");

		assert_eq!(
			options.user_attributes.get(&UserAttributeKey::Email).map(String::as_str),
			Some("a@example.com")
		);
		assert_eq!(options.user_attributes.len(), 2);
	}
}
