//! Normalized verification-code delivery details.

// self
use crate::{_prelude::*, provider::ProviderCodeDeliveryDetails};

/// Channel a verification code was delivered through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryMedium {
	/// Sent by email.
	Email,
	/// Sent by text message.
	Sms,
	/// Anything the provider reported that is not one of the above.
	Unknown,
}
impl DeliveryMedium {
	/// Maps a provider medium string, matching `EMAIL` and `SMS` case-sensitively.
	///
	/// Missing, empty, or unrecognized values map to [`DeliveryMedium::Unknown`].
	pub fn from_provider(raw: Option<&str>) -> Self {
		match raw {
			Some("EMAIL") => Self::Email,
			Some("SMS") => Self::Sms,
			_ => Self::Unknown,
		}
	}

	/// Returns the provider spelling of the medium.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Email => "EMAIL",
			Self::Sms => "SMS",
			Self::Unknown => "UNKNOWN",
		}
	}
}
impl Display for DeliveryMedium {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Where and how a verification code was sent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeDeliveryDetails {
	/// Masked contact string, e.g. `a***@example.com`.
	pub destination: Option<String>,
	/// Delivery channel.
	pub delivery_medium: DeliveryMedium,
	/// Attribute the code verifies, e.g. `email`.
	pub attribute_name: Option<String>,
}
impl CodeDeliveryDetails {
	/// Normalizes the provider's delivery sub-structure.
	pub fn from_provider(details: &ProviderCodeDeliveryDetails) -> Self {
		Self {
			destination: details.destination.clone(),
			delivery_medium: DeliveryMedium::from_provider(details.delivery_medium.as_deref()),
			attribute_name: details.attribute_name.clone(),
		}
	}
}
