//! JSON shapes exchanged with the user pool `SignUp` action.

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	auth::{ClientId, Password, SecretHash, Username},
	error::UnexpectedError,
};

/// A single `{ Name, Value }` user attribute in provider representation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProviderAttribute {
	/// Attribute key string (e.g. `email`, `custom:tier`).
	pub name: String,
	/// Attribute value.
	pub value: String,
}

/// Request body for the provider's `SignUp` action.
///
/// The password and secret hash stay redacted in `Debug` output; they are only exposed
/// when the body is serialized for the wire.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProviderSignUpRequest {
	/// App client the request is issued through.
	pub client_id: ClientId,
	/// Secret hash bound to `username` and `client_id`.
	pub secret_hash: SecretHash,
	/// Username to register.
	pub username: Username,
	/// Password to register.
	pub password: Password,
	/// Attributes registered with the account.
	pub user_attributes: Vec<ProviderAttribute>,
}

/// Successful response of the provider's `SignUp` action.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SignUpResponse {
	/// Whether the account is already confirmed.
	#[serde(default)]
	pub user_confirmed: bool,
	/// Provider-issued subject identifier of the new user.
	pub user_sub: String,
	/// Where the confirmation code was sent, when one was sent.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub code_delivery_details: Option<ProviderCodeDeliveryDetails>,
}

/// Provider description of a verification-code delivery.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProviderCodeDeliveryDetails {
	/// Masked contact the code was sent to.
	#[serde(default)]
	pub destination: Option<String>,
	/// Raw delivery medium string, such as `EMAIL` or `SMS`.
	#[serde(default)]
	pub delivery_medium: Option<String>,
	/// Attribute the code verifies.
	#[serde(default)]
	pub attribute_name: Option<String>,
}

/// Error body returned alongside non-success statuses.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ProviderErrorBody {
	/// Exception name, possibly namespaced (`com.amazonaws...#UsernameExistsException`).
	#[serde(rename = "__type", default)]
	pub error_type: String,
	/// Human readable message.
	#[serde(alias = "Message", default)]
	pub message: Option<String>,
}

/// Decodes a JSON payload, preserving the failing path for diagnostics.
pub fn decode_json<T>(bytes: &[u8], status: Option<u16>) -> Result<T>
where
	T: DeserializeOwned,
{
	let mut de = serde_json::Deserializer::from_slice(bytes);

	serde_path_to_error::deserialize(&mut de)
		.map_err(|source| UnexpectedError::ResponseParse { source, status }.into())
}

/// Encodes a request body for the wire.
pub fn encode_json<T>(body: &T) -> Result<Vec<u8>>
where
	T: ?Sized + Serialize,
{
	serde_json::to_vec(body).map_err(|e| UnexpectedError::RequestEncode(e).into())
}
