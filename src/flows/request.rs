//! Immutable sign-up request built by a validating factory.

// self
use crate::{
	_prelude::*,
	auth::{Password, SecretHash, SignUpOptions, Username},
	config::AppClientConfig,
	error::ValidationError,
	provider::ProviderSignUpRequest,
};

/// One registration attempt: who, with what password, through which app client.
///
/// Fields are private; a value can only be obtained through [`SignUpRequest::new`], so
/// every instance has a valid username, a non-empty password, and non-empty attribute
/// values.
#[derive(Clone, Debug)]
pub struct SignUpRequest {
	username: Username,
	password: Password,
	client: AppClientConfig,
	options: SignUpOptions,
}
impl SignUpRequest {
	/// Validates the inputs and builds the request.
	pub fn new(
		username: impl AsRef<str>,
		password: impl Into<String>,
		client: AppClientConfig,
		options: SignUpOptions,
	) -> Result<Self> {
		let username = Username::new(username)?;
		let password = Password::new(password);

		if password.is_empty() {
			return Err(ValidationError::EmptyPassword.into());
		}

		options.to_provider_attributes()?;

		Ok(Self { username, password, client, options })
	}

	/// Username exactly as supplied.
	pub fn username(&self) -> &Username {
		&self.username
	}

	/// App client the request is issued through.
	pub fn client(&self) -> &AppClientConfig {
		&self.client
	}

	/// Options carried with the request.
	pub fn options(&self) -> &SignUpOptions {
		&self.options
	}

	/// Builds the provider body: attributes, then the secret hash.
	pub fn to_provider_request(&self) -> Result<ProviderSignUpRequest> {
		let user_attributes = self.options.to_provider_attributes()?;
		let AppClientConfig { client_id, client_secret } = &self.client;
		let secret_hash = SecretHash::compute(&self.username, client_id, client_secret)?;

		Ok(ProviderSignUpRequest {
			client_id: client_id.clone(),
			secret_hash,
			username: self.username.clone(),
			password: self.password.clone(),
			user_attributes,
		})
	}
}
