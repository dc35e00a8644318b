//! Caller-supplied configuration: user pool endpoint and app client credentials.

// std
use std::net::IpAddr;
// self
use crate::{
	_prelude::*,
	auth::{ClientId, ClientSecret},
	error::ConfigError,
};

/// Validated HTTPS endpoint of a user pool service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Url", into = "Url")]
pub struct UserPoolEndpoint(Url);
impl UserPoolEndpoint {
	/// Validates `url`; plain HTTP is only accepted for loopback hosts.
	pub fn new(url: Url) -> Result<Self, ConfigError> {
		if url.scheme() == "https" || (url.scheme() == "http" && is_loopback(&url)) {
			Ok(Self(url))
		} else {
			Err(ConfigError::InsecureEndpoint { url })
		}
	}

	/// Parses and validates an endpoint string.
	pub fn parse(raw: &str) -> Result<Self, ConfigError> {
		let url = Url::parse(raw).map_err(|source| ConfigError::InvalidEndpoint { source })?;

		Self::new(url)
	}

	/// Returns the public regional endpoint, e.g. `https://cognito-idp.us-east-1.amazonaws.com/`.
	pub fn for_region(region: &str) -> Result<Self, ConfigError> {
		let valid = !region.is_empty()
			&& region.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');

		if !valid {
			return Err(ConfigError::InvalidRegion { region: region.to_owned() });
		}

		Self::parse(&format!("https://cognito-idp.{region}.amazonaws.com/"))
	}

	/// Returns the endpoint URL.
	pub fn url(&self) -> &Url {
		&self.0
	}
}
impl TryFrom<Url> for UserPoolEndpoint {
	type Error = ConfigError;

	fn try_from(value: Url) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}
impl From<UserPoolEndpoint> for Url {
	fn from(value: UserPoolEndpoint) -> Self {
		value.0
	}
}
impl Display for UserPoolEndpoint {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		Display::fmt(&self.0, f)
	}
}

/// App client credentials used for every sign-up issued through that client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppClientConfig {
	/// App client identifier.
	pub client_id: ClientId,
	/// App client secret; an empty secret is still used as the secret-hash key.
	#[serde(default = "empty_secret")]
	pub client_secret: ClientSecret,
}
impl AppClientConfig {
	/// Creates a config after validating the client identifier.
	pub fn new(client_id: impl AsRef<str>, client_secret: impl Into<String>) -> Result<Self> {
		Ok(Self {
			client_id: ClientId::new(client_id)?,
			client_secret: ClientSecret::new(client_secret),
		})
	}
}

fn empty_secret() -> ClientSecret {
	ClientSecret::new("")
}

fn is_loopback(url: &Url) -> bool {
	match url.host_str() {
		Some("localhost") => true,
		Some(host) => host
			.trim_start_matches('[')
			.trim_end_matches(']')
			.parse::<IpAddr>()
			.is_ok_and(|ip| ip.is_loopback()),
		None => false,
	}
}
