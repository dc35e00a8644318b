//! Provider rejection taxonomy.

// self
use crate::{_prelude::*, provider::ProviderErrorBody};

/// Canonical categories of provider-side refusals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProviderErrorKind {
	/// The username is already registered.
	UsernameExists,
	/// The password does not satisfy the pool's policy.
	InvalidPassword,
	/// A request parameter (attribute, username format, secret hash) was rejected.
	InvalidParameter,
	/// The request was throttled.
	TooManyRequests,
	/// A pool quota was exhausted.
	LimitExceeded,
	/// The verification code could not be delivered.
	CodeDeliveryFailure,
	/// The app client is not allowed to perform the call.
	NotAuthorized,
	/// The app client or pool does not exist.
	ResourceNotFound,
	/// The provider failed internally.
	InternalError,
	/// Any exception name not listed above.
	Other,
}
impl ProviderErrorKind {
	/// Classifies a provider exception name.
	///
	/// Namespaces (`prefix#Name`) and trailing `:detail` segments are ignored.
	pub fn from_error_type(raw: &str) -> Self {
		let name = raw.rsplit('#').next().unwrap_or(raw);
		let name = name.split(':').next().unwrap_or(name).trim();

		match name {
			"UsernameExistsException" | "AliasExistsException" => Self::UsernameExists,
			"InvalidPasswordException" => Self::InvalidPassword,
			"InvalidParameterException" => Self::InvalidParameter,
			"TooManyRequestsException" | "ThrottlingException" => Self::TooManyRequests,
			"LimitExceededException" => Self::LimitExceeded,
			"CodeDeliveryFailureException" => Self::CodeDeliveryFailure,
			"NotAuthorizedException" => Self::NotAuthorized,
			"ResourceNotFoundException" => Self::ResourceNotFound,
			"InternalErrorException" | "InternalFailure" | "ServiceUnavailable" =>
				Self::InternalError,
			_ => Self::Other,
		}
	}

	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::UsernameExists => "username_exists",
			Self::InvalidPassword => "invalid_password",
			Self::InvalidParameter => "invalid_parameter",
			Self::TooManyRequests => "too_many_requests",
			Self::LimitExceeded => "limit_exceeded",
			Self::CodeDeliveryFailure => "code_delivery_failure",
			Self::NotAuthorized => "not_authorized",
			Self::ResourceNotFound => "resource_not_found",
			Self::InternalError => "internal_error",
			Self::Other => "other",
		}
	}

	/// Returns `true` for throttling and quota refusals.
	pub const fn is_throttling(self) -> bool {
		matches!(self, Self::TooManyRequests | Self::LimitExceeded)
	}
}
impl Display for ProviderErrorKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Explicit refusal returned by the identity provider.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Identity provider rejected the sign-up ({error_type}): {message}")]
pub struct ProviderError {
	/// Classified refusal category.
	pub kind: ProviderErrorKind,
	/// Raw exception name reported by the provider.
	pub error_type: String,
	/// Provider message, preserved verbatim.
	pub message: String,
	/// HTTP status code, when available.
	pub status: Option<u16>,
	/// Retry-After hint from upstream, if supplied.
	pub retry_after: Option<Duration>,
}
impl ProviderError {
	/// Creates an error for the given exception name and message.
	pub fn new(error_type: impl Into<String>, message: impl Into<String>) -> Self {
		let error_type = error_type.into();

		Self {
			kind: ProviderErrorKind::from_error_type(&error_type),
			error_type,
			message: message.into(),
			status: None,
			retry_after: None,
		}
	}

	/// Builds an error from a decoded error body and its HTTP status.
	pub fn from_body(body: ProviderErrorBody, status: u16) -> Self {
		let error_type = if body.error_type.is_empty() {
			format!("HttpStatus{status}")
		} else {
			body.error_type
		};
		let mut err = Self::new(error_type, body.message.unwrap_or_default()).with_status(status);

		if err.kind == ProviderErrorKind::Other {
			err.kind = classify_status(status);
		}

		err
	}

	/// Adds the HTTP status code.
	pub fn with_status(mut self, status: u16) -> Self {
		self.status = Some(status);

		self
	}

	/// Adds a Retry-After hint.
	pub fn with_retry_after(mut self, retry_after: Duration) -> Self {
		self.retry_after = Some(retry_after);

		self
	}
}

fn classify_status(status: u16) -> ProviderErrorKind {
	match status {
		429 => ProviderErrorKind::TooManyRequests,
		403 => ProviderErrorKind::NotAuthorized,
		404 => ProviderErrorKind::ResourceNotFound,
		code if code >= 500 => ProviderErrorKind::InternalError,
		_ => ProviderErrorKind::Other,
	}
}
