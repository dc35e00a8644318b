//! Error taxonomy shared across identifiers, providers, and the sign-up operation.
//!
//! Every failure inside the crate is one of the [`Error`] kinds. The sign-up operation
//! normalizes whichever kind occurred into the caller-facing [`AuthError`], which keeps
//! the underlying cause reachable through [`StdError::source`].

// self
use crate::{_prelude::*, auth::IdentifierError, provider::ProviderError};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Short description carried by every [`AuthError`] raised for a failed sign-up.
pub const SIGN_UP_FAILED: &str = "Sign up failed.";
/// Recovery hint carried by every [`AuthError`] raised for a failed sign-up.
pub const TRY_AGAIN: &str = "Try again.";

/// Canonical error exposed by crate APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Caller input was malformed or missing.
	#[error(transparent)]
	Validation(#[from] ValidationError),
	/// The identity provider explicitly refused the request.
	#[error(transparent)]
	Provider(#[from] ProviderError),
	/// The identity provider could not be reached.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Anything else that went wrong while building the request or mapping the response.
	#[error(transparent)]
	Unexpected(#[from] UnexpectedError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
}
impl Error {
	/// Returns a stable label for the error kind, suitable for span or metric fields.
	pub const fn kind(&self) -> &'static str {
		match self {
			Self::Validation(_) => "validation",
			Self::Provider(_) => "provider_rejection",
			Self::Transport(_) => "transport",
			Self::Unexpected(_) => "unexpected",
			Self::Config(_) => "config",
		}
	}
}
impl From<IdentifierError> for Error {
	fn from(e: IdentifierError) -> Self {
		Self::Validation(e.into())
	}
}

/// Input validation failures caught before the provider is contacted.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ValidationError {
	/// A username, client id, or subject id failed identifier validation.
	#[error(transparent)]
	Identifier(#[from] IdentifierError),
	/// The password was empty.
	#[error("Password cannot be empty.")]
	EmptyPassword,
	/// A custom attribute key had no name after the `custom:` prefix.
	#[error("Custom attribute key `{key}` is missing a name.")]
	InvalidAttributeKey {
		/// Raw key that failed validation.
		key: String,
	},
	/// A user attribute was supplied without a value.
	#[error("User attribute `{key}` cannot have an empty value.")]
	EmptyAttributeValue {
		/// Attribute key whose value was empty.
		key: String,
	},
}

/// Transport-level failures.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the identity provider.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Failures that are neither caller mistakes nor provider decisions.
#[derive(Debug, ThisError)]
pub enum UnexpectedError {
	/// The MAC primitive refused the client secret as a key.
	#[error("Secret hash could not be computed.")]
	SecretHash,
	/// The request body could not be encoded.
	#[error("Sign-up request could not be encoded.")]
	RequestEncode(#[source] serde_json::Error),
	/// The provider returned a body that did not match the expected shape.
	#[error("Identity provider returned a malformed response.")]
	ResponseParse {
		/// Structured parsing failure, including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// The provider response parsed but could not be mapped into a result.
	#[error("Identity provider response could not be mapped: {reason}.")]
	ResponseMapping {
		/// What was wrong with the response.
		reason: String,
	},
	/// The background task panicked before reporting an outcome.
	#[error("Sign-up task panicked: {message}.")]
	TaskPanicked {
		/// Best-effort panic payload.
		message: String,
	},
	/// The background task was cancelled by its runtime before reporting an outcome.
	#[error("Sign-up task was cancelled before it completed.")]
	TaskCancelled,
}

/// Configuration and validation failures raised while wiring the crate up.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Endpoint URL could not be parsed.
	#[error("User pool endpoint is invalid.")]
	InvalidEndpoint {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Endpoint does not use HTTPS and is not a loopback address.
	#[error("User pool endpoint `{url}` must use HTTPS.")]
	InsecureEndpoint {
		/// Offending endpoint.
		url: Url,
	},
	/// Region string cannot be used as a host label.
	#[error("Region `{region}` is invalid.")]
	InvalidRegion {
		/// Offending region value.
		region: String,
	},
	/// No tokio runtime is available to run operations on.
	#[error("No tokio runtime is available for the sign-up executor.")]
	NoRuntime {
		/// Underlying lookup failure.
		#[source]
		source: tokio::runtime::TryCurrentError,
	},
	/// Executor concurrency bound must be positive.
	#[error("Executor must allow at least one in-flight operation.")]
	ZeroConcurrency,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Uniform caller-facing error delivered by the sign-up operation.
///
/// `description` and `recovery_suggestion` are fixed for sign-up failures; the
/// underlying [`Error`] is preserved in `cause` for diagnostics.
#[derive(Debug, ThisError)]
#[error("{description}")]
pub struct AuthError {
	/// Short description of what failed.
	pub description: &'static str,
	/// Underlying failure.
	#[source]
	pub cause: Error,
	/// What the user can do about it.
	pub recovery_suggestion: &'static str,
}
impl AuthError {
	/// Wraps a sign-up failure with the fixed description and recovery hint.
	pub fn sign_up_failed(cause: impl Into<Error>) -> Self {
		Self { description: SIGN_UP_FAILED, cause: cause.into(), recovery_suggestion: TRY_AGAIN }
	}
}
