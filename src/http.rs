//! reqwest-backed [`IdentityProvider`] speaking the user pool JSON protocol.
//!
//! Each call POSTs the encoded [`ProviderSignUpRequest`] to the pool endpoint with the
//! `X-Amz-Target` action header. Non-success responses are decoded into
//! [`ProviderError`]s, connection failures become [`TransportError`]s, and success bodies
//! that do not decode become [`UnexpectedError::ResponseParse`](crate::error::UnexpectedError).

// crates.io
use reqwest::{
	StatusCode,
	header::{CONTENT_TYPE, HeaderMap, RETRY_AFTER},
	redirect::Policy,
};
use time::{OffsetDateTime, format_description::well_known::Rfc2822};
// self
use crate::{
	_prelude::*,
	config::UserPoolEndpoint,
	error::{ConfigError, TransportError},
	provider::{
		self, IdentityProvider, ProviderError, ProviderErrorBody, ProviderFuture,
		ProviderSignUpRequest, SignUpResponse,
	},
};

/// `X-Amz-Target` value selecting the sign-up action.
pub const SIGN_UP_TARGET: &str = "AWSCognitoIdentityProviderService.SignUp";
/// Content type of the user pool JSON protocol.
pub const AMZ_JSON_CONTENT_TYPE: &str = "application/x-amz-json-1.1";

const TARGET_HEADER: &str = "x-amz-target";
const ERROR_TYPE_HEADER: &str = "x-amzn-errortype";
const BODY_PREVIEW_LIMIT: usize = 256;

/// Shared HTTP client bound to one user pool endpoint.
///
/// Clones share the underlying connection pool; the client is safe to use from any number
/// of concurrent operations. User pool actions answer directly, so the default client
/// built by [`CognitoHttpClient::new`] does not follow redirects; configure any custom
/// [`ReqwestClient`] the same way.
#[derive(Clone, Debug)]
pub struct CognitoHttpClient {
	client: ReqwestClient,
	endpoint: UserPoolEndpoint,
}
impl CognitoHttpClient {
	/// Builds a client with redirects disabled.
	pub fn new(endpoint: UserPoolEndpoint) -> Result<Self> {
		let client =
			ReqwestClient::builder().redirect(Policy::none()).build().map_err(ConfigError::from)?;

		Ok(Self::with_client(client, endpoint))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient, endpoint: UserPoolEndpoint) -> Self {
		Self { client, endpoint }
	}

	/// Endpoint every request is sent to.
	pub fn endpoint(&self) -> &UserPoolEndpoint {
		&self.endpoint
	}

	async fn send(&self, request: &ProviderSignUpRequest) -> Result<SignUpResponse> {
		let body = provider::encode_json(request)?;
		let response = self
			.client
			.post(self.endpoint.url().clone())
			.header(CONTENT_TYPE, AMZ_JSON_CONTENT_TYPE)
			.header(TARGET_HEADER, SIGN_UP_TARGET)
			.body(body)
			.send()
			.await
			.map_err(map_reqwest_error)?;
		let status = response.status();
		let headers = response.headers().to_owned();
		let bytes = response.bytes().await.map_err(TransportError::from)?;

		if status.is_success() {
			return provider::decode_json(&bytes, Some(status.as_u16()));
		}

		Err(map_error_response(status, &headers, &bytes).into())
	}
}
impl IdentityProvider for CognitoHttpClient {
	fn sign_up<'a>(
		&'a self,
		request: &'a ProviderSignUpRequest,
	) -> ProviderFuture<'a, SignUpResponse> {
		Box::pin(self.send(request))
	}
}

fn map_reqwest_error(err: ReqwestError) -> Error {
	if err.is_builder() {
		return ConfigError::from(err).into();
	}

	TransportError::from(err).into()
}

fn map_error_response(status: StatusCode, headers: &HeaderMap, bytes: &[u8]) -> ProviderError {
	let mut body = serde_json::from_slice::<ProviderErrorBody>(bytes).unwrap_or_else(|_| {
		ProviderErrorBody {
			error_type: String::new(),
			message: Some(truncate_preview(String::from_utf8_lossy(bytes).into_owned())),
		}
	});

	if body.error_type.is_empty() {
		body.error_type = headers
			.get(ERROR_TYPE_HEADER)
			.and_then(|v| v.to_str().ok())
			.unwrap_or_default()
			.to_owned();
	}

	let err = ProviderError::from_body(body, status.as_u16());

	match parse_retry_after(headers) {
		Some(retry_after) => err.with_retry_after(retry_after),
		None => err,
	}
}

fn truncate_preview(body: String) -> String {
	if body.chars().count() <= BODY_PREVIEW_LIMIT {
		return body;
	}

	let mut buf = body.chars().take(BODY_PREVIEW_LIMIT).collect::<String>();

	buf.push('…');

	buf
}

fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
	let value = headers.get(RETRY_AFTER)?;
	let raw = value.to_str().ok()?.trim();

	if let Ok(secs) = raw.parse::<u32>() {
		return Some(Duration::seconds(secs.into()));
	}
	if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc2822) {
		let delta = moment - OffsetDateTime::now_utc();

		if delta.is_positive() {
			return Some(delta);
		}
	}

	None
}
