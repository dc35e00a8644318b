//! Sign-up orchestration: validated requests, the host-owned executor, and the
//! callback-driven operation.
//!
//! [`sign_up`] is the sequential core (attributes, secret hash, provider call, result
//! assembly). [`SignUpOperation`] wraps it for fire-and-forget callers: it runs on a
//! [`SignUpExecutor`] and reports through exactly one of its two handlers.

pub mod executor;
pub mod operation;
pub mod request;

pub use executor::*;
pub use operation::*;
pub use request::*;

// self
use crate::{
	_prelude::*,
	obs::{self, OperationSpan},
	provider::IdentityProvider,
	result::SignUpResult,
};

/// Stage label of the span covering the provider round-trip.
pub const PROVIDER_CALL_STAGE: &str = "provider_call";

/// Registers `request` with `provider` and translates the response.
///
/// Exactly one provider call is made; nothing is retried.
pub async fn sign_up(
	provider: &dyn IdentityProvider,
	request: &SignUpRequest,
) -> Result<SignUpResult> {
	let body = request.to_provider_request()?;

	obs::record_dispatch(request.username(), body.user_attributes.len());

	let response =
		OperationSpan::new(PROVIDER_CALL_STAGE).instrument(provider.sign_up(&body)).await?;

	SignUpResult::assemble(&response, request.username())
}
