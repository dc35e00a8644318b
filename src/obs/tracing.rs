// self
use crate::{
	_prelude::*,
	auth::Username,
	obs::{OperationOutcome, SIGN_UP_OPERATION},
};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedOperation<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedOperation<F> = F;

/// A span builder used by the sign-up operation.
#[derive(Clone, Debug)]
pub struct OperationSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl OperationSpan {
	/// Creates a new sign-up span tagged with the provided stage.
	pub fn new(stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"signup_broker.operation",
				operation = SIGN_UP_OPERATION,
				stage
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (SIGN_UP_OPERATION, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedOperation<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits a debug event right before the provider is called.
pub fn record_dispatch(username: &Username, attribute_count: usize) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(username = %username, attribute_count, "dispatching sign-up request");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (username, attribute_count);
	}
}

/// Emits an event describing how the operation finished.
pub fn record_completion(outcome: OperationOutcome, error: Option<&Error>) {
	#[cfg(feature = "tracing")]
	{
		match error {
			Some(err) => tracing::warn!(
				outcome = outcome.as_str(),
				error_kind = err.kind(),
				error = %err,
				"sign-up failed"
			),
			None => tracing::debug!(outcome = outcome.as_str(), "sign-up completed"),
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (outcome, error);
	}
}
