// self
use crate::{
	_prelude::*,
	obs::{OperationOutcome, SIGN_UP_OPERATION},
};

/// Counter incremented once per [`OperationOutcome`].
pub const OPERATION_TOTAL: &str = "signup_broker_operation_total";
/// Counter incremented once per failure, labeled by [`Error::kind`].
pub const FAILURE_TOTAL: &str = "signup_broker_failure_total";

/// Counts an outcome of the sign-up operation.
pub fn record_outcome(outcome: OperationOutcome) {
	#[cfg(feature = "metrics")]
	metrics::counter!(
		OPERATION_TOTAL,
		"operation" => SIGN_UP_OPERATION,
		"outcome" => outcome.as_str()
	)
	.increment(1);
	#[cfg(not(feature = "metrics"))]
	let _ = (SIGN_UP_OPERATION, outcome);
}

/// Counts a failure delivered to `on_error`, split by what went wrong.
pub fn record_failure(err: &Error) {
	#[cfg(feature = "metrics")]
	metrics::counter!(FAILURE_TOTAL, "error_kind" => err.kind()).increment(1);
	#[cfg(not(feature = "metrics"))]
	let _ = err;
}
