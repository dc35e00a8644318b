//! Optional observability helpers for the sign-up operation.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `signup_broker.operation` with the
//!   `operation` and `stage` fields, plus dispatch/failure events. Passwords and secret
//!   hashes are never recorded.
//! - Enable `metrics` to increment `signup_broker_operation_total` (labels `operation` and
//!   `outcome`) for every recorded outcome. Failures also bump
//!   `signup_broker_failure_total`, labeled by `error_kind`.

mod metrics;
mod tracing;

pub use self::{metrics::*, tracing::*};

// self
use crate::_prelude::*;

/// Label recorded for sign-up spans and counters.
pub const SIGN_UP_OPERATION: &str = "sign_up";

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationOutcome {
	/// Entry to the operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure delivered to the error handler.
	Failure,
}
impl OperationOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationOutcome::Attempt => "attempt",
			OperationOutcome::Success => "success",
			OperationOutcome::Failure => "failure",
		}
	}
}
impl Display for OperationOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
