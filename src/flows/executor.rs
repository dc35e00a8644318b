//! Bounded executor that runs sign-up work on a host-owned tokio runtime.

// std
use std::any::Any;
// crates.io
use tokio::{runtime::Handle, task::JoinError};
// self
use crate::{
	_prelude::*,
	error::{ConfigError, UnexpectedError},
};

/// Runs sign-up operations off the caller's thread.
///
/// The executor borrows a runtime the host already owns (and shuts down); it never
/// creates one. An [`AsyncSemaphore`] caps how many operations may be in flight at
/// once; additional submissions wait for a permit inside the runtime, so submitting
/// never blocks the caller.
#[derive(Clone, Debug)]
pub struct SignUpExecutor {
	runtime: Handle,
	permits: Arc<AsyncSemaphore>,
	max_in_flight: usize,
}
impl SignUpExecutor {
	/// In-flight cap used by [`SignUpExecutor::new`].
	pub const DEFAULT_MAX_IN_FLIGHT: usize = 16;

	/// Creates an executor over the provided runtime handle.
	pub fn new(runtime: Handle) -> Self {
		Self {
			runtime,
			permits: Arc::new(AsyncSemaphore::new(Self::DEFAULT_MAX_IN_FLIGHT)),
			max_in_flight: Self::DEFAULT_MAX_IN_FLIGHT,
		}
	}

	/// Creates an executor over the runtime the caller is currently inside.
	pub fn current() -> Result<Self, ConfigError> {
		let runtime = Handle::try_current().map_err(|source| ConfigError::NoRuntime { source })?;

		Ok(Self::new(runtime))
	}

	/// Overrides the in-flight cap; zero is rejected.
	pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Result<Self, ConfigError> {
		if max_in_flight == 0 {
			return Err(ConfigError::ZeroConcurrency);
		}

		self.permits = Arc::new(AsyncSemaphore::new(max_in_flight));
		self.max_in_flight = max_in_flight;

		Ok(self)
	}

	/// Maximum number of operations allowed to run concurrently.
	pub fn max_in_flight(&self) -> usize {
		self.max_in_flight
	}

	/// Spawns `work` and hands its outcome to `complete`.
	///
	/// A panic inside `work` is reported as [`UnexpectedError::TaskPanicked`] instead of
	/// being lost with the task.
	pub(crate) fn submit<F, T, C>(&self, work: F, complete: C)
	where
		F: 'static + Send + Future<Output = Result<T>>,
		T: 'static + Send,
		C: 'static + Send + FnOnce(Result<T>),
	{
		let permits = Arc::clone(&self.permits);
		let runtime = self.runtime.clone();

		self.runtime.spawn(async move {
			let _permit = permits.acquire_arc().await;
			let outcome = match runtime.spawn(work).await {
				Ok(outcome) => outcome,
				Err(e) => Err(join_error(e).into()),
			};

			complete(outcome);
		});
	}
}

fn join_error(err: JoinError) -> UnexpectedError {
	if err.is_panic() {
		UnexpectedError::TaskPanicked { message: panic_message(err.into_panic()) }
	} else {
		UnexpectedError::TaskCancelled
	}
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
	if let Some(message) = payload.downcast_ref::<&str>() {
		(*message).to_owned()
	} else if let Some(message) = payload.downcast_ref::<String>() {
		message.clone()
	} else {
		"non-string panic payload".into()
	}
}
