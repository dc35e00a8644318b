//! Fire-and-forget sign-up operation with exactly-once completion handlers.

// self
use crate::{
	_prelude::*,
	auth::SignUpOptions,
	config::AppClientConfig,
	error::{AuthError, UnexpectedError},
	flows::{self, SignUpExecutor, SignUpRequest},
	obs::{self, OperationOutcome, OperationSpan},
	provider::IdentityProvider,
	result::SignUpResult,
};

/// Stage label of the span covering one operation's background task.
pub const TASK_STAGE: &str = "task";

type SuccessHandler = Box<dyn 'static + Send + FnOnce(SignUpResult)>;
type ErrorHandler = Box<dyn 'static + Send + FnOnce(AuthError)>;

/// Lifecycle of a single [`SignUpOperation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationState {
	/// Constructed but not started.
	Created,
	/// Submitted to the executor; no handler has fired yet.
	Running,
	/// `on_success` fired.
	Succeeded,
	/// `on_error` fired.
	Failed,
}

/// Read-only view of an operation's [`OperationState`].
///
/// It cannot be awaited and cannot cancel the operation.
#[derive(Clone, Debug)]
pub struct OperationStatus(Arc<Mutex<OperationState>>);
impl OperationStatus {
	fn new() -> Self {
		Self(Arc::new(Mutex::new(OperationState::Created)))
	}

	/// Returns the current state.
	pub fn state(&self) -> OperationState {
		*self.0.lock()
	}

	fn set(&self, state: OperationState) {
		*self.0.lock() = state;
	}
}

/// One user registration round-trip against an [`IdentityProvider`].
///
/// The operation validates its inputs, computes the secret hash, calls the provider once,
/// and reports through exactly one of `on_success`/`on_error`, exactly once. `start`
/// consumes the operation; a retry needs a new instance.
pub struct SignUpOperation {
	provider: Arc<dyn IdentityProvider>,
	client: AppClientConfig,
	username: String,
	password: String,
	options: SignUpOptions,
	completion: Completion,
}
impl SignUpOperation {
	/// Creates an operation in [`OperationState::Created`].
	pub fn new<S, E>(
		provider: Arc<dyn IdentityProvider>,
		client: AppClientConfig,
		username: impl Into<String>,
		password: impl Into<String>,
		options: SignUpOptions,
		on_success: S,
		on_error: E,
	) -> Self
	where
		S: 'static + Send + FnOnce(SignUpResult),
		E: 'static + Send + FnOnce(AuthError),
	{
		Self {
			provider,
			client,
			username: username.into(),
			password: password.into(),
			options,
			completion: Completion::new(Box::new(on_success), Box::new(on_error)),
		}
	}

	/// Current state; always [`OperationState::Created`] before `start`.
	pub fn state(&self) -> OperationState {
		self.completion.status.state()
	}

	/// Submits the operation to `executor` and returns immediately.
	pub fn start(self, executor: &SignUpExecutor) -> OperationStatus {
		let Self { provider, client, username, password, options, completion } = self;
		let status = completion.status.clone();
		let span = OperationSpan::new(TASK_STAGE);

		status.set(OperationState::Running);
		obs::record_outcome(OperationOutcome::Attempt);

		let work = span.instrument(async move {
			let request = SignUpRequest::new(username, password, client, options)?;

			flows::sign_up(provider.as_ref(), &request).await
		});

		executor.submit(work, move |outcome| completion.complete(outcome));

		status
	}
}
impl Debug for SignUpOperation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SignUpOperation")
			.field("client_id", &self.client.client_id)
			.field("username", &self.username)
			.field("state", &self.state())
			.finish()
	}
}

/// Owns both handlers so that at most one of them can ever run.
///
/// Dropping an unfired completion (its task was torn down with the runtime) reports
/// [`UnexpectedError::TaskCancelled`] through `on_error`.
struct Completion {
	handlers: Option<(SuccessHandler, ErrorHandler)>,
	status: OperationStatus,
}
impl Completion {
	fn new(on_success: SuccessHandler, on_error: ErrorHandler) -> Self {
		Self { handlers: Some((on_success, on_error)), status: OperationStatus::new() }
	}

	fn complete(mut self, outcome: Result<SignUpResult>) {
		let Some((on_success, on_error)) = self.handlers.take() else {
			return;
		};

		match outcome {
			Ok(result) => {
				self.status.set(OperationState::Succeeded);
				obs::record_outcome(OperationOutcome::Success);
				obs::record_completion(OperationOutcome::Success, None);
				on_success(result);
			},
			Err(err) => self.fail(on_error, err),
		}
	}

	fn fail(&self, on_error: ErrorHandler, err: Error) {
		self.status.set(OperationState::Failed);
		obs::record_outcome(OperationOutcome::Failure);
		obs::record_failure(&err);
		obs::record_completion(OperationOutcome::Failure, Some(&err));
		on_error(AuthError::sign_up_failed(err));
	}
}
impl Drop for Completion {
	fn drop(&mut self) {
		if self.status.state() != OperationState::Running {
			return;
		}
		if let Some((_, on_error)) = self.handlers.take() {
			self.fail(on_error, UnexpectedError::TaskCancelled.into());
		}
	}
}
