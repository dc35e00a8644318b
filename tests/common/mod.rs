//! Shared fixtures for sign-up integration tests.

#![allow(dead_code)]

// std
use std::{sync::Arc, time::Duration};
// crates.io
use parking_lot::Mutex;
use tokio::sync::mpsc::{self, UnboundedReceiver};
// self
use signup_broker::{
	auth::SignUpOptions,
	config::AppClientConfig,
	error::{AuthError, Result},
	flows::SignUpOperation,
	provider::{
		IdentityProvider, ProviderCodeDeliveryDetails, ProviderFuture, ProviderSignUpRequest,
		SignUpResponse,
	},
	result::SignUpResult,
};

pub const USERNAME: &str = "alice";
pub const PASSWORD: &str = "Secr3t!";
pub const CLIENT_ID: &str = "abc123";
pub const CLIENT_SECRET: &str = "shh";
pub const SECRET_HASH: &str = "MigPuYJ3iN+z4CN0jsKSzXVX55y2vxyWQl4iOBMlBU4=";

pub type Outcome = std::result::Result<SignUpResult, AuthError>;

type Responder = Box<dyn Fn(&ProviderSignUpRequest) -> Result<SignUpResponse> + Send + Sync>;

/// In-process provider that answers every call with a scripted outcome.
pub struct ScriptedProvider {
	respond: Responder,
	delay: Option<Duration>,
	calls: Mutex<Vec<ProviderSignUpRequest>>,
}
impl ScriptedProvider {
	pub fn new<F>(respond: F) -> Self
	where
		F: 'static + Send + Sync + Fn(&ProviderSignUpRequest) -> Result<SignUpResponse>,
	{
		Self { respond: Box::new(respond), delay: None, calls: Mutex::new(Vec::new()) }
	}

	pub fn with_delay(mut self, delay: Duration) -> Self {
		self.delay = Some(delay);

		self
	}

	pub fn calls(&self) -> Vec<ProviderSignUpRequest> {
		self.calls.lock().clone()
	}
}
impl IdentityProvider for ScriptedProvider {
	fn sign_up<'a>(
		&'a self,
		request: &'a ProviderSignUpRequest,
	) -> ProviderFuture<'a, SignUpResponse> {
		Box::pin(async move {
			self.calls.lock().push(request.clone());

			if let Some(delay) = self.delay {
				tokio::time::sleep(delay).await;
			}

			(self.respond)(request)
		})
	}
}

pub fn client() -> AppClientConfig {
	AppClientConfig::new(CLIENT_ID, CLIENT_SECRET).expect("Client fixture should be valid.")
}

pub fn unconfirmed_email_response(user_sub: &str) -> SignUpResponse {
	SignUpResponse {
		user_confirmed: false,
		user_sub: user_sub.into(),
		code_delivery_details: Some(ProviderCodeDeliveryDetails {
			destination: Some("a***@example.com".into()),
			delivery_medium: Some("EMAIL".into()),
			attribute_name: Some("email".into()),
		}),
	}
}

pub fn confirmed_response(user_sub: &str) -> SignUpResponse {
	SignUpResponse { user_confirmed: true, user_sub: user_sub.into(), code_delivery_details: None }
}

/// Builds an operation whose handlers forward into the returned receiver.
pub fn operation(
	provider: Arc<dyn IdentityProvider>,
	username: &str,
	password: &str,
	options: SignUpOptions,
) -> (SignUpOperation, UnboundedReceiver<Outcome>) {
	let (tx, rx) = mpsc::unbounded_channel();
	let err_tx = tx.clone();
	let op = SignUpOperation::new(
		provider,
		client(),
		username,
		password,
		options,
		move |result| {
			let _ = tx.send(Ok(result));
		},
		move |err| {
			let _ = err_tx.send(Err(err));
		},
	);

	(op, rx)
}

/// Waits for the single outcome and asserts that no other handler ever fires.
pub async fn single_outcome(mut rx: UnboundedReceiver<Outcome>) -> Outcome {
	let outcome = tokio::time::timeout(Duration::from_secs(5), rx.recv())
		.await
		.expect("A handler should fire within the timeout.")
		.expect("A handler should fire before the handlers are dropped.");
	let rest = tokio::time::timeout(Duration::from_secs(5), rx.recv())
		.await
		.expect("Handlers should be released after completion.");

	assert!(rest.is_none(), "Exactly one handler may fire.");

	outcome
}
