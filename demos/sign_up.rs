//! Registers a user through a [`SignUpOperation`] backed by the reqwest transport, with a
//! local mock standing in for the user pool.

// std
use std::sync::Arc;
// crates.io
use color_eyre::{Result, eyre::eyre};
use httpmock::prelude::*;
use tokio::sync::mpsc;
// self
use signup_broker::{
	auth::{SignUpOptions, UserAttributeKey},
	config::{AppClientConfig, UserPoolEndpoint},
	flows::{SignUpExecutor, SignUpOperation},
	http::{CognitoHttpClient, SIGN_UP_TARGET},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let sign_up_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/").header("x-amz-target", SIGN_UP_TARGET);
			then.status(200).header("content-type", "application/x-amz-json-1.1").body(
				"{\"UserConfirmed\":false,\"UserSub\":\"demo-sub\",\"CodeDeliveryDetails\":\
				{\"Destination\":\"d***@example.com\",\"DeliveryMedium\":\"EMAIL\",\
				\"AttributeName\":\"email\"}}",
			);
		})
		.await;
	let provider = CognitoHttpClient::new(UserPoolEndpoint::parse(&server.url("/"))?)?;
	let client = AppClientConfig::new("democlient", "demo-secret")?;
	let options = SignUpOptions::default()
		.with_user_attribute(UserAttributeKey::Email, "demo@example.com")
		.with_user_attribute(UserAttributeKey::custom("plan")?, "trial");
	let executor = SignUpExecutor::current()?.with_max_in_flight(4)?;
	let (tx, mut rx) = mpsc::unbounded_channel();
	let err_tx = tx.clone();
	let op = SignUpOperation::new(
		Arc::new(provider),
		client,
		"demo-user",
		"Correct-Horse-9",
		options,
		move |result| {
			let _ = tx.send(Ok(result));
		},
		move |err| {
			let _ = err_tx.send(Err(err));
		},
	);
	let status = op.start(&executor);
	let result = rx.recv().await.ok_or_else(|| eyre!("Sign-up handlers were dropped."))??;

	println!("Sign-up finished in state {:?}.", status.state());
	println!("Next step: {:?}.", result.next_step.step);

	if let Some(details) = result.next_step.code_delivery_details {
		println!(
			"Confirmation code sent via {} to {}.",
			details.delivery_medium,
			details.destination.unwrap_or_default()
		);
	}

	sign_up_mock.assert_async().await;

	Ok(())
}
